/// Different ways encoding a payload into a QR code can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The payload does not fit in the largest supported version.
    /// Holds the payload length and the largest byte capacity, both in bytes.
    PayloadTooLarge { len: usize, capacity: usize },
    /// The PNG encoder rejected the canvas.
    #[cfg(feature = "png")]
    Png(String),
}

impl std::error::Error for EncodeError {}

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::PayloadTooLarge { len, capacity } => write!(
                f,
                "Payload of {} bytes does not fit in a version 10-M QR code, which holds at most {} bytes",
                len, capacity
            ),
            #[cfg(feature = "png")]
            EncodeError::Png(err) => write!(f, "Could not encode the QR code as PNG: {}", err),
        }
    }
}
