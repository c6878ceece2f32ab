#[cfg(feature = "parse")]
use url::ParseError;

/// Reasons a `upi://pay` link could not be read back into a
/// [PaymentRequest](crate::PaymentRequest).
#[derive(Debug, Eq, PartialEq)]
pub enum UpiUrlError {
    #[cfg(feature = "parse")]
    Url(ParseError),
    Scheme(String),
    Host(String),
    PayeeAddress,
    Amount(String),
}

impl std::error::Error for UpiUrlError {}

impl std::fmt::Display for UpiUrlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpiUrlError::Amount(amount) => write!(
                f,
                "Could not parse \"{}\" as an amount.",
                amount
            ),
            UpiUrlError::Host(host) => write!(
                f,
                "Host should be pay, not \"{}\"",
                host
            ),
            UpiUrlError::PayeeAddress => write!(
                f,
                "The pa parameter holding the payee address is missing"
            ),
            UpiUrlError::Scheme(scheme) => write!(
                f,
                "Scheme should be upi, not \"{}\"",
                scheme
            ),
            #[cfg(feature = "parse")]
            UpiUrlError::Url(e) => write!(
                f,
                "Error parsing URL: {}",
                e
            )
        }
    }
}
