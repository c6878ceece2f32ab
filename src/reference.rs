//! Sources of transaction references, the `tr` parameter of a payment link.
//!
//! A source is handed to [PaymentRequest::assign_reference](crate::PaymentRequest::assign_reference)
//! explicitly; there is no process-wide counter.
//!
//! ```
//! use upi_qr::{PaymentRequest, Sequence};
//!
//! let mut sequence = Sequence::new("ORD", 41);
//! let mut request = PaymentRequest::new("merchant@upi".to_string());
//! request.assign_reference(&mut sequence);
//! assert_eq!(request.reference.as_deref(), Some("ORD0000000041"));
//! ```

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Longest reference payment apps accept.
pub const MAX_REFERENCE_LEN: usize = 35;

/// Hands out transaction references.
pub trait ReferenceSource {
    fn next_reference(&mut self) -> String;
}

/// Deterministic references: a prefix followed by a zero-padded counter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Sequence {
    prefix: String,
    next: u64,
}

impl Sequence {
    pub fn new<S: Into<String>>(prefix: S, start: u64) -> Self {
        Sequence {
            prefix: prefix.into(),
            next: start,
        }
    }
}

impl ReferenceSource for Sequence {
    fn next_reference(&mut self) -> String {
        let reference = format!("{}{:010}", self.prefix, self.next);
        self.next += 1;
        reference
    }
}

/// Random alphanumeric references of [MAX_REFERENCE_LEN] characters.
#[cfg(feature = "gen_reference")]
#[cfg_attr(docsrs, doc(cfg(feature = "gen_reference")))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomReference;

#[cfg(feature = "gen_reference")]
#[cfg_attr(docsrs, doc(cfg(feature = "gen_reference")))]
impl ReferenceSource for RandomReference {
    fn next_reference(&mut self) -> String {
        use rand::distr::Alphanumeric;
        use rand::Rng;

        rand::rng()
            .sample_iter(Alphanumeric)
            .take(MAX_REFERENCE_LEN)
            .map(char::from)
            .collect()
    }
}
