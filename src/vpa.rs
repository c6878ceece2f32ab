//! Validation of Virtual Payment Addresses, `localpart@handle`.
//!
//! The QR encoder never calls this: validate the payee address before
//! building a [PaymentRequest](crate::PaymentRequest) from user input.
//!
//! ```
//! use upi_qr::{validate_vpa, VpaError};
//!
//! assert!(validate_vpa("merchant@upi").is_ok());
//! assert_eq!(validate_vpa("merchant"), Err(VpaError::MissingAt));
//! ```

use std::ops::RangeInclusive;

const LOCAL_PART_LEN: RangeInclusive<usize> = 2..=256;
const HANDLE_LEN: RangeInclusive<usize> = 2..=64;

/// Reasons a payee address is rejected. The `Display` text is meant to be
/// shown to the user as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VpaError {
    Empty,
    MissingAt,
    MultipleAt,
    LocalPartLength(usize),
    LocalPartCharacter(char),
    HandleLength(usize),
    HandleCharacter(char),
}

impl std::error::Error for VpaError {}

impl std::fmt::Display for VpaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VpaError::Empty => write!(f, "UPI ID is required"),
            VpaError::MissingAt => write!(
                f,
                "UPI ID must look like name@bank, the \"@\" is missing"
            ),
            VpaError::MultipleAt => write!(f, "UPI ID can only contain one \"@\""),
            VpaError::LocalPartLength(len) => write!(
                f,
                "The part before \"@\" must be between 2 and 256 characters long, not {}",
                len
            ),
            VpaError::LocalPartCharacter(c) => write!(
                f,
                "The part before \"@\" can only contain letters, digits, '.', '-' and '_', not '{}'",
                c
            ),
            VpaError::HandleLength(len) => write!(
                f,
                "The bank handle must be between 2 and 64 characters long, not {}",
                len
            ),
            VpaError::HandleCharacter(c) => write!(
                f,
                "The bank handle can only contain letters, not '{}'",
                c
            ),
        }
    }
}

/// Checks that `vpa` has the shape `localpart@handle`.
///
/// The local part takes 2 to 256 ASCII letters, digits, `.`, `-` or `_`; the
/// handle takes 2 to 64 ASCII letters. Surrounding whitespace is not trimmed.
///
/// # Errors
///
/// The first rule `vpa` breaks, checked left to right.
pub fn validate_vpa(vpa: &str) -> Result<(), VpaError> {
    if vpa.is_empty() {
        return Err(VpaError::Empty);
    }
    let (local, handle) = vpa.split_once('@').ok_or(VpaError::MissingAt)?;
    if handle.contains('@') {
        return Err(VpaError::MultipleAt);
    }

    if let Some(c) = local
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')))
    {
        return Err(VpaError::LocalPartCharacter(c));
    }
    if !LOCAL_PART_LEN.contains(&local.len()) {
        return Err(VpaError::LocalPartLength(local.len()));
    }

    if let Some(c) = handle.chars().find(|c| !c.is_ascii_alphabetic()) {
        return Err(VpaError::HandleCharacter(c));
    }
    if !HANDLE_LEN.contains(&handle.len()) {
        return Err(VpaError::HandleLength(handle.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_vpa, VpaError};

    #[test]
    fn accepts_common_addresses() {
        for vpa in [
            "merchant@upi",
            "john.doe-99@okaxis",
            "9876543210@paytm",
            "a_b@ybl",
            "ab@cd",
        ] {
            assert!(validate_vpa(vpa).is_ok(), "{}", vpa);
        }
    }

    #[test]
    fn rejects_shape() {
        assert_eq!(validate_vpa(""), Err(VpaError::Empty));
        assert_eq!(validate_vpa("merchant.upi"), Err(VpaError::MissingAt));
        assert_eq!(validate_vpa("a@b@upi"), Err(VpaError::MultipleAt));
    }

    #[test]
    fn rejects_local_part() {
        assert_eq!(validate_vpa("m@upi"), Err(VpaError::LocalPartLength(1)));
        assert_eq!(validate_vpa("@upi"), Err(VpaError::LocalPartLength(0)));
        assert_eq!(
            validate_vpa(&format!("{}@upi", "a".repeat(257))),
            Err(VpaError::LocalPartLength(257))
        );
        assert!(validate_vpa(&format!("{}@upi", "a".repeat(256))).is_ok());
        assert_eq!(
            validate_vpa("mer chant@upi"),
            Err(VpaError::LocalPartCharacter(' '))
        );
        assert_eq!(
            validate_vpa("café@upi"),
            Err(VpaError::LocalPartCharacter('é'))
        );
    }

    #[test]
    fn rejects_handle() {
        assert_eq!(validate_vpa("merchant@u"), Err(VpaError::HandleLength(1)));
        assert_eq!(validate_vpa("merchant@"), Err(VpaError::HandleLength(0)));
        assert_eq!(
            validate_vpa("merchant@upi1"),
            Err(VpaError::HandleCharacter('1'))
        );
        assert_eq!(
            validate_vpa(&format!("merchant@{}", "b".repeat(65))),
            Err(VpaError::HandleLength(65))
        );
    }

    #[test]
    fn reasons() {
        assert_eq!(
            VpaError::MissingAt.to_string(),
            "UPI ID must look like name@bank, the \"@\" is missing"
        );
        assert_eq!(
            VpaError::LocalPartLength(1).to_string(),
            "The part before \"@\" must be between 2 and 256 characters long, not 1"
        );
        assert_eq!(
            VpaError::HandleCharacter('1').to_string(),
            "The bank handle can only contain letters, not '1'"
        );
    }
}
