//! This library builds UPI payment links (`upi://pay?...`) from a payee address, amount and
//! optional details, and turns them into QR codes that payment apps can scan. The QR encoder
//! lives in the `upi-qrcode` crate of this repository and does not depend on any QR library.
//!
//! The encoder only knows byte mode, error correction level M, versions 1 to 10 and mask 0.
//! Links longer than 213 bytes are refused with [EncodeError::PayloadTooLarge].
//!
//! # Examples
//!
//! ```rust
//! use upi_qr::PaymentRequest;
//!
//! let mut request = PaymentRequest::new("merchant@upi".to_string());
//! request.amount(250.0);
//! request.note("Test".to_string());
//! assert_eq!(
//!     request.get_url(),
//!     "upi://pay?pa=merchant%40upi&am=250.00&cu=INR&tn=Test"
//! );
//! ```
//!
//! ```rust
//! # #[cfg(feature = "qr")] {
//! use upi_qr::{validate_vpa, PaymentRequest};
//!
//! let payee = "merchant@upi".to_string();
//! validate_vpa(&payee).unwrap();
//!
//! let mut request = PaymentRequest::new(payee);
//! request.amount(250.0);
//! let code = upi_qr::encode(&request).unwrap();
//! assert!(code.starts_with("data:image/svg+xml;base64,"));
//! # }
//! ```

mod reference;
mod url_error;
mod vpa;

#[cfg(feature = "gen_reference")]
pub use reference::RandomReference;
pub use reference::{ReferenceSource, Sequence, MAX_REFERENCE_LEN};
pub use url_error::UpiUrlError;
pub use vpa::{validate_vpa, VpaError};

#[cfg(feature = "qr")]
pub use upi_qrcode::{EncodeError, QrCode, SvgOptions};

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use core::fmt;

#[cfg(feature = "parse")]
use url::Url;

/// Currency of every payment unless told otherwise.
pub const DEFAULT_CURRENCY: &str = "INR";

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// PaymentRequest holds everything a payer's app needs to prefill a UPI payment.
/// Only [payee_address](struct.PaymentRequest.html#structfield.payee_address) is mandatory
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct PaymentRequest {
    /// Virtual Payment Address of the payee, `localpart@handle`. Not validated here, see [validate_vpa]
    pub payee_address: String,
    /// Name shown to the payer next to the address
    pub payee_name: Option<String>,
    /// Amount in the major unit of [currency](struct.PaymentRequest.html#structfield.currency).
    /// Left out of the link when absent, zero, negative or not finite, so the payer types it in
    pub amount: Option<f64>,
    #[cfg_attr(feature = "serde_support", serde(default = "default_currency"))]
    pub currency: String,
    /// Free text shown to the payer, the transaction note
    pub note: Option<String>,
    /// Merchant category code, four digits for registered merchants
    pub merchant_code: Option<String>,
    /// Transaction reference, see [ReferenceSource]
    pub reference: Option<String>,
}

impl fmt::Display for PaymentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "payee: <{}>({}); amount: {} {}",
            self.payee_name.as_deref().unwrap_or("None"),
            self.payee_address,
            self.payable_amount()
                .map(|a| format!("{:.2}", a))
                .unwrap_or_else(|| "open".to_string()),
            self.currency,
        )
    }
}

/// `Some` for non-empty strings only.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl PaymentRequest {
    /// Will create a payment request to `payee_address` in [DEFAULT_CURRENCY], with no amount
    ///
    /// ```rust
    /// use upi_qr::PaymentRequest;
    /// let request = PaymentRequest::new("merchant@upi".to_string());
    /// assert_eq!(request.get_url(), "upi://pay?pa=merchant%40upi&cu=INR");
    /// ```
    pub fn new(payee_address: String) -> PaymentRequest {
        PaymentRequest {
            payee_address,
            payee_name: None,
            amount: None,
            currency: default_currency(),
            note: None,
            merchant_code: None,
            reference: None,
        }
    }

    /// Set the `payee_name`
    pub fn payee_name(&mut self, value: String) {
        self.payee_name = Some(value);
    }

    /// Set the `amount`
    pub fn amount(&mut self, value: f64) {
        self.amount = Some(value);
    }

    /// Set the `currency`
    pub fn currency(&mut self, value: String) {
        self.currency = value;
    }

    /// Set the `note`
    pub fn note(&mut self, value: String) {
        self.note = Some(value);
    }

    /// Set the `merchant_code`
    pub fn merchant_code(&mut self, value: String) {
        self.merchant_code = Some(value);
    }

    /// Set the `reference`
    pub fn reference(&mut self, value: String) {
        self.reference = Some(value);
    }

    /// Set the `reference` to the next one `source` hands out
    pub fn assign_reference<R: ReferenceSource>(&mut self, source: &mut R) {
        self.reference = Some(source.next_reference());
    }

    /// The amount as it appears in the link, if it does
    pub fn payable_amount(&self) -> Option<f64> {
        self.amount.filter(|a| a.is_finite() && *a > 0.0)
    }

    /// Will generate the standard UPI deep link, usually shown as a QR code
    ///
    /// Keys come in a fixed order: `pa`, `pn`, `am`, `cu`, `tn`, `mc`, `tr`.
    /// Values are URL-encoded, except the currency and the amount, which is written with two decimals.
    /// Missing or empty fields are left out, the currency never is.
    pub fn get_url(&self) -> String {
        let mut url = format!(
            "upi://pay?pa={}",
            urlencoding::encode(self.payee_address.as_str())
        );
        if let Some(name) = non_empty(&self.payee_name) {
            url.push_str(&format!("&pn={}", urlencoding::encode(name)));
        }
        if let Some(amount) = self.payable_amount() {
            url.push_str(&format!("&am={:.2}", amount));
        }
        url.push_str(&format!("&cu={}", self.currency));
        if let Some(note) = non_empty(&self.note) {
            url.push_str(&format!("&tn={}", urlencoding::encode(note)));
        }
        if let Some(code) = non_empty(&self.merchant_code) {
            url.push_str(&format!("&mc={}", urlencoding::encode(code)));
        }
        if let Some(reference) = non_empty(&self.reference) {
            url.push_str(&format!("&tr={}", urlencoding::encode(reference)));
        }
        url
    }

    /// Read a payment request back from a `upi://pay` link
    ///
    /// Values are form-decoded, so `+` reads as a space.
    /// Unknown parameters are ignored, a missing `cu` means [DEFAULT_CURRENCY].
    ///
    /// # Errors
    ///
    /// Will return an error when the link is not a `upi://pay` URL, has no `pa` parameter,
    /// or an amount that is not a finite number
    #[cfg(feature = "parse")]
    pub fn from_url<S: AsRef<str>>(url: S) -> Result<PaymentRequest, UpiUrlError> {
        let url = Url::parse(url.as_ref()).map_err(UpiUrlError::Url)?;
        if url.scheme() != "upi" {
            return Err(UpiUrlError::Scheme(url.scheme().to_string()));
        }
        if url.host_str() != Some("pay") {
            return Err(UpiUrlError::Host(url.host_str().unwrap_or("").to_string()));
        }

        let mut payee_address = None;
        let mut request = PaymentRequest::new(String::new());

        for (key, value) in url.query_pairs() {
            let value = value.into_owned();
            match key.as_ref() {
                "pa" => payee_address = Some(value),
                "pn" => request.payee_name = Some(value),
                "am" => {
                    request.amount = Some(
                        value
                            .parse::<f64>()
                            .ok()
                            .filter(|a| a.is_finite())
                            .ok_or_else(|| UpiUrlError::Amount(value.to_string()))?,
                    );
                }
                "cu" => request.currency = value,
                "tn" => request.note = Some(value),
                "mc" => request.merchant_code = Some(value),
                "tr" => request.reference = Some(value),
                _ => {}
            }
        }

        request.payee_address = payee_address
            .filter(|pa| !pa.is_empty())
            .ok_or(UpiUrlError::PayeeAddress)?;
        Ok(request)
    }

    /// Will return the payment link as a QR code, in the form of a `data:image/svg+xml;base64,` URI
    /// which can be used as an HTML image source without storing a file. Needs feature `qr` to be enabled!
    ///
    /// # Errors
    ///
    /// This will return an error in case the link gets longer than 213 bytes, the most a version 10-M QR code holds
    #[cfg(feature = "qr")]
    pub fn get_qr(&self) -> Result<String, EncodeError> {
        let url = self.get_url();
        tracing::debug!(len = url.len(), "encoding payment link as QR code");
        upi_qrcode::draw_data_uri(&url)
    }

    /// Will return the payment link as a base64-encoded PNG QR code. Needs feature `png` to be enabled!
    ///
    /// # Errors
    ///
    /// Same as [get_qr](struct.PaymentRequest.html#method.get_qr), and in case the image library fails to encode the PNG
    #[cfg(feature = "png")]
    pub fn get_qr_png(&self) -> Result<String, EncodeError> {
        upi_qrcode::draw_base64(&self.get_url())
    }
}

/// Encodes `request` as a QR code and returns it as an SVG data URI.
///
/// The payee address is taken as is, call [validate_vpa] first on user input.
///
/// # Errors
///
/// [EncodeError::PayloadTooLarge] when the link does not fit in a version 10 QR code.
#[cfg(feature = "qr")]
pub fn encode(request: &PaymentRequest) -> Result<String, EncodeError> {
    request.get_qr()
}
