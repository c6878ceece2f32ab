//! QR Code encoder for short payloads such as payment links, and utility
//! functions drawing the symbol to SVG or, with the `png` feature, to a
//! canvas provided by the `image` crate.
//!
//! The encoder covers a deliberately small part of the standard: byte mode,
//! error correction level M, versions 1 to 10 (at most 213 bytes) and mask
//! pattern 0. Everything else, Reed-Solomon included, is done in this crate.
//!
//! ```rust
//! let qr = upi_qrcode::QrCode::encode_text("upi://pay?pa=merchant%40upi&cu=INR").unwrap();
//! assert_eq!(qr.version().value(), 3);
//! assert_eq!(qr.size(), 29);
//!
//! let svg = upi_qrcode::to_svg_string(&qr, &upi_qrcode::SvgOptions::default());
//! assert!(svg.starts_with("<svg"));
//! ```
mod bits;
mod error;
mod gf256;
mod mask;
mod matrix;
mod placement;
mod version;

pub use error::EncodeError;
pub use gf256::Gf256;
pub use matrix::{Matrix, Module};
pub use version::{BlockSpec, Version};

#[cfg(feature = "png")]
pub use image;

#[cfg(feature = "png")]
use image::Luma;

/// A finished QR Code symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCode {
    matrix: Matrix,
}

impl QrCode {
    /// Encodes the UTF-8 bytes of `text` in byte mode.
    ///
    /// # Errors
    ///
    /// Returns [EncodeError::PayloadTooLarge] for more than 213 bytes.
    pub fn encode_text(text: &str) -> Result<QrCode, EncodeError> {
        QrCode::encode_binary(text.as_bytes())
    }

    /// Encodes arbitrary bytes in byte mode, picking the smallest version
    /// that holds them.
    ///
    /// # Errors
    ///
    /// Returns [EncodeError::PayloadTooLarge] for more than 213 bytes.
    pub fn encode_binary(payload: &[u8]) -> Result<QrCode, EncodeError> {
        let version = Version::for_payload(payload.len())?;
        let codewords = bits::encode_codewords(payload, version);

        let mut matrix = Matrix::function_patterns(version);
        placement::place_data(&mut matrix, &codewords);
        mask::apply_mask(&mut matrix);
        mask::write_format(&mut matrix);
        mask::write_version_info(&mut matrix);
        debug_assert_eq!(matrix.unset_count(), 0);

        Ok(QrCode { matrix })
    }

    pub fn version(&self) -> Version {
        self.matrix.version()
    }

    /// Width and height in modules, `version * 4 + 17`.
    pub fn size(&self) -> usize {
        self.matrix.size()
    }

    /// Color of the module at column `x`, row `y`. `true` is dark.
    /// Out of bounds coordinates are light, like the quiet zone.
    pub fn get_module(&self, x: usize, y: usize) -> bool {
        x < self.size() && y < self.size() && self.matrix.get(y, x).is_dark()
    }

    /// The underlying grid, with the role of every cell.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }
}

/// How [to_svg_string] lays the symbol out.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SvgOptions {
    /// Side of one module, in pixels.
    pub module_size: usize,
    /// Light border around the symbol, in modules. Some readers need at least 4.
    pub quiet_zone: usize,
}

impl Default for SvgOptions {
    fn default() -> Self {
        SvgOptions {
            module_size: 8,
            quiet_zone: 4,
        }
    }
}

impl SvgOptions {
    /// Side of the rendered image in pixels.
    pub fn image_size(&self, qr: &QrCode) -> usize {
        (qr.size() + 2 * self.quiet_zone) * self.module_size
    }
}

/// Draw a QR code to an SVG document: a white background and a single black
/// path made of one square per dark module.
pub fn to_svg_string(qr: &QrCode, options: &SvgOptions) -> String {
    let m = options.module_size;
    let image_size = options.image_size(qr);
    let mut path = String::new();
    for y in 0..qr.size() {
        for x in 0..qr.size() {
            if qr.get_module(x, y) {
                let px = (x + options.quiet_zone) * m;
                let py = (y + options.quiet_zone) * m;
                path += &format!("M{},{}h{}v{}h-{}z", px, py, m, m, m);
            }
        }
    }
    tracing::trace!(image_size, path_len = path.len(), "rendered QR code to SVG");

    format!(
        concat!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{0}\" height=\"{0}\" ",
            "viewBox=\"0 0 {0} {0}\" shape-rendering=\"crispEdges\">",
            "<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>",
            "<path d=\"{1}\" fill=\"#000000\"/>",
            "</svg>"
        ),
        image_size, path
    )
}

/// Draw text to an SVG QR code with the default [SvgOptions].
///
/// # Errors
///
/// This will return an error in case the text is longer than 213 bytes, the
/// capacity of the largest supported version.
pub fn draw_svg(text: &str) -> Result<String, EncodeError> {
    let qr = QrCode::encode_text(text)?;
    Ok(to_svg_string(&qr, &SvgOptions::default()))
}

/// Draw text to a QR code returned as a `data:image/svg+xml;base64,` URI,
/// which can be used as an image source without storing a file.
///
/// # Errors
///
/// This will return an error in case the text is longer than 213 bytes, the
/// capacity of the largest supported version.
#[cfg(feature = "base64")]
pub fn draw_data_uri(text: &str) -> Result<String, EncodeError> {
    use base64::{engine::general_purpose, Engine as _};
    let svg = draw_svg(text)?;
    Ok(format!(
        "data:image/svg+xml;base64,{}",
        general_purpose::STANDARD.encode(svg)
    ))
}

/// Draw a QR code to an image buffer, with the default [SvgOptions] layout.
#[cfg(feature = "png")]
pub fn draw_canvas(qr: &QrCode) -> image::ImageBuffer<Luma<u8>, Vec<u8>> {
    let options = SvgOptions::default();
    let m = options.module_size as u32;
    let border = options.quiet_zone as u32 * m;
    let image_size = options.image_size(qr) as u32;
    let mut canvas = image::GrayImage::from_pixel(image_size, image_size, Luma([255]));

    for y_qr in 0..qr.size() as u32 {
        for x_qr in 0..qr.size() as u32 {
            if !qr.get_module(x_qr as usize, y_qr as usize) {
                continue;
            }
            let x_start = x_qr * m + border;
            let y_start = y_qr * m + border;
            for x_img in x_start..x_start + m {
                for y_img in y_start..y_start + m {
                    canvas.put_pixel(x_img, y_img, Luma([0]));
                }
            }
        }
    }
    canvas
}

/// Draw text to a PNG QR code.
///
/// # Errors
///
/// This will return an error in case the text does not fit in a version 10
/// QR code, or if the image library fails to encode the canvas.
#[cfg(feature = "png")]
pub fn draw_png(text: &str) -> Result<Vec<u8>, EncodeError> {
    use image::ImageEncoder;

    let qr = QrCode::encode_text(text)?;
    let canvas = draw_canvas(&qr);
    let (width, height) = canvas.dimensions();

    let mut vec = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut vec);
    encoder
        .write_image(&canvas.into_raw(), width, height, image::ColorType::L8)
        .map_err(|err| EncodeError::Png(err.to_string()))?;
    Ok(vec)
}

/// Draw text to a Base64-encoded PNG QR code.
///
/// # Errors
///
/// Same as [draw_png].
#[cfg(all(feature = "png", feature = "base64"))]
pub fn draw_base64(text: &str) -> Result<String, EncodeError> {
    use base64::{engine::general_purpose, Engine as _};
    draw_png(text).map(|vec| general_purpose::STANDARD.encode(vec))
}
