//! QR encoding for the order confirmation service.
//!
//! Pure transformation from text content to a PNG image payload. The
//! encoder is stateless and has no awareness of orders; callers hand it
//! the confirmation URL and get raw image bytes back. Any transport
//! encoding needed for embedding the image in JSON (base64) is the
//! caller's concern.

use image::{ImageFormat, Rgba, RgbaImage};
use order_types::{ErrorCorrection, QrOptions};
use qrcode::types::QrError;
use qrcode::{Color, EcLevel, QrCode};
use std::io::Cursor;
use thiserror::Error;

/// Errors that can occur while encoding content into a QR image.
#[derive(Debug, Error)]
pub enum EncodeError {
	/// Content exceeds the maximum symbol capacity for the chosen
	/// error correction level.
	#[error("Content exceeds the QR symbol capacity")]
	CapacityExceeded,
	/// Symbol construction failed.
	#[error("QR construction error: {0}")]
	Qr(String),
	/// PNG rasterization failed.
	#[error("Image encoding error: {0}")]
	Image(#[from] image::ImageError),
}

impl From<QrError> for EncodeError {
	fn from(err: QrError) -> Self {
		match err {
			QrError::DataTooLong => EncodeError::CapacityExceeded,
			other => EncodeError::Qr(format!("{:?}", other)),
		}
	}
}

/// Encodes text content into PNG images with fixed rasterization options.
pub struct QrEncoder {
	options: QrOptions,
}

impl QrEncoder {
	/// Creates an encoder with the given rasterization options.
	pub fn new(options: QrOptions) -> Self {
		Self { options }
	}

	/// Encodes `content` into a PNG image.
	///
	/// Fails when the content does not fit the symbol at the configured
	/// error correction level, or when rasterization fails. Failures
	/// are always reported, never silently degraded.
	pub fn encode(&self, content: &str) -> Result<Vec<u8>, EncodeError> {
		let code = QrCode::with_error_correction_level(
			content.as_bytes(),
			ec_level(self.options.error_correction),
		)?;

		let image = rasterize(&code, &self.options);

		let mut bytes = Vec::new();
		image::DynamicImage::ImageRgba8(image)
			.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
		Ok(bytes)
	}
}

impl Default for QrEncoder {
	fn default() -> Self {
		Self::new(QrOptions::default())
	}
}

fn ec_level(level: ErrorCorrection) -> EcLevel {
	match level {
		ErrorCorrection::Low => EcLevel::L,
		ErrorCorrection::Medium => EcLevel::M,
		ErrorCorrection::Quartile => EcLevel::Q,
		ErrorCorrection::High => EcLevel::H,
	}
}

/// Renders the module matrix into an RGBA buffer, surrounded by a
/// quiet zone of `margin` background modules.
fn rasterize(code: &QrCode, options: &QrOptions) -> RgbaImage {
	let width = code.width() as u32;
	let side = (width + 2 * options.margin) * options.scale;

	let dark = Rgba(options.dark);
	let light = Rgba(options.light);
	let mut image = RgbaImage::from_pixel(side, side, light);

	let modules = code.to_colors();
	for y in 0..width {
		for x in 0..width {
			if modules[(y * width + x) as usize] == Color::Dark {
				let origin_x = (x + options.margin) * options.scale;
				let origin_y = (y + options.margin) * options.scale;
				for dy in 0..options.scale {
					for dx in 0..options.scale {
						image.put_pixel(origin_x + dx, origin_y + dy, dark);
					}
				}
			}
		}
	}

	image
}

#[cfg(test)]
mod tests {
	use super::*;

	const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

	#[test]
	fn test_encode_produces_png_bytes() {
		let encoder = QrEncoder::default();
		let bytes = encoder
			.encode("http://localhost:3000/orders/abc/confirm")
			.unwrap();

		assert!(bytes.len() > PNG_MAGIC.len());
		assert_eq!(&bytes[..8], &PNG_MAGIC);
	}

	#[test]
	fn test_oversized_content_is_rejected() {
		let encoder = QrEncoder::default();
		// Version 40 at medium correction tops out well below this.
		let content = "x".repeat(3000);

		let result = encoder.encode(&content);
		assert!(matches!(result, Err(EncodeError::CapacityExceeded)));
	}

	#[test]
	fn test_higher_correction_needs_a_larger_symbol() {
		let content = "http://localhost:3000/orders/6f9619ff-8b86-4011-b42d-00cf4fc964ff/confirm";
		let low = QrCode::with_error_correction_level(content.as_bytes(), EcLevel::L).unwrap();
		let high = QrCode::with_error_correction_level(content.as_bytes(), EcLevel::H).unwrap();

		assert!(high.width() >= low.width());
	}

	#[test]
	fn test_margin_and_scale_control_image_dimensions() {
		let code = QrCode::with_error_correction_level(b"content", EcLevel::M).unwrap();
		let options = QrOptions {
			margin: 4,
			scale: 2,
			..QrOptions::default()
		};

		let image = rasterize(&code, &options);
		let expected = (code.width() as u32 + 2 * options.margin) * options.scale;
		assert_eq!(image.width(), expected);
		assert_eq!(image.height(), expected);
	}

	#[test]
	fn test_quiet_zone_uses_background_color() {
		let code = QrCode::with_error_correction_level(b"content", EcLevel::M).unwrap();
		let options = QrOptions::default();

		let image = rasterize(&code, &options);
		// The top-left corner lies inside the quiet zone.
		assert_eq!(image.get_pixel(0, 0), &Rgba(options.light));
	}
}
