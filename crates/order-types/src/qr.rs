//! QR rasterization option types.

use serde::{Deserialize, Serialize};

/// Error correction level of a generated symbol.
///
/// Higher levels add redundancy at the cost of symbol density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCorrection {
	/// Recovers up to ~7% of damaged data.
	Low,
	/// Recovers up to ~15% of damaged data.
	#[default]
	Medium,
	/// Recovers up to ~25% of damaged data.
	Quartile,
	/// Recovers up to ~30% of damaged data.
	High,
}

/// Options controlling how QR content is rendered into an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QrOptions {
	/// Error correction level.
	pub error_correction: ErrorCorrection,
	/// Quiet-zone width around the symbol, in modules.
	pub margin: u32,
	/// Rendered size of one module, in pixels.
	pub scale: u32,
	/// Foreground RGBA color.
	pub dark: [u8; 4],
	/// Background RGBA color.
	pub light: [u8; 4],
}

impl Default for QrOptions {
	fn default() -> Self {
		Self {
			error_correction: ErrorCorrection::Medium,
			margin: 2,
			scale: 8,
			dark: [0, 0, 0, 255],
			light: [255, 255, 255, 255],
		}
	}
}
