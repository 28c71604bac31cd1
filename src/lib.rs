//! chromagrid - decoder for 8-color grid barcodes
//!
//! A symbol is a 47x47 grid of colored cells. Three blue circular fiducials
//! sit in 6x6-cell zones at the top-left, bottom-left and bottom-right
//! corners. Every other cell holds one of eight colors (3 bits); consecutive
//! cell pairs form 6-bit codewords that index a fixed 64-character table.
//!
//! ```
//! let symbol = chromagrid::encoder::render_symbol("hello world", 10, 20).unwrap();
//! let text = chromagrid::decode(&symbol).unwrap();
//! assert_eq!(text.trim_end(), "hello world");
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Detection tuning (marker detector, quantizer weights)
pub mod config;
/// Sampling, quantization and bit assembly
pub mod decoder;
/// Marker detection and rectification
pub mod detector;
/// Text to cells and cells to pixels
pub mod encoder;
/// Error types
pub mod error;
/// Core data structures (PixelColor, Point, Marker, grid format)
pub mod models;
/// Staged decode pipeline
pub mod pipeline;
/// File loading helpers for the command-line tool
pub mod tools;
/// Image-processing helpers (masks, affine geometry, warping)
pub mod utils;

pub use config::{DecoderConfig, MarkerDetectorConfig};
pub use error::{DecodeError, EncodeError};
pub use models::{Marker, PixelColor, Point, RoleAssignment};
pub use pipeline::DecodeReport;

use image::RgbImage;
use rayon::prelude::*;

/// Decode a photographed symbol with the default configuration
///
/// Returns every character the symbol holds, including the trailing space
/// padding of short messages.
pub fn decode(image: &RgbImage) -> Result<String, DecodeError> {
    Decoder::new().decode(image)
}

/// Decode an axis-aligned symbol without marker detection
pub fn decode_aligned(image: &RgbImage) -> Result<String, DecodeError> {
    Decoder::new().decode_aligned(image)
}

/// Decode raw RGB bytes (3 bytes per pixel, row-major)
pub fn decode_rgb(pixels: &[u8], width: usize, height: usize) -> Result<String, DecodeError> {
    Decoder::new().decode_rgb(pixels, width, height)
}

/// Decoder with configuration options
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    /// Create a decoder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with explicit settings
    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Settings in use
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode a photographed symbol
    pub fn decode(&self, image: &RgbImage) -> Result<String, DecodeError> {
        self.inspect(image).map(|report| report.text)
    }

    /// Decode and keep intermediate results (markers, roles, grid placement)
    pub fn inspect(&self, image: &RgbImage) -> Result<DecodeReport, DecodeError> {
        pipeline::run(image, &self.config)
    }

    /// Decode an axis-aligned symbol; the grid is located from its content box
    pub fn decode_aligned(&self, image: &RgbImage) -> Result<String, DecodeError> {
        pipeline::run_aligned(image, &self.config).map(|report| report.text)
    }

    /// Decode raw RGB bytes (3 bytes per pixel, row-major)
    pub fn decode_rgb(
        &self,
        pixels: &[u8],
        width: usize,
        height: usize,
    ) -> Result<String, DecodeError> {
        let size_error = |expected| DecodeError::BufferSize {
            expected,
            actual: pixels.len(),
        };
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(3))
            .ok_or(size_error(usize::MAX))?;
        if pixels.len() != expected {
            return Err(size_error(expected));
        }
        let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
            return Err(size_error(expected));
        };
        let image = RgbImage::from_raw(w, h, pixels.to_vec()).ok_or(size_error(expected))?;
        self.decode(&image)
    }

    /// Decode independent images in parallel; results keep input order
    pub fn decode_batch(&self, images: &[RgbImage]) -> Vec<Result<String, DecodeError>> {
        images.par_iter().map(|image| self.decode(image)).collect()
    }
}
