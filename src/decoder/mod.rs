//! Symbol decoding modules
//!
//! This module contains the stages that run once the symbol is rectified:
//! - Grid sampling (one color per data cell, row-major)
//! - Palette quantization (color -> 3-bit code)
//! - Bit assembly (code pairs -> 6-bit codewords -> characters)

/// Code pairing and character lookup
pub mod bitstream;
/// The 8-color palette and nearest-color matching
pub mod palette;
/// Data-cell sampling over the rectified frame
pub mod sampler;
/// The 64-character code table
pub mod tables;
