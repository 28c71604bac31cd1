//! Image-processing helpers used by the decode pipeline
//!
//! - Color-similarity masks with blur-based denoising
//! - Affine transforms solved from point correspondences
//! - Affine warping with bilinear sampling

pub mod geometry;
pub mod mask;
pub mod warp;
