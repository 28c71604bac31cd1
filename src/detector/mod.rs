//! Symbol detection modules
//!
//! This module contains the logic that locates a symbol in a photograph:
//! - Connected-component labelling of the marker-color mask
//! - Circular fiducial detection (the three blue disks)
//! - Role assignment and affine rectification onto the canonical frame

/// Union-find labelling of binary masks
pub mod connected_components;
/// Circular fiducial detection by color and shape
pub mod marker;
/// Marker role assignment and canonical-frame warping
pub mod rectify;
