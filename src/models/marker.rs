use crate::models::Point;

/// A detected circular fiducial
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    /// Center in image coordinates
    pub center: Point,
    /// Equivalent radius in pixels
    pub radius: f32,
}

impl Marker {
    /// Create a new marker
    pub fn new(center: Point, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Geometric roles of the three marker centers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleAssignment {
    /// Vertex of the right angle (the bottom-left marker)
    pub right_angle: Point,
    /// Top-left marker
    pub top_left: Point,
    /// Bottom-right marker
    pub bottom_right: Point,
}
