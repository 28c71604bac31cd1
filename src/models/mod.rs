pub mod color;
pub mod grid;
pub mod marker;
pub mod point;

pub use color::PixelColor;
pub use marker::{Marker, RoleAssignment};
pub use point::Point;
