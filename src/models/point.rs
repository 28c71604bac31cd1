/// 2D point with floating point coordinates
///
/// Image-space points use the continuous pixel convention: pixel `(i, j)`
/// covers `[i, i + 1) x [j, j + 1)`, so its center is `(i + 0.5, j + 0.5)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Center of the pixel at integer coordinates `(x, y)`
    pub fn pixel_center(x: u32, y: u32) -> Self {
        Self {
            x: x as f32 + 0.5,
            y: y as f32 + 0.5,
        }
    }

    /// Calculate distance to another point
    pub fn distance(&self, other: &Point) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Calculate squared distance (faster, no sqrt)
    pub fn distance_squared(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Translate point by (dx, dy)
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}
