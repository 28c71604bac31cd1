/// Point sampling of the data cells of a rectified symbol
use crate::error::DecodeError;
use crate::models::grid::{CANONICAL_CELL_PX, CANONICAL_PADDING, GRID_SIZE, data_cells};
use crate::models::{PixelColor, Point};
use image::RgbImage;
use tracing::debug;

/// Squared distance from white above which a pixel counts as symbol content
const CONTENT_THRESHOLD: u64 = 60 * 60;

/// Placement of the grid inside an image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridRegion {
    /// Top-left corner of cell (0, 0)
    pub origin: Point,
    /// Cell width in pixels
    pub cell_width: f32,
    /// Cell height in pixels
    pub cell_height: f32,
}

impl GridRegion {
    /// Grid placement in the canonical frame
    pub fn canonical() -> Self {
        Self {
            origin: Point::new(CANONICAL_PADDING as f32, CANONICAL_PADDING as f32),
            cell_width: CANONICAL_CELL_PX as f32,
            cell_height: CANONICAL_CELL_PX as f32,
        }
    }

    /// Grid placement derived from the tight box around non-white pixels
    pub fn from_content(image: &RgbImage) -> Result<Self, DecodeError> {
        let (min_x, min_y, max_x, max_y) =
            content_bounds(image).ok_or(DecodeError::EmptyRegion)?;
        let width = (max_x - min_x + 1) as f32;
        let height = (max_y - min_y + 1) as f32;
        let region = Self {
            origin: Point::new(min_x as f32, min_y as f32),
            cell_width: width / GRID_SIZE as f32,
            cell_height: height / GRID_SIZE as f32,
        };
        debug!(
            min_x,
            min_y,
            max_x,
            max_y,
            cell_width = region.cell_width,
            cell_height = region.cell_height,
            "content region"
        );
        Ok(region)
    }

    /// Midpoint of the cell at (row, col)
    pub fn cell_center(&self, row: usize, col: usize) -> Point {
        Point::new(
            self.origin.x + (col as f32 + 0.5) * self.cell_width,
            self.origin.y + (row as f32 + 0.5) * self.cell_height,
        )
    }
}

/// Inclusive bounding box (min_x, min_y, max_x, max_y) of pixels that are
/// not near-white, or `None` if there are none
pub fn content_bounds(image: &RgbImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, px) in image.enumerate_pixels() {
        if PixelColor::from(px).distance_squared(&PixelColor::WHITE) <= CONTENT_THRESHOLD {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    bounds
}

/// Color of the pixel containing point `p`, clamped to the image
fn sample_point(image: &RgbImage, p: Point) -> PixelColor {
    let max_x = image.width().saturating_sub(1) as f32;
    let max_y = image.height().saturating_sub(1) as f32;
    let x = p.x.floor().clamp(0.0, max_x) as u32;
    let y = p.y.floor().clamp(0.0, max_y) as u32;
    PixelColor::from(image.get_pixel(x, y))
}

/// Sample every data cell in row-major order, skipping marker zones
pub fn sample_cells(image: &RgbImage, region: &GridRegion) -> Vec<PixelColor> {
    if image.width() == 0 || image.height() == 0 {
        return Vec::new();
    }
    data_cells()
        .map(|(row, col)| sample_point(image, region.cell_center(row, col)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grid::{CANONICAL_SIZE, DATA_CELLS};
    use image::Rgb;

    #[test]
    fn test_canonical_cell_centers() {
        let region = GridRegion::canonical();
        assert_eq!(region.cell_center(0, 0), Point::new(25.0, 25.0));
        assert_eq!(region.cell_center(46, 6), Point::new(85.0, 485.0));
    }

    #[test]
    fn test_sample_order_and_count() {
        let mut img = RgbImage::from_pixel(CANONICAL_SIZE, CANONICAL_SIZE, Rgb([0, 0, 0]));
        // Paint cell (0, 6), the first data cell, red and (0, 7) green
        for y in 20..30 {
            for x in 80..90 {
                img.put_pixel(x, y, Rgb([255, 0, 0]));
            }
            for x in 90..100 {
                img.put_pixel(x, y, Rgb([0, 255, 0]));
            }
        }
        let samples = sample_cells(&img, &GridRegion::canonical());
        assert_eq!(samples.len(), DATA_CELLS);
        assert_eq!(samples[0], PixelColor::new(255, 0, 0));
        assert_eq!(samples[1], PixelColor::new(0, 255, 0));
        assert_eq!(samples[2], PixelColor::BLACK);
    }

    #[test]
    fn test_content_region() {
        let mut img = RgbImage::from_pixel(200, 150, Rgb([255, 255, 255]));
        for y in 30..124 {
            for x in 40..134 {
                img.put_pixel(x, y, Rgb([0, 0, 0]));
            }
        }
        let region = GridRegion::from_content(&img).unwrap();
        assert_eq!(region.origin, Point::new(40.0, 30.0));
        assert!((region.cell_width - 2.0).abs() < 1e-6);
        assert!((region.cell_height - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_blank_image_is_empty_region() {
        let img = RgbImage::from_pixel(50, 50, Rgb([250, 252, 255]));
        assert_eq!(GridRegion::from_content(&img), Err(DecodeError::EmptyRegion));
    }

    #[test]
    fn test_sample_point_clamps() {
        let img = RgbImage::from_pixel(4, 4, Rgb([9, 9, 9]));
        assert_eq!(sample_point(&img, Point::new(-3.0, 99.0)), PixelColor::new(9, 9, 9));
    }
}
