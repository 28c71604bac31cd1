/// Rasterization of cell codes into a symbol image
use crate::decoder::palette::color_for_code;
use crate::encoder::encode_cells;
use crate::error::EncodeError;
use crate::models::grid::{GRID_SIZE, MARKER_RADIUS_CELLS, MARKER_ZONE, MarkerZone, data_cells};
use crate::models::{PixelColor, Point};
use image::RgbImage;

/// Color of the fiducial disks
pub const MARKER_COLOR: PixelColor = PixelColor::BLUE;

/// Fill behind the fiducial disks, covering the whole marker zone
pub const MARKER_ZONE_FILL: PixelColor = PixelColor::BLACK;

/// Render `text` as a symbol with `cell_px` pixels per cell and a white
/// margin of `padding` pixels
pub fn render_symbol(text: &str, cell_px: u32, padding: u32) -> Result<RgbImage, EncodeError> {
    let codes = encode_cells(text)?;
    Ok(render_codes(&codes, cell_px, padding))
}

/// Render one 3-bit code per data cell (row-major); missing codes render black
pub fn render_codes(codes: &[u8], cell_px: u32, padding: u32) -> RgbImage {
    let cell_px = cell_px.max(1);
    let side = GRID_SIZE as u32 * cell_px + 2 * padding;
    let mut img = RgbImage::from_pixel(side, side, PixelColor::WHITE.into());

    let mut codes = codes.iter().copied();
    for (row, col) in data_cells() {
        let color = color_for_code(codes.next().unwrap_or(0));
        fill_cell(&mut img, row, col, cell_px, padding, color);
    }

    let origin = Point::new(padding as f32, padding as f32);
    let radius = MARKER_RADIUS_CELLS * cell_px as f32;
    for zone in MarkerZone::ALL {
        let (row0, col0) = zone.origin();
        for row in row0..row0 + MARKER_ZONE {
            for col in col0..col0 + MARKER_ZONE {
                fill_cell(&mut img, row, col, cell_px, padding, MARKER_ZONE_FILL);
            }
        }
        draw_disk(&mut img, zone.center_in(origin, cell_px as f32), radius, MARKER_COLOR);
    }

    img
}

fn fill_cell(
    img: &mut RgbImage,
    row: usize,
    col: usize,
    cell_px: u32,
    padding: u32,
    color: PixelColor,
) {
    let x0 = padding + col as u32 * cell_px;
    let y0 = padding + row as u32 * cell_px;
    for y in y0..y0 + cell_px {
        for x in x0..x0 + cell_px {
            img.put_pixel(x, y, color.into());
        }
    }
}

fn draw_disk(img: &mut RgbImage, center: Point, radius: f32, color: PixelColor) {
    let x_lo = (center.x - radius).floor().max(0.0) as u32;
    let y_lo = (center.y - radius).floor().max(0.0) as u32;
    let x_hi = ((center.x + radius).ceil() as u32).min(img.width());
    let y_hi = ((center.y + radius).ceil() as u32).min(img.height());
    let r2 = radius * radius;
    for y in y_lo..y_hi {
        for x in x_lo..x_hi {
            if Point::pixel_center(x, y).distance_squared(&center) <= r2 {
                img.put_pixel(x, y, color.into());
            }
        }
    }
}
