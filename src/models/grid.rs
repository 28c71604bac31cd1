//! Fixed symbol format: grid dimensions, marker zones and canonical frame geometry

use crate::models::Point;

/// Cells per side of the grid
pub const GRID_SIZE: usize = 47;
/// Cells per side of each square marker zone
pub const MARKER_ZONE: usize = 6;
/// Number of data-bearing cells (47² − 3·36)
pub const DATA_CELLS: usize = GRID_SIZE * GRID_SIZE - 3 * MARKER_ZONE * MARKER_ZONE;
/// Characters a symbol can hold (two cells per character)
pub const CAPACITY: usize = DATA_CELLS / 2;

/// Marker disk radius, in cells
pub const MARKER_RADIUS_CELLS: f32 = 2.5;

/// Side of one cell in the canonical frame, in pixels
pub const CANONICAL_CELL_PX: u32 = 10;
/// White margin around the grid in the canonical frame, in pixels
pub const CANONICAL_PADDING: u32 = 20;
/// Side of the canonical frame, in pixels
pub const CANONICAL_SIZE: u32 = GRID_SIZE as u32 * CANONICAL_CELL_PX + 2 * CANONICAL_PADDING;

/// The three grid corners reserved for fiducials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerZone {
    /// Rows < M, cols < M
    TopLeft,
    /// Rows >= N − M, cols < M
    BottomLeft,
    /// Rows >= N − M, cols >= N − M
    BottomRight,
}

impl MarkerZone {
    /// All zones, in anchor order (top-left, bottom-left, bottom-right)
    pub const ALL: [MarkerZone; 3] = [
        MarkerZone::TopLeft,
        MarkerZone::BottomLeft,
        MarkerZone::BottomRight,
    ];

    /// Zone containing the cell at `(row, col)`, if any
    pub fn containing(row: usize, col: usize) -> Option<MarkerZone> {
        let far = GRID_SIZE - MARKER_ZONE;
        match (row < MARKER_ZONE, row >= far, col < MARKER_ZONE, col >= far) {
            (true, _, true, _) => Some(MarkerZone::TopLeft),
            (_, true, true, _) => Some(MarkerZone::BottomLeft),
            (_, true, _, true) => Some(MarkerZone::BottomRight),
            _ => None,
        }
    }

    /// First (row, col) covered by the zone
    pub fn origin(&self) -> (usize, usize) {
        let far = GRID_SIZE - MARKER_ZONE;
        match self {
            MarkerZone::TopLeft => (0, 0),
            MarkerZone::BottomLeft => (far, 0),
            MarkerZone::BottomRight => (far, far),
        }
    }

    /// Zone center in cell units, as (x, y)
    pub fn center_cells(&self) -> (f32, f32) {
        let (row, col) = self.origin();
        let half = MARKER_ZONE as f32 / 2.0;
        (col as f32 + half, row as f32 + half)
    }

    /// Zone center in a frame with the given cell size and grid origin
    pub fn center_in(&self, origin: Point, cell_px: f32) -> Point {
        let (cx, cy) = self.center_cells();
        Point::new(origin.x + cx * cell_px, origin.y + cy * cell_px)
    }
}

/// True when `(row, col)` lies inside one of the three marker zones
pub fn is_marker_zone(row: usize, col: usize) -> bool {
    MarkerZone::containing(row, col).is_some()
}

/// Data-bearing cells in row-major scan order, as (row, col)
pub fn data_cells() -> impl Iterator<Item = (usize, usize)> {
    (0..GRID_SIZE)
        .flat_map(|row| (0..GRID_SIZE).map(move |col| (row, col)))
        .filter(|&(row, col)| !is_marker_zone(row, col))
}

/// Marker centers in the canonical frame: top-left, bottom-left, bottom-right
pub fn canonical_anchors() -> [Point; 3] {
    let origin = Point::new(CANONICAL_PADDING as f32, CANONICAL_PADDING as f32);
    let cell = CANONICAL_CELL_PX as f32;
    MarkerZone::ALL.map(|zone| zone.center_in(origin, cell))
}
