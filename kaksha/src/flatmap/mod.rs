//! Top-down raster of classified points.
//!
//! A fixed `columns × rows` grid of [`Color`] cells covering a fixed
//! physical extent centered on the room origin. Cell (0, 0) is the
//! extent's top-left corner: columns grow with +X, rows grow with -Y.
//!
//! ```text
//! column = trunc((W/2 + x) / W * columns)
//! row    = trunc((H/2 - y) / H * rows)
//! ```
//!
//! Truncation toward zero means a point less than one cell outside the
//! left or top edge still lands in column or row 0.
//!
//! The map is cleared at the start of every processed frame and the last
//! write to a cell wins.

mod shared;

pub use shared::{FlatMapReadGuard, SharedFlatMap};

use serde::{Deserialize, Serialize};

use crate::core::{Color, Point2D};

/// Physical area covered by the map, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapExtent {
    /// Width along X (m)
    pub width_m: f32,
    /// Height along Y (m)
    pub height_m: f32,
}

impl MapExtent {
    /// Create a new extent.
    pub fn new(width_m: f32, height_m: f32) -> Self {
        Self { width_m, height_m }
    }
}

impl Default for MapExtent {
    fn default() -> Self {
        Self::new(6.0, 6.0)
    }
}

/// Integer cell coordinates; may lie outside the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoord {
    /// Column (0 = left edge)
    pub column: i32,
    /// Row (0 = top edge)
    pub row: i32,
}

impl CellCoord {
    /// Create new cell coordinates.
    #[inline]
    pub fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }
}

/// Fixed-size top-down color raster.
#[derive(Debug, Clone)]
pub struct FlatMap {
    extent: MapExtent,
    columns: usize,
    rows: usize,
    /// Columns per meter
    column_scale: f32,
    /// Rows per meter
    row_scale: f32,
    cells: Vec<Color>,
    /// Bumped each time a frame finishes writing
    generation: u64,
    /// Timestamp of the frame that last finished writing
    updated_us: u64,
}

impl FlatMap {
    /// Create a transparent map.
    pub fn new(extent: MapExtent, columns: usize, rows: usize) -> Self {
        Self {
            extent,
            columns,
            rows,
            column_scale: columns as f32 / extent.width_m,
            row_scale: rows as f32 / extent.height_m,
            cells: vec![Color::TRANSPARENT; columns * rows],
            generation: 0,
            updated_us: 0,
        }
    }

    /// Physical extent.
    #[inline]
    pub fn extent(&self) -> MapExtent {
        self.extent
    }

    /// Grid dimensions (columns, rows).
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    /// Number of completed frame writes.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Timestamp of the last completed frame write.
    #[inline]
    pub fn updated_us(&self) -> u64 {
        self.updated_us
    }

    /// Reset every cell to transparent.
    pub fn clear(&mut self) {
        self.cells.fill(Color::TRANSPARENT);
    }

    /// Mark the current contents as a complete frame.
    pub fn mark_updated(&mut self, timestamp_us: u64) {
        self.generation += 1;
        self.updated_us = timestamp_us;
    }

    /// Convert a room-frame point to cell coordinates.
    ///
    /// Non-finite input saturates or maps to 0; callers that plot go
    /// through [`cell_index`](Self::cell_index), which rejects it first.
    #[inline]
    pub fn world_to_cell(&self, point: Point2D) -> CellCoord {
        let (width, height) = (self.extent.width_m, self.extent.height_m);
        let column = ((width / 2.0 + point.x) / width * self.columns as f32) as i32;
        let row = ((height / 2.0 - point.y) / height * self.rows as f32) as i32;
        CellCoord::new(column, row)
    }

    /// Physical center of a cell.
    #[inline]
    pub fn cell_to_world(&self, coord: CellCoord) -> Point2D {
        Point2D::new(
            (coord.column as f32 + 0.5) / self.column_scale - self.extent.width_m / 2.0,
            self.extent.height_m / 2.0 - (coord.row as f32 + 0.5) / self.row_scale,
        )
    }

    /// Check if cell coordinates are within bounds.
    #[inline]
    pub fn is_valid_cell(&self, coord: CellCoord) -> bool {
        coord.column >= 0
            && coord.row >= 0
            && (coord.column as usize) < self.columns
            && (coord.row as usize) < self.rows
    }

    /// Flat array index of the cell holding `point`, if on the map.
    #[inline]
    pub fn cell_index(&self, point: Point2D) -> Option<usize> {
        if !point.x.is_finite() || !point.y.is_finite() {
            return None;
        }
        let coord = self.world_to_cell(point);
        self.is_valid_cell(coord)
            .then(|| coord.row as usize * self.columns + coord.column as usize)
    }

    /// Write `color` into the cell holding `point`.
    ///
    /// Returns false (and writes nothing) when the point is off the map.
    #[inline]
    pub fn plot(&mut self, point: Point2D, color: Color) -> bool {
        match self.cell_index(point) {
            Some(i) => {
                self.cells[i] = color;
                true
            }
            None => false,
        }
    }

    /// Color of a cell.
    #[inline]
    pub fn get(&self, coord: CellCoord) -> Option<Color> {
        self.is_valid_cell(coord)
            .then(|| self.cells[coord.row as usize * self.columns + coord.column as usize])
    }

    /// Color of the cell holding `point`.
    #[inline]
    pub fn color_at(&self, point: Point2D) -> Option<Color> {
        self.cell_index(point).map(|i| self.cells[i])
    }

    /// Row-major cells.
    #[inline]
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    /// Number of non-transparent cells.
    pub fn painted_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_transparent()).count()
    }

    /// Row-major RGBA bytes, 4 per cell.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.cells.iter().flat_map(|c| c.to_rgba()).collect()
    }
}

impl Default for FlatMap {
    fn default() -> Self {
        Self::new(MapExtent::default(), 1000, 1000)
    }
}
