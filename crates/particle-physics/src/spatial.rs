//! Uniform grid spatial index
//!
//! Maps each cell of a `cols x rows` grid over the world to the particle
//! indices inside it. The grid is cleared and refilled every step; there is no
//! incremental tracking. A query returns everything in the 3x3 block of cells
//! around a point, which is a superset of the particles within `cell_size` of
//! it. Callers do the exact distance test.
//!
//! Cells per axis are capped at [`MAX_GRID_CELLS_PER_AXIS`]; a finer request
//! gets wider cells, which still yields a superset.

use crate::constants::MAX_GRID_CELLS_PER_AXIS;

/// Uniform grid over `[0, width] x [0, height]`
#[derive(Clone, Debug)]
pub struct SpatialGrid {
    /// Cell side asked for by the caller
    requested_cell_size: f32,
    /// Cell side in use after the per-axis cap
    cell_size: f32,
    cols: usize,
    rows: usize,
    /// Row-major: `[row * cols + col]`
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32, width: f32, height: f32) -> Self {
        let mut grid = Self {
            requested_cell_size: cell_size,
            cell_size,
            cols: 0,
            rows: 0,
            cells: Vec::new(),
        };
        grid.resize(width, height);
        grid
    }

    /// Recompute grid dimensions for new world bounds. All contents are dropped.
    pub fn resize(&mut self, width: f32, height: f32) {
        let min_cell = width.max(height) / MAX_GRID_CELLS_PER_AXIS as f32;
        self.cell_size = if min_cell.is_finite() {
            self.requested_cell_size.max(min_cell)
        } else {
            self.requested_cell_size
        };
        self.cols = cells_along(width, self.cell_size);
        self.rows = cells_along(height, self.cell_size);
        self.cells = vec![Vec::new(); self.cols * self.rows];
    }

    /// Change the cell side and bounds together. All contents are dropped.
    pub fn set_cell_size(&mut self, cell_size: f32, width: f32, height: f32) {
        self.requested_cell_size = cell_size;
        self.resize(width, height);
    }

    /// Empty every cell, keeping allocations
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    pub fn insert(&mut self, index: usize, x: f32, y: f32) {
        let (col, row) = self.cell_of(x, y);
        self.cells[row * self.cols + col].push(index);
    }

    /// All indices in the 3x3 block of cells around `(x, y)`
    pub fn get_nearby(&self, x: f32, y: f32) -> Vec<usize> {
        let mut out = Vec::new();
        self.nearby_into(x, y, &mut out);
        out
    }

    /// Like [`get_nearby`](Self::get_nearby) but reuses `out`, which is cleared first
    pub fn nearby_into(&self, x: f32, y: f32, out: &mut Vec<usize>) {
        out.clear();
        let (col, row) = self.cell_of(x, y);

        // Clamped at the edges, so no cell is visited twice
        let col_range = col.saturating_sub(1)..=(col + 1).min(self.cols - 1);
        for r in row.saturating_sub(1)..=(row + 1).min(self.rows - 1) {
            for c in col_range.clone() {
                out.extend_from_slice(&self.cells[r * self.cols + c]);
            }
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Cell containing `(x, y)`, clamped into the grid
    fn cell_of(&self, x: f32, y: f32) -> (usize, usize) {
        (
            clamp_cell(x / self.cell_size, self.cols),
            clamp_cell(y / self.cell_size, self.rows),
        )
    }
}

/// At least one cell per axis, even for degenerate bounds
fn cells_along(extent: f32, cell_size: f32) -> usize {
    let n = (extent / cell_size).ceil();
    if n.is_finite() && n >= 1.0 {
        n as usize
    } else {
        1
    }
}

fn clamp_cell(coord: f32, count: usize) -> usize {
    // `as` saturates negatives and NaN to 0
    (coord.floor() as usize).min(count - 1)
}
