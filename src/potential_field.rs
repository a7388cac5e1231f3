// src/potential_field.rs

use crate::grid::SquareGrid;

/// Electrostatic potential sampled on a square grid.
/// One `f64` per node, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct PotentialField {
    pub grid: SquareGrid,
    pub data: Vec<f64>,
}

impl PotentialField {
    /// Create a new field on the given grid, zero everywhere.
    pub fn new(grid: SquareGrid) -> Self {
        Self {
            grid,
            data: vec![0.0; grid.n_cells()],
        }
    }

    /// Get the flat index in `data` for grid indices (i, j).
    #[inline]
    pub fn idx(&self, i: usize, j: usize) -> usize {
        self.grid.idx(i, j)
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[self.idx(i, j)]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        let id = self.idx(i, j);
        self.data[id] = value;
    }

    /// Borrow row `i` as a slice of `N + 1` values.
    pub fn row(&self, i: usize) -> &[f64] {
        let side = self.grid.side();
        &self.data[i * side..(i + 1) * side]
    }

    /// Largest |φ| over the whole field.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0, |acc, v| acc.max(v.abs()))
    }
}
