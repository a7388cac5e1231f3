// src/grid.rs

/// Square finite-difference grid with (N+1) × (N+1) nodes, 0 ≤ i, j ≤ N.
///
/// Rows are indexed by `i`, columns by `j`; storage is row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareGrid {
    pub n: usize,
}

impl SquareGrid {
    /// Create a grid with linear extent `n` (so `n + 1` nodes per side).
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    /// Number of nodes along one side.
    #[inline]
    pub fn side(&self) -> usize {
        self.n + 1
    }

    /// Total number of nodes.
    pub fn n_cells(&self) -> usize {
        self.side() * self.side()
    }

    /// Convert (i, j) indices to a flat index into a 1D array.
    #[inline]
    pub fn idx(&self, i: usize, j: usize) -> usize {
        debug_assert!(i <= self.n && j <= self.n);
        i * self.side() + j
    }

    /// True for nodes on the outer frame (i or j equal to 0 or N).
    #[inline]
    pub fn is_frame(&self, i: usize, j: usize) -> bool {
        i == 0 || j == 0 || i == self.n || j == self.n
    }

    /// Half-open range of interior indices along one axis (1..N).
    ///
    /// Empty for N ≤ 1.
    #[inline]
    pub fn interior(&self) -> std::ops::Range<usize> {
        1..self.n.max(1)
    }
}
