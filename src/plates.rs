// src/plates.rs
//
// Parallel-plate capacitor geometry on a square grid.
//
// Physical layout (in units of the capacitor extent L, which spans 0..10):
// - left plate at x = 2, right plate at x = 8
// - both plates span y = 2 .. 8
//
// Mapping to grid indices is index = round((N / L) * k) for k ∈ {2, 8}, evaluated
// exactly on the rational k*N/L. `RoundingPolicy::Floor` is the default.
//
// Conventions:
// - Plates are vertical line segments (fixed column j, rows i in a range).
// - Initialisation writes rows start_y ≤ i < end_y.
// - The relaxation sweep skips rows start_y ≤ i ≤ end_y on plate columns, so the node
//   at row end_y keeps whatever initialisation left there (0.0).

use serde::Serialize;

use crate::grid::SquareGrid;
use crate::potential_field::PotentialField;

/// Position of the plates' near edge, in units of L/10.
pub const PLATE_NEAR: usize = 2;
/// Position of the plates' far edge, in units of L/10.
pub const PLATE_FAR: usize = 8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingPolicy {
    /// Truncate toward zero.
    #[default]
    Floor,
    /// Round half up.
    Nearest,
}

impl RoundingPolicy {
    /// Map the rational `num / den` to a grid index. A zero denominator maps to 0.
    pub fn apply(self, num: usize, den: usize) -> usize {
        if den == 0 {
            return 0;
        }
        match self {
            Self::Floor => num / den,
            Self::Nearest => num.saturating_mul(2).saturating_add(den) / den.saturating_mul(2),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Floor => "floor",
            Self::Nearest => "nearest",
        }
    }
}

/// Electrical and discretisation parameters of the two plates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlateSpec {
    pub v_left: f64,
    pub v_right: f64,
    pub rounding: RoundingPolicy,
}

impl Default for PlateSpec {
    fn default() -> Self {
        Self {
            v_left: 1.0,
            v_right: -1.0,
            rounding: RoundingPolicy::Floor,
        }
    }
}

/// Plate positions resolved to grid indices for a given (N, L).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateGeometry {
    pub plate_x1: usize,
    pub plate_x2: usize,
    pub start_y: usize,
    pub end_y: usize,
    pub v_left: f64,
    pub v_right: f64,
}

impl PlateGeometry {
    /// Resolve plate indices from grid extent `n` and capacitor extent `l`.
    ///
    /// No validation: `l == 0` (or `l` much larger than `n`) collapses every index to 0.
    pub fn from_extent(n: usize, l: usize, spec: &PlateSpec) -> Self {
        let near = spec.rounding.apply(PLATE_NEAR.saturating_mul(n), l);
        let far = spec.rounding.apply(PLATE_FAR.saturating_mul(n), l);
        Self {
            plate_x1: near,
            plate_x2: far,
            start_y: near,
            end_y: far,
            v_left: spec.v_left,
            v_right: spec.v_right,
        }
    }

    /// True if (i, j) is excluded from the relaxation update.
    #[inline]
    pub fn is_pinned(&self, i: usize, j: usize) -> bool {
        (i >= self.start_y && i <= self.end_y) && (j == self.plate_x1 || j == self.plate_x2)
    }

    /// Write plate potentials into `field`. Out-of-grid plate nodes are skipped.
    pub fn stamp(&self, field: &mut PotentialField) {
        let n = field.grid.n;
        for i in self.start_y..self.end_y.min(n + 1) {
            if self.plate_x1 <= n {
                field.set(i, self.plate_x1, self.v_left);
            }
            if self.plate_x2 <= n {
                field.set(i, self.plate_x2, self.v_right);
            }
        }
    }
}

/// Grid initializer: zero field of extent `n` with both plates stamped in.
pub fn init_capacitor(n: usize, l: usize, spec: &PlateSpec) -> (PotentialField, PlateGeometry) {
    let geometry = PlateGeometry::from_extent(n, l, spec);
    let mut field = PotentialField::new(SquareGrid::new(n));
    geometry.stamp(&mut field);
    (field, geometry)
}
