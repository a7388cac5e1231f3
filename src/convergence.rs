// src/convergence.rs

use rayon::prelude::*;

/// Max-norm of the elementwise difference between two equally sized buffers.
///
/// Panics if the lengths differ; callers always pass two views of the same grid.
pub fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "max_abs_diff: shape mismatch");
    a.par_iter()
        .zip_eq(b.par_iter())
        .map(|(x, y)| (x - y).abs())
        .reduce(|| 0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_buffers_have_zero_delta() {
        let a = vec![0.25, -1.0, 3.5];
        assert_eq!(max_abs_diff(&a, &a), 0.0);
    }

    #[test]
    fn picks_largest_absolute_difference() {
        let a = [0.0, 1.0, -2.0, 0.5];
        let b = [0.1, 1.0, 1.0, 0.5];
        assert!((max_abs_diff(&a, &b) - 3.0).abs() < 1e-15);
    }

    #[test]
    fn empty_buffers_give_zero() {
        assert_eq!(max_abs_diff(&[], &[]), 0.0);
    }

    #[test]
    #[should_panic(expected = "shape mismatch")]
    fn mismatched_lengths_panic() {
        max_abs_diff(&[0.0; 3], &[0.0; 4]);
    }
}
