// src/relax.rs
//
// Relaxation engine for the capacitor problem:
//  - Jacobi sweep of the 5-point Laplace stencil over interior nodes
//  - reads come from the previous sweep's snapshot, writes go to the live field
//  - plate nodes (see PlateGeometry::is_pinned) and the outer frame are never written
//  - stop when the max-norm change between sweeps is <= tolerance
//
// Parallelism:
//  - each sweep is split over grid rows with rayon (par_chunks_mut), one writer per row
//  - the end of the parallel iterator is the barrier before the delta is measured
//  - results are bit-identical for any thread count

use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::convergence::max_abs_diff;
use crate::error::Result;
use crate::plates::{PlateGeometry, PlateSpec, init_capacitor};
use crate::potential_field::PotentialField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaxOutcome {
    /// Last sweep changed no node by more than the tolerance.
    Converged,
    /// `max_sweeps` was reached first.
    MaxSweepsReached,
}

#[derive(Debug, Clone)]
pub struct RelaxSettings {
    /// Stop once the max-norm sweep delta is <= tolerance.
    pub tolerance: f64,

    /// Optional hard cap on sweeps. `None` runs until converged, however long that takes.
    pub max_sweeps: Option<usize>,

    /// Worker threads for the sweep. `None` lets rayon pick (one per logical CPU).
    pub threads: Option<usize>,

    /// Emit a debug log line every this many sweeps (0 disables).
    pub progress_every: usize,
}

impl Default for RelaxSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-5,
            max_sweeps: None,
            threads: None,
            progress_every: 1000,
        }
    }
}

impl RelaxSettings {
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct RelaxReport {
    /// Completed sweeps.
    pub sweeps: usize,

    /// Size of the worker pool that ran the sweeps.
    pub threads: usize,

    /// Wall-clock time of the sweep loop only (pool start-up and grid setup excluded).
    pub elapsed: Duration,

    /// Delta of the last sweep (+inf if no sweep ran).
    pub final_delta: f64,

    pub outcome: RelaxOutcome,
}

impl RelaxReport {
    pub fn converged(&self) -> bool {
        self.outcome == RelaxOutcome::Converged
    }
}

/// One Jacobi sweep: every non-pinned interior node of `field` becomes the mean of its
/// four neighbours in `snapshot`. Frame and pinned nodes are left untouched.
pub fn jacobi_sweep(field: &mut PotentialField, snapshot: &PotentialField, plates: &PlateGeometry) {
    debug_assert_eq!(field.grid, snapshot.grid);

    let side = field.grid.side();
    let interior = field.grid.interior();
    let prev: &[f64] = &snapshot.data;

    field
        .data
        .par_chunks_mut(side)
        .enumerate()
        .for_each(|(i, row)| {
            if !interior.contains(&i) {
                return;
            }
            let base = i * side;
            for j in interior.clone() {
                if plates.is_pinned(i, j) {
                    continue;
                }
                let id = base + j;
                row[j] = 0.25 * (prev[id + side] + prev[id - side] + prev[id + 1] + prev[id - 1]);
            }
        });
}

/// Relax `field` in place until the sweep delta drops to `settings.tolerance`
/// (or `settings.max_sweeps` is hit).
///
/// At least one sweep always runs, whatever the tolerance.
pub fn relax_field(
    field: &mut PotentialField,
    plates: &PlateGeometry,
    settings: &RelaxSettings,
) -> Result<RelaxReport> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(settings.threads.unwrap_or(0))
        .build()?;
    let threads = pool.current_num_threads();

    log::debug!(
        "relax: n={} plates x=({}, {}) y=[{}, {}] tol={:e} max_sweeps={:?} threads={}",
        field.grid.n,
        plates.plate_x1,
        plates.plate_x2,
        plates.start_y,
        plates.end_y,
        settings.tolerance,
        settings.max_sweeps,
        threads
    );

    let mut snapshot = field.clone();
    let mut delta = f64::INFINITY;
    let mut sweeps: usize = 0;

    let t0 = Instant::now();
    let outcome = pool.install(|| {
        loop {
            if let Some(cap) = settings.max_sweeps {
                if sweeps >= cap {
                    break RelaxOutcome::MaxSweepsReached;
                }
            }

            jacobi_sweep(field, &snapshot, plates);
            delta = max_abs_diff(&field.data, &snapshot.data);
            snapshot.data.copy_from_slice(&field.data);
            sweeps += 1;

            if settings.progress_every > 0 && sweeps % settings.progress_every == 0 {
                log::debug!("sweep {:8}, delta = {:.3e}", sweeps, delta);
            }

            if delta <= settings.tolerance {
                break RelaxOutcome::Converged;
            }
        }
    });
    let elapsed = t0.elapsed();

    match outcome {
        RelaxOutcome::Converged => log::info!(
            "converged after {} sweeps (delta = {:.3e}, {:.3} s, {} threads)",
            sweeps,
            delta,
            elapsed.as_secs_f64(),
            threads
        ),
        RelaxOutcome::MaxSweepsReached => log::warn!(
            "did not converge: stopped at {} sweeps with delta = {:.3e} > tol = {:e}",
            sweeps,
            delta,
            settings.tolerance
        ),
    }

    Ok(RelaxReport {
        sweeps,
        threads,
        elapsed,
        final_delta: delta,
        outcome,
    })
}

/// Build the capacitor grid for (`n`, `l`) and relax it.
pub fn relax_capacitor(
    n: usize,
    l: usize,
    spec: &PlateSpec,
    settings: &RelaxSettings,
) -> Result<(PotentialField, RelaxReport)> {
    let (mut field, plates) = init_capacitor(n, l, spec);
    let report = relax_field(&mut field, &plates, settings)?;
    Ok((field, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capped(sweeps: usize) -> RelaxSettings {
        RelaxSettings {
            tolerance: 0.0,
            max_sweeps: Some(sweeps),
            threads: Some(2),
            progress_every: 0,
        }
    }

    #[test]
    fn single_sweep_averages_snapshot_neighbours() {
        let (mut field, plates) = init_capacitor(10, 10, &PlateSpec::default());
        let snapshot = field.clone();
        jacobi_sweep(&mut field, &snapshot, &plates);

        // Right next to the left plate: one +1 neighbour out of four.
        assert_eq!(field.get(4, 1), 0.25);
        assert_eq!(field.get(4, 3), 0.25);
        assert_eq!(field.get(4, 7), -0.25);
        // Far from both plates nothing moves yet.
        assert_eq!(field.get(4, 5), 0.0);
        // Row 1 above the plate: neighbour (2, 2) is +1.
        assert_eq!(field.get(1, 2), 0.25);
        // Pinned nodes keep their value.
        assert_eq!(field.get(2, 2), 1.0);
        assert_eq!(field.get(8, 2), 0.0);
    }

    #[test]
    fn sweep_reads_only_from_snapshot() {
        // An in-place row-major sweep would carry (4, 3)'s new value into (4, 4).
        let (mut field, plates) = init_capacitor(10, 10, &PlateSpec::default());
        let snapshot = field.clone();
        jacobi_sweep(&mut field, &snapshot, &plates);
        assert_eq!(field.get(4, 4), 0.0);
        assert_eq!(field.get(9, 9), 0.0);
    }

    #[test]
    fn max_sweeps_caps_the_loop() {
        let (_, report) = relax_capacitor(20, 10, &PlateSpec::default(), &capped(7)).unwrap();
        assert_eq!(report.sweeps, 7);
        assert_eq!(report.outcome, RelaxOutcome::MaxSweepsReached);
        assert!(!report.converged());
        assert!(report.final_delta > 0.0);
    }

    #[test]
    fn zero_cap_runs_no_sweep() {
        let (field, report) = relax_capacitor(10, 10, &PlateSpec::default(), &capped(0)).unwrap();
        assert_eq!(report.sweeps, 0);
        assert!(report.final_delta.is_infinite());
        assert_eq!(field.get(3, 2), 1.0);
    }

    #[test]
    fn loose_tolerance_still_runs_one_sweep() {
        let settings = RelaxSettings {
            tolerance: 10.0,
            threads: Some(1),
            ..RelaxSettings::default()
        };
        let (_, report) = relax_capacitor(10, 10, &PlateSpec::default(), &settings).unwrap();
        assert_eq!(report.sweeps, 1);
        assert!(report.converged());
        assert_eq!(report.final_delta, 0.25);
    }

    #[test]
    fn requested_thread_count_is_reported() {
        let settings = RelaxSettings {
            tolerance: 1e-3,
            threads: Some(3),
            ..RelaxSettings::default()
        };
        let (_, report) = relax_capacitor(10, 10, &PlateSpec::default(), &settings).unwrap();
        assert_eq!(report.threads, 3);
    }

    #[test]
    fn degenerate_grids_terminate() {
        let settings = RelaxSettings::with_tolerance(1e-6);
        for n in 0..=2 {
            let (field, report) =
                relax_capacitor(n, 10, &PlateSpec::default(), &settings).unwrap();
            assert_eq!(report.sweeps, 1, "n = {n}");
            assert!(report.converged());
            assert_eq!(field.data.len(), (n + 1) * (n + 1));
        }
    }
}
