// src/error.rs

use thiserror::Error;

/// Failures surfaced by the solver and its command-line front end.
///
/// Non-convergence is not an error: a capped solve reports it through
/// `RelaxOutcome::MaxSweepsReached`.
#[derive(Error, Debug)]
pub enum CapacitorError {
    /// Wrong argument count or an unrecognised flag.
    #[error("usage error: {0}")]
    Usage(String),

    /// The worker pool for the parallel sweep could not be started.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, CapacitorError>;
