//! Bounded parallel execution of independent units of work.
//!
//! The scanner, the size accumulator, and the deletion pass all fan out over
//! batches of filesystem operations, each with its own concurrency ceiling.
//! [`Executor`] wraps a dedicated rayon thread pool sized to that ceiling:
//! submitting a batch runs every unit to completion with at most `limit`
//! units in flight, and returns one [`Result`] per unit in the order the
//! units were submitted, regardless of completion order.
//!
//! A failing unit never aborts its siblings; its error is captured in the
//! corresponding result slot and the rest of the batch proceeds.
//!
//! # Example
//!
//! ```
//! use npsweep::executor::Executor;
//!
//! let executor = Executor::new(4)?;
//! let units: Vec<_> = (0..16u64).map(|i| move || Ok(i * 2)).collect();
//! let results = executor.run(units);
//! assert_eq!(*results[3].as_ref().unwrap(), 6);
//! # Ok::<(), npsweep::error::SweepError>(())
//! ```

use rayon::ThreadPool;
use rayon::prelude::*;

use crate::error::{Result, SweepError};

/// A fixed-width worker pool executing batches of independent work units.
///
/// Each instance owns its thread pool, so the three ceilings used by a run
/// (directory reads, stats, deletions) stay independent of each other and of
/// the global rayon pool.
#[derive(Debug)]
pub struct Executor {
    pool: ThreadPool,
    limit: usize,
}

impl Executor {
    /// Create an executor with at most `limit` units in flight.
    ///
    /// A limit of zero is treated as one; the contract requires `limit >= 1`.
    pub fn new(limit: usize) -> Result<Self> {
        let limit = limit.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(limit)
            .thread_name(|i| format!("npsweep-worker-{i}"))
            .build()
            .map_err(|source| SweepError::ThreadPool { limit, source })?;

        Ok(Self { pool, limit })
    }

    /// The maximum number of units this executor runs concurrently.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Run every unit to completion and collect their results.
    ///
    /// Result slot `i` always corresponds to unit `i`. Errors returned by
    /// individual units are captured in place; the batch itself cannot fail.
    /// The call returns only once every launched unit has settled.
    pub fn run<T, F>(&self, units: Vec<F>) -> Vec<Result<T>>
    where
        F: FnOnce() -> Result<T> + Send,
        T: Send,
    {
        if units.is_empty() {
            return Vec::new();
        }

        self.pool
            .install(|| units.into_par_iter().map(|unit| unit()).collect())
    }
}
