//! Error types for npsweep.
//!
//! This module defines all error types used throughout npsweep, using a
//! combination of `thiserror` for ergonomic error definitions and `miette`
//! for rich diagnostic output.
//!
//! # Error Handling Strategy
//!
//! - All errors derive from [`SweepError`]
//! - Only [`SweepError::RootNotFound`] is fatal to a run
//! - Every other failure is absorbed at the boundary where it occurs: a
//!   directory that cannot be listed is treated as empty, a file that cannot
//!   be stated contributes zero bytes, and a directory that cannot be removed
//!   is recorded in the final report without stopping the batch
//!
//! The absorbed failures still travel through explicit `Result` values (one
//! slot per unit of work in the [`crate::executor`]) rather than being thrown
//! away in place, so tests can assert on the failure path.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Error types that can occur in npsweep operations
#[derive(Error, Debug, Diagnostic)]
pub enum SweepError {
    /// The scan root does not exist or is not a directory.
    ///
    /// This is the only fatal error in the taxonomy: it aborts the run
    /// before any traversal starts and is surfaced through miette with a
    /// non-zero exit status.
    #[error("Scan root '{path}' does not exist or is not a directory")]
    #[diagnostic(
        code(npsweep::root_not_found),
        help("Pass an existing directory to scan, e.g. `npsweep ~/projects`.")
    )]
    RootNotFound {
        /// The path that was given as the scan root
        path: PathBuf,
    },

    /// File system I/O error during scanning, sizing, or deletion.
    ///
    /// Carried inside the per-unit `Result` slots of the bounded executor.
    /// Common causes: permission denied, a directory deleted mid-scan, or a
    /// path that stopped being a directory between listing and reading.
    #[error("I/O error accessing '{path}'")]
    #[diagnostic(code(npsweep::io_error))]
    Io {
        /// The path that caused the I/O error
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A worker thread pool could not be constructed.
    ///
    /// Raised when building one of the three bounded pools (directory
    /// reads, stats, deletions) fails, typically from resource exhaustion.
    #[error("Failed to build a worker pool with {limit} thread(s)")]
    #[diagnostic(
        code(npsweep::thread_pool),
        help("Lower the --read-concurrency / --stat-concurrency / --remove-concurrency values.")
    )]
    ThreadPool {
        /// The requested concurrency limit
        limit: usize,
        /// The underlying pool construction error
        #[source]
        source: rayon::ThreadPoolBuildError,
    },

    /// Failed to serialize a report to JSON for `--json` output.
    #[error("Failed to serialize report to JSON")]
    #[diagnostic(code(npsweep::json_error))]
    Json(#[source] serde_json::Error),

    /// Failed to read the user's answer to the confirmation prompt.
    #[error("Failed to read confirmation from stdin")]
    #[diagnostic(
        code(npsweep::prompt_error),
        help("Use --yes to skip the prompt in non-interactive environments.")
    )]
    Prompt(#[source] std::io::Error),
}

impl SweepError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Type alias for Results in this crate
pub type Result<T> = std::result::Result<T, SweepError>;
