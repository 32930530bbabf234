//! Bounded-concurrency recursive deletion of matched directories.
//!
//! Deleting a large `node_modules` tree is metadata-heavy I/O, so the
//! deletion pool's ceiling sits well below the scanning ceilings; unbounded
//! parallel removals risk descriptor and memory exhaustion for no gain.
//!
//! Each unit is a best-effort `remove_dir_all` wrapped in a small bounded
//! retry loop: a directory that is already gone counts as removed (another
//! process or an earlier partial run may have beaten us to it), and a
//! transient failure is retried a fixed number of times with a short fixed
//! delay before the unit gives up. A unit that fails after its retries is
//! recorded with its path and error description; it never stops the rest of
//! the batch.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use std::{fs, io};

use serde::Serialize;

use crate::error::{Result, SweepError};
use crate::executor::Executor;

/// Attempts per directory before a removal is declared failed.
const REMOVE_ATTEMPTS: u32 = 3;

/// Pause between attempts.
const RETRY_DELAY: Duration = Duration::from_millis(100);

/// A directory that could not be removed, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct RemovalFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of one deletion batch.
#[derive(Debug, Default, Serialize)]
pub struct RemovalReport {
    pub removed_count: usize,
    pub failed_count: usize,
    pub failures: Vec<RemovalFailure>,
}

/// Recursively remove every directory in `paths`.
///
/// `on_completed` is invoked once per settled unit, success or failure,
/// with the unit's path and the running count of completed units; it may be
/// called from any worker thread. The report lists failures in the order
/// the paths were given.
pub fn remove_directories(
    paths: &[PathBuf],
    executor: &Executor,
    on_completed: &(dyn Fn(&Path, usize) + Sync),
) -> RemovalReport {
    let completed = AtomicUsize::new(0);

    let units: Vec<_> = paths
        .iter()
        .map(|path| {
            let path = path.clone();
            let completed = &completed;
            move || {
                let outcome = remove_with_retry(&path);
                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                on_completed(&path, done);
                outcome.map_err(|e| SweepError::io(path, e))
            }
        })
        .collect();

    let mut report = RemovalReport::default();
    for (path, outcome) in paths.iter().zip(executor.run(units)) {
        match outcome {
            Ok(()) => report.removed_count += 1,
            Err(err) => {
                report.failed_count += 1;
                report.failures.push(RemovalFailure {
                    path: path.clone(),
                    error: match err {
                        SweepError::Io { source, .. } => source.to_string(),
                        other => other.to_string(),
                    },
                });
            }
        }
    }
    report
}

/// One deletion unit: retry `remove_dir_all` up to the attempt limit.
fn remove_with_retry(path: &Path) -> io::Result<()> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match fs::remove_dir_all(path) {
            Ok(()) => return Ok(()),
            // Already gone counts as removed.
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(_) if attempt < REMOVE_ATTEMPTS => std::thread::sleep(RETRY_DELAY),
            Err(e) => return Err(e),
        }
    }
}
