//! Parallel aggregation of a directory's total byte size.
//!
//! Works the same breadth-first rounds as the locator, but with a different
//! objective: every regular file reachable under the given directory
//! contributes its byte length to a running total. Unlike the locator this
//! walk prunes nothing: nested `node_modules`, `.git`, `.cache` and the rest
//! are all measured, since the point is to know what deleting the match
//! would reclaim.
//!
//! Each round lists the pending directories through the directory-read
//! executor, then resolves all file and symlink entries through the stat
//! executor, whose ceiling is higher because stats are cheaper and far more
//! numerous than listings. Subdirectory entries join the next frontier
//! directly; their type is already known from the listing.
//!
//! Sizes are raw `metadata.len()` byte counts, not allocated blocks, and
//! hard-linked files count once per directory entry.

use std::fs::{self, FileType, Metadata};
use std::path::{Path, PathBuf};

use crate::error::{Result, SweepError};
use crate::executor::Executor;

/// Compute the total size in bytes of all regular files under `root`.
///
/// Returns `None` only when `root` itself cannot be listed, the
/// distinguishable "could not measure" marker, rendered as unknown and
/// counted as zero in totals. Failures deeper in the tree silently
/// contribute zero instead: a partially inaccessible subtree degrades the
/// measurement rather than aborting it.
///
/// Symlinks are never followed and never counted unless `follow_symlinks`
/// is set; with it set, a symlink resolving to a file adds that file's
/// size and one resolving to a directory is descended into.
pub fn directory_size(
    root: &Path,
    follow_symlinks: bool,
    read_executor: &Executor,
    stat_executor: &Executor,
) -> Option<u64> {
    let mut total: u64 = 0;
    let mut frontier = vec![root.to_path_buf()];
    let mut root_round = true;

    while !frontier.is_empty() {
        let list_units: Vec<_> = frontier
            .drain(..)
            .map(|dir| move || list_entries(&dir))
            .collect();

        let mut stat_targets: Vec<PathBuf> = Vec::new();
        let mut next: Vec<PathBuf> = Vec::new();

        for listing in read_executor.run(list_units) {
            match listing {
                Ok(entries) => {
                    for (path, file_type) in entries {
                        if file_type.is_dir() {
                            next.push(path);
                        } else if file_type.is_file() {
                            stat_targets.push(path);
                        } else if file_type.is_symlink() && follow_symlinks {
                            stat_targets.push(path);
                        }
                    }
                }
                // The match root being unlistable is the one failure worth
                // reporting; anything deeper degrades to zero.
                Err(_) if root_round => return None,
                Err(_) => {}
            }
        }
        root_round = false;

        if !stat_targets.is_empty() {
            let stat_units: Vec<_> = stat_targets
                .into_iter()
                .map(|path| move || stat_entry(path))
                .collect();

            for outcome in stat_executor.run(stat_units) {
                match outcome {
                    Ok((path, meta)) => {
                        if meta.is_dir() {
                            // Symlink resolving to a directory joins the
                            // next frontier.
                            next.push(path);
                        } else {
                            total += meta.len();
                        }
                    }
                    // Unstatable entry contributes zero.
                    Err(_) => {}
                }
            }
        }

        frontier = next;
    }

    Some(total)
}

/// Measure a batch of directories, one after another.
///
/// Each directory is measured with full internal parallelism before the
/// next starts; `on_measured` is invoked after each with the path and the
/// running count of completed measurements, which keeps progress reporting
/// deterministic.
pub fn measure_directories(
    paths: Vec<PathBuf>,
    follow_symlinks: bool,
    read_executor: &Executor,
    stat_executor: &Executor,
    mut on_measured: impl FnMut(&Path, usize),
) -> Vec<(PathBuf, Option<u64>)> {
    let mut measured = Vec::with_capacity(paths.len());
    for (completed, path) in paths.into_iter().enumerate() {
        let size = directory_size(&path, follow_symlinks, read_executor, stat_executor);
        on_measured(&path, completed + 1);
        measured.push((path, size));
    }
    measured
}

/// List a directory, keeping each entry's path and its lstat file type.
fn list_entries(dir: &Path) -> Result<Vec<(PathBuf, FileType)>> {
    let read_dir = fs::read_dir(dir).map_err(|e| SweepError::io(dir, e))?;

    let mut entries = Vec::new();
    for entry in read_dir {
        // Entries that vanish mid-listing are dropped.
        let Ok(entry) = entry else { continue };
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        entries.push((entry.path(), file_type));
    }
    Ok(entries)
}

/// Stat one entry, following symlinks so their targets classify correctly.
fn stat_entry(path: PathBuf) -> Result<(PathBuf, Metadata)> {
    match fs::metadata(&path) {
        Ok(meta) => Ok((path, meta)),
        Err(e) => Err(SweepError::io(path, e)),
    }
}
