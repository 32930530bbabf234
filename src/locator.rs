//! Breadth-first discovery of `node_modules` directories.
//!
//! The walk is level-synchronous: every directory of the current depth is
//! listed concurrently through the bounded [`Executor`], the next frontier is
//! assembled from all discovered subdirectories, and only then does the next
//! level start. The barrier keeps peak frontier size bounded and makes the
//! per-level progress callback deterministic.
//!
//! Matched directories are never descended into, so a `node_modules` nested
//! inside another one is reported exactly once (as its outermost ancestor).
//! Ignore-named directories (`.git`, `.cache` by default) are pruned without
//! being reported. With symlink following enabled, every processed directory
//! records its canonical real path in a shared visited set; a path seen twice
//! means a symlink cycle and the node is dropped.
//!
//! Unreadable directories are skipped, not fatal: the per-node work unit
//! returns an explicit `Err` which the level loop absorbs as an empty
//! contribution.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{Result, SweepError};
use crate::executor::Executor;

/// Directory name the locator searches for.
pub const TARGET_DIR_NAME: &str = "node_modules";

/// Directory names never traversed and never reported.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[".git", ".cache"];

/// Traversal configuration for [`locate_target_dirs`].
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Follow symbolic links to directories (with cycle detection).
    pub follow_symlinks: bool,
    /// Maximum traversal depth; `None` is unbounded. Depth 0 is the root,
    /// so a limit of 0 scans only the root's direct contents.
    pub max_depth: Option<usize>,
    /// Directory names to prune from the walk.
    pub ignored: Vec<OsString>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            max_depth: None,
            ignored: DEFAULT_IGNORED_DIRS.iter().map(OsString::from).collect(),
        }
    }
}

/// One frontier entry: a directory to list and its depth below the root.
#[derive(Debug)]
struct Node {
    path: PathBuf,
    depth: usize,
}

/// What one successfully listed directory contributed to the walk.
#[derive(Debug, Default)]
struct NodeListing {
    matches: Vec<PathBuf>,
    descend: Vec<Node>,
}

/// Walk the tree under `root` and return every `node_modules` directory, in
/// discovery order (shallower levels first).
///
/// The caller is responsible for verifying that `root` exists; a root that
/// cannot be listed yields an empty result rather than an error, consistent
/// with the best-effort traversal policy. `on_level` is invoked after each
/// completed level with the cumulative count of directories scanned and
/// matches found.
pub fn locate_target_dirs(
    root: &Path,
    options: &ScanOptions,
    executor: &Executor,
    mut on_level: impl FnMut(usize, usize),
) -> Vec<PathBuf> {
    let mut matches = Vec::new();

    // A root itself named node_modules is reported, never descended into.
    if root.file_name().is_some_and(|name| name == TARGET_DIR_NAME) {
        matches.push(root.to_path_buf());
        on_level(0, 1);
        return matches;
    }

    let visited: Mutex<HashSet<PathBuf>> = Mutex::new(HashSet::new());
    let mut dirs_scanned = 0usize;
    let mut frontier = vec![Node {
        path: root.to_path_buf(),
        depth: 0,
    }];

    while !frontier.is_empty() {
        let units: Vec<_> = frontier
            .drain(..)
            .map(|node| {
                let visited = &visited;
                move || process_node(node, options, visited)
            })
            .collect();

        let mut next = Vec::new();
        for outcome in executor.run(units) {
            match outcome {
                Ok(Some(listing)) => {
                    dirs_scanned += 1;
                    matches.extend(listing.matches);
                    next.extend(listing.descend);
                }
                // Gated by the depth limit or the cycle guard.
                Ok(None) => {}
                // Unreadable directory, treated as empty.
                Err(_) => {}
            }
        }

        frontier = next;
        on_level(dirs_scanned, matches.len());
    }

    matches
}

/// Process one frontier node: list it and classify its entries.
///
/// Returns `Ok(None)` when the node is gated (depth limit exceeded, or its
/// real path was already visited), `Err` when the directory cannot be
/// listed, and `Ok(Some(_))` with the matches and subdirectories otherwise.
fn process_node(
    node: Node,
    options: &ScanOptions,
    visited: &Mutex<HashSet<PathBuf>>,
) -> Result<Option<NodeListing>> {
    if let Some(max_depth) = options.max_depth
        && node.depth > max_depth
    {
        return Ok(None);
    }

    if options.follow_symlinks {
        let real = fs::canonicalize(&node.path).map_err(|e| SweepError::io(&node.path, e))?;
        let mut seen = visited.lock().unwrap_or_else(|poison| poison.into_inner());
        if !seen.insert(real) {
            return Ok(None);
        }
    }

    let entries = fs::read_dir(&node.path).map_err(|e| SweepError::io(&node.path, e))?;

    let mut listing = NodeListing::default();
    for entry in entries {
        // Entries that vanish or fail to classify mid-listing are dropped.
        let Ok(entry) = entry else { continue };
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if !file_type.is_dir() && !file_type.is_symlink() {
            continue;
        }

        let name = entry.file_name();
        if name == TARGET_DIR_NAME {
            listing.matches.push(entry.path());
            continue;
        }
        if options.ignored.contains(&name) {
            continue;
        }

        if file_type.is_dir() {
            listing.descend.push(Node {
                path: entry.path(),
                depth: node.depth + 1,
            });
        } else if options.follow_symlinks {
            // A symlink is only walked when its target resolves to a
            // directory; a failed stat drops it silently.
            if let Ok(meta) = fs::metadata(entry.path())
                && meta.is_dir()
            {
                listing.descend.push(Node {
                    path: entry.path(),
                    depth: node.depth + 1,
                });
            }
        }
    }

    Ok(Some(listing))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn scan(root: &Path, options: &ScanOptions) -> Vec<PathBuf> {
        let executor = Executor::new(4).unwrap();
        locate_target_dirs(root, options, &executor, |_, _| {})
    }

    fn mkdirs(root: &Path, relative: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }

    #[test]
    fn finds_matches_across_levels() {
        let temp = TempDir::new().unwrap();
        mkdirs(temp.path(), "app/node_modules");
        mkdirs(temp.path(), "tools/cli/node_modules");
        mkdirs(temp.path(), "empty/dir");

        let found = scan(temp.path(), &ScanOptions::default());
        let found: BTreeSet<_> = found.into_iter().collect();
        assert_eq!(
            found,
            BTreeSet::from([
                temp.path().join("app/node_modules"),
                temp.path().join("tools/cli/node_modules"),
            ])
        );
    }

    #[test]
    fn never_descends_into_a_match() {
        let temp = TempDir::new().unwrap();
        mkdirs(temp.path(), "a/node_modules/node_modules/x");

        let found = scan(temp.path(), &ScanOptions::default());
        assert_eq!(found, vec![temp.path().join("a/node_modules")]);
    }

    #[test]
    fn ignored_names_are_pruned() {
        let temp = TempDir::new().unwrap();
        mkdirs(temp.path(), "a/.git/node_modules");
        mkdirs(temp.path(), "a/.cache/node_modules");

        let found = scan(temp.path(), &ScanOptions::default());
        assert!(found.is_empty());
    }

    #[test]
    fn extra_ignored_names_are_honored() {
        let temp = TempDir::new().unwrap();
        mkdirs(temp.path(), "vendor/node_modules");

        let mut options = ScanOptions::default();
        options.ignored.push(OsString::from("vendor"));
        assert!(scan(temp.path(), &options).is_empty());
    }

    #[test]
    fn depth_limit_gates_deep_matches() {
        let temp = TempDir::new().unwrap();
        mkdirs(temp.path(), "a/b/node_modules");

        let shallow = ScanOptions {
            max_depth: Some(1),
            ..ScanOptions::default()
        };
        assert!(scan(temp.path(), &shallow).is_empty());

        let deep = ScanOptions {
            max_depth: Some(2),
            ..ScanOptions::default()
        };
        assert_eq!(
            scan(temp.path(), &deep),
            vec![temp.path().join("a/b/node_modules")]
        );
    }

    #[test]
    fn depth_zero_scans_only_direct_contents() {
        let temp = TempDir::new().unwrap();
        mkdirs(temp.path(), "node_modules");
        mkdirs(temp.path(), "a/node_modules");

        let options = ScanOptions {
            max_depth: Some(0),
            ..ScanOptions::default()
        };
        assert_eq!(
            scan(temp.path(), &options),
            vec![temp.path().join("node_modules")]
        );
    }

    #[test]
    fn root_named_node_modules_is_reported_not_descended() {
        let temp = TempDir::new().unwrap();
        let root = mkdirs(temp.path(), "node_modules");
        mkdirs(temp.path(), "node_modules/node_modules");

        let found = scan(&root, &ScanOptions::default());
        assert_eq!(found, vec![root]);
    }

    #[test]
    fn zero_match_tree_returns_empty() {
        let temp = TempDir::new().unwrap();
        mkdirs(temp.path(), "a/b/c");
        mkdirs(temp.path(), "d");

        assert!(scan(temp.path(), &ScanOptions::default()).is_empty());
    }

    #[test]
    fn rescan_is_idempotent() {
        let temp = TempDir::new().unwrap();
        mkdirs(temp.path(), "one/node_modules");
        mkdirs(temp.path(), "two/sub/node_modules");

        let first: BTreeSet<_> = scan(temp.path(), &ScanOptions::default())
            .into_iter()
            .collect();
        let second: BTreeSet<_> = scan(temp.path(), &ScanOptions::default())
            .into_iter()
            .collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn progress_is_reported_per_level_with_running_totals() {
        let temp = TempDir::new().unwrap();
        mkdirs(temp.path(), "a/node_modules");
        mkdirs(temp.path(), "b");

        let executor = Executor::new(2).unwrap();
        let mut reports = Vec::new();
        locate_target_dirs(
            temp.path(),
            &ScanOptions::default(),
            &executor,
            |dirs, matches| reports.push((dirs, matches)),
        );

        // Running totals never decrease, and the final report reflects the
        // whole walk: root + a + b scanned, one match found.
        assert!(reports.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(reports.last(), Some(&(3, 1)));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_to_directory_is_followed_only_when_enabled() {
        let temp = TempDir::new().unwrap();
        mkdirs(temp.path(), "real/node_modules");
        std::os::unix::fs::symlink(temp.path().join("real"), temp.path().join("linked")).unwrap();

        let found = scan(temp.path(), &ScanOptions::default());
        assert_eq!(found, vec![temp.path().join("real/node_modules")]);

        let follow = ScanOptions {
            follow_symlinks: true,
            ..ScanOptions::default()
        };
        let found: BTreeSet<_> = scan(temp.path(), &follow).into_iter().collect();
        // With following enabled the cycle guard keeps `real` from being
        // walked twice, so the match is still reported exactly once (which
        // path wins depends on level scheduling).
        assert_eq!(found.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn symlink_cycle_terminates() {
        let temp = TempDir::new().unwrap();
        let nested = mkdirs(temp.path(), "a/b");
        std::os::unix::fs::symlink(temp.path(), nested.join("up")).unwrap();
        mkdirs(temp.path(), "a/node_modules");

        let follow = ScanOptions {
            follow_symlinks: true,
            ..ScanOptions::default()
        };
        let found = scan(temp.path(), &follow);
        assert_eq!(found, vec![temp.path().join("a/node_modules")]);
    }
}
