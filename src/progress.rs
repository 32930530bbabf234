//! Interactive progress display for the scan, sizing, and deletion phases.
//!
//! Thin wrappers over indicatif, fed by the core's progress callbacks. Both
//! kinds construct as hidden when the run is non-interactive (`--quiet`,
//! `--json`, or stderr not a terminal), so callers never branch at the call
//! sites.

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::locator::TARGET_DIR_NAME;

/// Spinner shown while the locator walks the tree, updated once per level.
pub struct ScanProgress {
    bar: ProgressBar,
}

impl ScanProgress {
    pub fn new(enabled: bool) -> Self {
        let bar = if enabled {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .expect("static spinner template"),
            );
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        } else {
            ProgressBar::hidden()
        };
        Self { bar }
    }

    pub fn update(&self, dirs_scanned: usize, matches_found: usize) {
        self.bar.set_message(format!(
            "Scanned {dirs_scanned} directories, found {matches_found} {TARGET_DIR_NAME}"
        ));
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Bar for fixed-length batches: sizing the matches, then deleting them.
pub struct BatchProgress {
    bar: ProgressBar,
}

impl BatchProgress {
    pub fn new(enabled: bool, len: u64, verb: &str) -> Self {
        let bar = if enabled {
            let bar = ProgressBar::new(len);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{prefix} {bar:32.cyan/blue} {pos}/{len} {wide_msg}")
                    .expect("static bar template"),
            );
            bar.set_prefix(verb.to_string());
            bar
        } else {
            ProgressBar::hidden()
        };
        Self { bar }
    }

    /// Record one completed unit. Callable from any worker thread.
    pub fn advance(&self, path: &Path, completed: usize) {
        self.bar.set_position(completed as u64);
        self.bar.set_message(path.display().to_string());
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
