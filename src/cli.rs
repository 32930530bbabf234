//! Command-line interface definitions for npsweep.
//!
//! This module defines the CLI structure using clap. The main entry point is
//! the [`Cli`] struct; [`Cli::scan_options`] converts the parsed flags into
//! the locator's traversal configuration.
//!
//! # Example
//!
//! ```no_run
//! use npsweep::cli::Cli;
//!
//! let cli = Cli::parse_args();
//! println!("scanning {}", cli.root().display());
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::locator::ScanOptions;

/// Command-line interface for npsweep.
///
/// One invocation performs one run: scan the root for `node_modules`
/// directories, measure them, report them sorted by size, and, unless told
/// otherwise, offer to delete them.
#[derive(Debug, Parser)]
#[command(
    name = "npsweep",
    version,
    about = "Find and remove node_modules directories to reclaim disk space",
    long_about = None
)]
pub struct Cli {
    /// Directory to start scanning from
    #[arg(default_value = ".", env = "NPSWEEP_ROOT")]
    root: PathBuf,

    /// Follow symbolic links to directories while scanning
    #[arg(long, env = "NPSWEEP_FOLLOW_SYMLINKS")]
    follow_symlinks: bool,

    /// Maximum traversal depth; 0 scans only the root's direct contents
    #[arg(long, env = "NPSWEEP_MAX_DEPTH")]
    max_depth: Option<usize>,

    /// Delete matches without asking for confirmation
    #[arg(short = 'y', long, env = "NPSWEEP_YES")]
    yes: bool,

    /// Scan and report only; never delete
    #[arg(long, env = "NPSWEEP_DRY_RUN")]
    dry_run: bool,

    /// Emit a machine-readable JSON report on stdout instead of the table
    #[arg(long, env = "NPSWEEP_JSON")]
    json: bool,

    /// Additional directory names to skip while scanning (comma-separated)
    #[arg(long, value_delimiter = ',', env = "NPSWEEP_IGNORE")]
    ignore: Vec<String>,

    /// Concurrent directory listings during scanning and sizing
    #[arg(long, default_value = "8", env = "NPSWEEP_READ_CONCURRENCY")]
    read_concurrency: usize,

    /// Concurrent stat calls during sizing
    #[arg(long, default_value = "32", env = "NPSWEEP_STAT_CONCURRENCY")]
    stat_concurrency: usize,

    /// Concurrent directory removals; deliberately low, large deletions
    /// are metadata-heavy
    #[arg(long, default_value = "2", env = "NPSWEEP_REMOVE_CONCURRENCY")]
    remove_concurrency: usize,

    /// Enable verbose output (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, env = "NPSWEEP_VERBOSE")]
    verbose: u8,

    /// Silence all output except errors and warnings
    #[arg(short, long, conflicts_with = "verbose", env = "NPSWEEP_QUIET")]
    quiet: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The scan root exactly as given.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The scan root as an absolute, cleaned path.
    pub fn absolute_root(&self) -> PathBuf {
        normalize_path(&self.root)
    }

    pub fn follow_symlinks(&self) -> bool {
        self.follow_symlinks
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn yes(&self) -> bool {
        self.yes
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn json(&self) -> bool {
        self.json
    }

    pub fn read_concurrency(&self) -> usize {
        self.read_concurrency
    }

    pub fn stat_concurrency(&self) -> usize {
        self.stat_concurrency
    }

    pub fn remove_concurrency(&self) -> usize {
        self.remove_concurrency
    }

    pub fn verbose(&self) -> u8 {
        self.verbose
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }

    /// Traversal configuration for the locator: the default ignore set plus
    /// any names given with `--ignore`.
    pub fn scan_options(&self) -> ScanOptions {
        let mut options = ScanOptions {
            follow_symlinks: self.follow_symlinks,
            max_depth: self.max_depth,
            ..ScanOptions::default()
        };
        options.ignored.extend(self.ignore.iter().map(OsString::from));
        options
    }

    /// Create a builder for programmatic construction
    pub fn builder() -> CliBuilder {
        CliBuilder::default()
    }
}

/// Builder for [`Cli`], for tests and library callers that bypass argument
/// parsing.
#[derive(Debug)]
pub struct CliBuilder {
    root: PathBuf,
    follow_symlinks: bool,
    max_depth: Option<usize>,
    yes: bool,
    dry_run: bool,
    json: bool,
    ignore: Vec<String>,
    read_concurrency: usize,
    stat_concurrency: usize,
    remove_concurrency: usize,
    verbose: u8,
    quiet: bool,
}

impl Default for CliBuilder {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            follow_symlinks: false,
            max_depth: None,
            yes: false,
            dry_run: false,
            json: false,
            ignore: Vec::new(),
            read_concurrency: 8,
            stat_concurrency: 32,
            remove_concurrency: 2,
            verbose: 0,
            quiet: false,
        }
    }
}

impl CliBuilder {
    /// Set the scan root
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Follow symbolic links while scanning
    pub fn follow_symlinks(mut self, enabled: bool) -> Self {
        self.follow_symlinks = enabled;
        self
    }

    /// Limit the traversal depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Skip the confirmation prompt
    pub fn yes(mut self, enabled: bool) -> Self {
        self.yes = enabled;
        self
    }

    /// Report without deleting
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Emit JSON instead of the table
    pub fn json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    /// Add a directory name to skip while scanning
    pub fn ignore(mut self, name: impl Into<String>) -> Self {
        self.ignore.push(name.into());
        self
    }

    /// Set the directory-listing concurrency ceiling
    pub fn read_concurrency(mut self, limit: usize) -> Self {
        self.read_concurrency = limit;
        self
    }

    /// Set the stat concurrency ceiling
    pub fn stat_concurrency(mut self, limit: usize) -> Self {
        self.stat_concurrency = limit;
        self
    }

    /// Set the removal concurrency ceiling
    pub fn remove_concurrency(mut self, limit: usize) -> Self {
        self.remove_concurrency = limit;
        self
    }

    /// Set the verbosity level
    pub fn verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    /// Enable quiet mode
    pub fn quiet(mut self, enabled: bool) -> Self {
        self.quiet = enabled;
        self
    }

    /// Build the [`Cli`]
    pub fn build(self) -> Cli {
        Cli {
            root: self.root,
            follow_symlinks: self.follow_symlinks,
            max_depth: self.max_depth,
            yes: self.yes,
            dry_run: self.dry_run,
            json: self.json,
            ignore: self.ignore,
            read_concurrency: self.read_concurrency,
            stat_concurrency: self.stat_concurrency,
            remove_concurrency: self.remove_concurrency,
            verbose: self.verbose,
            quiet: self.quiet,
        }
    }
}

/// Normalize a path to be absolute and clean, without requiring it to exist.
///
/// Relative paths are resolved against the current directory; `.` and `..`
/// components are removed where possible. Symlinks are deliberately not
/// resolved, preserving the path the user asked to scan.
fn normalize_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();

    let absolute = if path.is_relative() {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    } else {
        path.to_path_buf()
    };

    let mut components = Vec::new();
    for component in absolute.components() {
        use std::path::Component;
        match component {
            Component::ParentDir => {
                if let Some(last) = components.last()
                    && !matches!(last, Component::ParentDir)
                {
                    components.pop();
                    continue;
                }
                components.push(component);
            }
            Component::CurDir => continue,
            _ => components.push(component),
        }
    }

    let mut result = PathBuf::new();
    for component in components {
        result.push(component);
    }

    result
}
