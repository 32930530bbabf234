//! # npsweep
//!
//! A CLI tool that locates `node_modules` directories beneath a root path,
//! measures their disk usage, reports them sorted by size, and optionally
//! deletes them after confirmation.
//!
//! ## Overview
//!
//! Old project checkouts accumulate `node_modules` trees that dwarf the
//! code they belong to. npsweep walks a directory tree breadth-first,
//! reports every match with the bytes deleting it would reclaim, and
//! removes the ones you confirm.
//!
//! ## Key Properties
//!
//! - **Bounded concurrency**: directory listings, stat calls, and
//!   deletions each run on their own fixed-width worker pool
//! - **Level-synchronous traversal**: a whole tree level is processed
//!   before the next one starts, so progress reporting is deterministic
//! - **Best-effort by design**: unreadable directories, vanished files,
//!   and failed deletions degrade the result instead of aborting the run
//! - **Symlink aware**: optional following with cycle detection via
//!   canonical real paths
//!
//! ## Architecture
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`commands`]: The run orchestration (scan → size → display → confirm
//!   → delete)
//! - [`error`]: Error types with thiserror + miette
//! - [`executor`]: Bounded, order-preserving parallel execution
//! - [`locator`]: Breadth-first `node_modules` discovery
//! - [`size`]: Parallel directory size aggregation
//! - [`remove`]: Bounded-concurrency deletion with retries
//! - [`report`]: Result records, table and JSON rendering
//!
//! Internal modules (not part of the public API):
//! - `logging`: Verbosity-gated stderr logging
//! - `progress`: indicatif spinner and bars fed by the core's callbacks
//!
//! ## Library Usage
//!
//! While npsweep is primarily a CLI tool, the scanning pipeline is usable
//! as a library:
//!
//! ```no_run
//! use npsweep::executor::Executor;
//! use npsweep::locator::{ScanOptions, locate_target_dirs};
//!
//! let executor = Executor::new(8)?;
//! let matches = locate_target_dirs(
//!     std::path::Path::new("/home/me/projects"),
//!     &ScanOptions::default(),
//!     &executor,
//!     |dirs, found| eprintln!("{dirs} scanned, {found} found"),
//! );
//! # Ok::<(), npsweep::error::SweepError>(())
//! ```
//!
//! ## Error Handling
//!
//! Only a missing scan root fails a run. Everything else (permission
//! errors, directories racing with the scan, deletions that keep failing
//! after retries) is absorbed where it happens and surfaced in the final
//! report.

// Re-export public modules for library usage
pub mod cli;
pub mod commands;
pub mod error;
pub mod executor;
pub mod locator;
pub mod remove;
pub mod report;
pub mod size;

// Internal modules
mod logging;
mod progress;
