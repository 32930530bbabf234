//! The npsweep run: scan → size → display → confirm → delete.
//!
//! This module wires the core components together. The [`execute`] function
//! owns the sequencing and the user interaction; the heavy lifting lives in
//! [`crate::locator`], [`crate::size`], and [`crate::remove`], each fed by
//! bounded executors built from the CLI's three concurrency ceilings.
//!
//! # Example
//!
//! ```no_run
//! use npsweep::cli::Cli;
//! use npsweep::commands;
//!
//! let cli = Cli::builder().root("/tmp/projects").dry_run(true).build();
//! commands::execute(&cli)?;
//! # Ok::<(), npsweep::error::SweepError>(())
//! ```

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::{Result, SweepError};
use crate::executor::Executor;
use crate::locator::{self, TARGET_DIR_NAME};
use crate::logging::Logger;
use crate::progress::{BatchProgress, ScanProgress};
use crate::remove::remove_directories;
use crate::report::{self, ScanRecord, ScanReport, format_size};
use crate::size::measure_directories;

/// Run one full sweep as configured by the CLI.
///
/// Only a missing scan root is fatal. Per-directory failures during
/// scanning and sizing degrade the result, and deletion failures end up in
/// the final summary; none of them abort the run or change the exit status.
pub fn execute(cli: &Cli) -> Result<()> {
    // In JSON mode stdout carries the reports and stderr stays quiet apart
    // from warnings, so machine consumers see a clean stream.
    let logger = Logger::new(cli.verbose(), cli.quiet() || cli.json());
    let interactive = !cli.json() && !cli.quiet() && io::stderr().is_terminal();

    let root = cli.absolute_root();
    if !root.is_dir() {
        return Err(SweepError::RootNotFound { path: root });
    }

    let read_executor = Executor::new(cli.read_concurrency())?;
    let stat_executor = Executor::new(cli.stat_concurrency())?;
    let options = cli.scan_options();

    logger.verbose(
        1,
        format!(
            "Scanning {} (follow symlinks: {}, max depth: {})",
            root.display(),
            options.follow_symlinks,
            options
                .max_depth
                .map_or_else(|| "unbounded".to_string(), |d| d.to_string()),
        ),
    );

    let spinner = ScanProgress::new(interactive);
    let matches = locator::locate_target_dirs(&root, &options, &read_executor, |dirs, found| {
        spinner.update(dirs, found);
    });
    spinner.finish();

    if matches.is_empty() {
        if cli.json() {
            println!("{}", report::to_json(&ScanReport::new(Vec::new()))?);
        } else {
            logger.info(format!(
                "No {TARGET_DIR_NAME} directories found under {}",
                root.display()
            ));
        }
        return Ok(());
    }

    logger.verbose(
        1,
        format!("Found {} {TARGET_DIR_NAME} directories, measuring...", matches.len()),
    );

    let bar = BatchProgress::new(interactive, matches.len() as u64, "Measuring");
    let measured = measure_directories(
        matches,
        cli.follow_symlinks(),
        &read_executor,
        &stat_executor,
        |path, completed| bar.advance(path, completed),
    );
    bar.finish();

    let records = measured
        .into_iter()
        .map(|(path, size_bytes)| ScanRecord { path, size_bytes })
        .collect();

    let scan_report = ScanReport::new(records);
    if cli.json() {
        println!("{}", report::to_json(&scan_report)?);
    } else {
        print!("{}", report::render_table(&scan_report));
    }

    if cli.dry_run() {
        logger.info("Dry run, nothing deleted");
        return Ok(());
    }

    if !confirmed(cli, &scan_report)? {
        logger.info("Nothing deleted");
        return Ok(());
    }

    let targets: Vec<PathBuf> = scan_report
        .entries
        .iter()
        .map(|entry| entry.path.clone())
        .collect();

    let remove_executor = Executor::new(cli.remove_concurrency())?;
    let bar = BatchProgress::new(interactive, targets.len() as u64, "Deleting");
    let removal = remove_directories(&targets, &remove_executor, &|path, completed| {
        bar.advance(path, completed);
    });
    bar.finish();

    for failure in &removal.failures {
        logger.warn(format!(
            "could not remove '{}': {}",
            failure.path.display(),
            failure.error
        ));
    }

    if cli.json() {
        println!("{}", report::to_json(&removal)?);
    } else {
        logger.info(format!(
            "Removed: {}, failed: {}",
            removal.removed_count, removal.failed_count
        ));
    }

    Ok(())
}

/// Decide whether deletion may proceed.
///
/// `--yes` short-circuits; otherwise JSON mode never prompts (an
/// interactive question would corrupt the stream, so it answers no), and
/// the remaining case asks on stderr and reads one line from stdin.
fn confirmed(cli: &Cli, scan_report: &ScanReport) -> Result<bool> {
    if cli.yes() {
        return Ok(true);
    }
    if cli.json() {
        return Ok(false);
    }

    let question = format!(
        "Delete {} director{} ({})?",
        scan_report.count,
        if scan_report.count == 1 { "y" } else { "ies" },
        format_size(scan_report.total_bytes)
    );
    eprint!("{question} [y/N] ");
    io::stderr().flush().map_err(SweepError::Prompt)?;

    let mut answer = String::new();
    io::stdin()
        .read_line(&mut answer)
        .map_err(SweepError::Prompt)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}
