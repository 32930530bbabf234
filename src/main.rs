//! # npsweep CLI
//!
//! Finds every `node_modules` directory under a root path, measures what
//! deleting it would reclaim, reports the results sorted by size, and,
//! after confirmation, deletes them.
//!
//! ## Usage
//!
//! ```bash
//! # Scan the current directory and ask before deleting anything
//! npsweep
//!
//! # Scan a projects folder, report only
//! npsweep ~/projects --dry-run
//!
//! # Non-interactive cleanup for scripts
//! npsweep ~/projects --yes
//!
//! # Machine-readable report
//! npsweep ~/projects --json --dry-run
//! ```
//!
//! ## Environment Variables
//!
//! Every flag is also readable from an `NPSWEEP_*` environment variable,
//! e.g. `NPSWEEP_MAX_DEPTH`, `NPSWEEP_FOLLOW_SYMLINKS`, `NPSWEEP_QUIET`.

use std::io::IsTerminal;

use npsweep::cli::Cli;

fn main() -> miette::Result<()> {
    // Install miette's fancy panic and error report handler
    miette::set_panic_hook();

    // Configure miette handler based on terminal capabilities
    if std::io::stderr().is_terminal() {
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::unicode_nocolor())
                    .with_context_lines(3),
            )
        }))?;
    } else {
        // Simpler handler for non-TTY environments (scripts, CI, logs)
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::none())
                    .with_context_lines(0),
            )
        }))?;
    }

    let cli = Cli::parse_args();

    npsweep::commands::execute(&cli).map_err(Into::into)
}
