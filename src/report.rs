//! Result records and rendering.
//!
//! The core produces plain data (matched paths with measured sizes, and
//! deletion outcomes) and this module turns it into the two output shapes:
//! a styled table for humans and JSON for `--json` consumers. Sizes render
//! in binary units (KiB, MiB, ...); a failed measurement renders as `?` in
//! the table and `null` in JSON, and counts as zero toward the total.

use std::fmt::Write as _;
use std::path::PathBuf;

use console::style;
use serde::Serialize;

use crate::error::{Result, SweepError};

/// One matched `node_modules` directory with its measured size.
///
/// `size_bytes` is `None` when the directory could not be measured at all;
/// the total deliberately counts that as zero, understating rather than
/// failing the run.
#[derive(Debug, Clone, Serialize)]
pub struct ScanRecord {
    pub path: PathBuf,
    pub size_bytes: Option<u64>,
}

/// The full scan result, sorted descending by size.
#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub total_bytes: u64,
    pub count: usize,
    pub entries: Vec<ScanRecord>,
}

impl ScanReport {
    /// Build a report from raw records, sorting them largest-first.
    pub fn new(mut entries: Vec<ScanRecord>) -> Self {
        entries.sort_by(|a, b| {
            b.size_bytes
                .unwrap_or(0)
                .cmp(&a.size_bytes.unwrap_or(0))
                .then_with(|| a.path.cmp(&b.path))
        });
        let total_bytes = entries.iter().filter_map(|e| e.size_bytes).sum();
        Self {
            total_bytes,
            count: entries.len(),
            entries,
        }
    }
}

/// Format size in human-readable binary units
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB"];
    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit_idx])
    }
}

/// Render the scan report as an aligned two-column table with a total line.
pub fn render_table(report: &ScanReport) -> String {
    let mut out = String::new();

    // Pad before styling so ANSI escapes do not skew the column width.
    for entry in &report.entries {
        let size = match entry.size_bytes {
            Some(bytes) => format_size(bytes),
            None => "?".to_string(),
        };
        let _ = writeln!(
            out,
            "{}  {}",
            style(format!("{size:>10}")).cyan(),
            entry.path.display()
        );
    }

    let _ = writeln!(
        out,
        "{}  {}",
        style(format!("{:>10}", format_size(report.total_bytes))).bold(),
        style(format!(
            "total across {} director{}",
            report.count,
            if report.count == 1 { "y" } else { "ies" }
        ))
        .dim()
    );

    out
}

/// Serialize any report to pretty JSON for `--json` output.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(SweepError::Json)
}
