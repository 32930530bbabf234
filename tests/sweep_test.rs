use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;

use npsweep::cli::Cli;
use npsweep::commands;
use npsweep::error::SweepError;
use npsweep::executor::Executor;
use npsweep::locator::{ScanOptions, locate_target_dirs};
use npsweep::report::{ScanRecord, ScanReport};
use npsweep::size::directory_size;

/// A small workspace: two projects with populated node_modules, one clean.
fn setup_projects() -> TempDir {
    let temp = TempDir::new().unwrap();

    temp.child("app/node_modules/react/index.js")
        .write_binary(&[0u8; 400])
        .unwrap();
    temp.child("app/node_modules/.bin/tsc")
        .write_binary(&[0u8; 100])
        .unwrap();
    temp.child("app/src/main.js").write_str("code").unwrap();

    temp.child("lib/node_modules/left-pad/index.js")
        .write_binary(&[0u8; 50])
        .unwrap();

    temp.child("clean/src/lib.rs").write_str("pub fn f() {}").unwrap();

    temp
}

#[test]
fn full_run_removes_all_matches() {
    let temp = setup_projects();

    let cli = Cli::builder()
        .root(temp.path())
        .quiet(true)
        .yes(true)
        .build();
    commands::execute(&cli).unwrap();

    temp.child("app/node_modules")
        .assert(predicate::path::missing());
    temp.child("lib/node_modules")
        .assert(predicate::path::missing());
    // Project sources stay untouched.
    temp.child("app/src/main.js")
        .assert(predicate::path::exists());
    temp.child("clean/src/lib.rs")
        .assert(predicate::path::exists());
}

#[test]
fn dry_run_removes_nothing() {
    let temp = setup_projects();

    let cli = Cli::builder()
        .root(temp.path())
        .quiet(true)
        .dry_run(true)
        .build();
    commands::execute(&cli).unwrap();

    temp.child("app/node_modules")
        .assert(predicate::path::exists());
    temp.child("lib/node_modules")
        .assert(predicate::path::exists());
}

#[test]
fn json_mode_without_yes_never_deletes() {
    let temp = setup_projects();

    let cli = Cli::builder().root(temp.path()).json(true).build();
    commands::execute(&cli).unwrap();

    temp.child("app/node_modules")
        .assert(predicate::path::exists());
}

#[test]
fn missing_root_is_fatal() {
    let temp = TempDir::new().unwrap();
    let cli = Cli::builder()
        .root(temp.path().join("does-not-exist"))
        .quiet(true)
        .build();

    let result = commands::execute(&cli);
    assert!(matches!(result, Err(SweepError::RootNotFound { .. })));
}

#[test]
fn run_without_matches_is_a_no_op() {
    let temp = TempDir::new().unwrap();
    temp.child("project/src/deep/tree/file.txt")
        .write_str("hello")
        .unwrap();

    let cli = Cli::builder()
        .root(temp.path())
        .quiet(true)
        .yes(true)
        .build();
    commands::execute(&cli).unwrap();

    temp.child("project/src/deep/tree/file.txt")
        .assert(predicate::path::exists());
}

#[test]
fn scan_and_size_pipeline_reports_expected_totals() {
    let temp = setup_projects();

    let read_executor = Executor::new(4).unwrap();
    let stat_executor = Executor::new(8).unwrap();

    let matches = locate_target_dirs(
        temp.path(),
        &ScanOptions::default(),
        &read_executor,
        |_, _| {},
    );
    assert_eq!(matches.len(), 2);

    let records: Vec<ScanRecord> = matches
        .into_iter()
        .map(|path| {
            let size_bytes = directory_size(&path, false, &read_executor, &stat_executor);
            ScanRecord { path, size_bytes }
        })
        .collect();

    let report = ScanReport::new(records);
    assert_eq!(report.count, 2);
    // app: 400 + 100 bytes, lib: 50 bytes; sorted largest first.
    assert_eq!(report.total_bytes, 550);
    assert!(report.entries[0].path.ends_with("app/node_modules"));
    assert_eq!(report.entries[0].size_bytes, Some(500));
    assert_eq!(report.entries[1].size_bytes, Some(50));
}

#[test]
fn ignored_directories_survive_a_yes_run() {
    let temp = TempDir::new().unwrap();
    temp.child("repo/.git/node_modules/hook.js")
        .write_str("x")
        .unwrap();
    temp.child("repo/node_modules/pkg.js").write_str("y").unwrap();

    let cli = Cli::builder()
        .root(temp.path())
        .quiet(true)
        .yes(true)
        .build();
    commands::execute(&cli).unwrap();

    temp.child("repo/.git/node_modules/hook.js")
        .assert(predicate::path::exists());
    temp.child("repo/node_modules")
        .assert(predicate::path::missing());
}
