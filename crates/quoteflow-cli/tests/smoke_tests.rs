//! Smoke tests for the quoteflow CLI
//!
//! Every journey here runs against the simulated site, so no browser is
//! needed.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Get a command for the quoteflow binary, isolated in `dir`
fn quoteflow(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("quoteflow").expect("quoteflow binary should exist");
    cmd.current_dir(dir)
        .env_remove("QUOTEFLOW_CONFIG")
        .env_remove("QUOTEFLOW_DATA")
        .env_remove("QUOTEFLOW_OUTPUT")
        .env_remove("QUOTEFLOW_LOG_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

/// Project directory populated by `quoteflow init`
fn initialized() -> TempDir {
    let dir = TempDir::new().unwrap();
    quoteflow(dir.path()).arg("init").assert().success();
    dir
}

/// Rewrite quote.csv without `column`
fn drop_column(dir: &Path, column: &str) {
    let path = dir.join("quote.csv");
    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    let headers: Vec<&str> = lines.next().unwrap().split(',').collect();
    let values: Vec<&str> = lines.next().unwrap().split(',').collect();
    let keep: Vec<usize> = (0..headers.len()).filter(|i| headers[*i] != column).collect();
    let pick = |row: &[&str]| keep.iter().map(|i| row[*i]).collect::<Vec<_>>().join(",");
    fs::write(&path, format!("{}\n{}\n", pick(&headers), pick(&values))).unwrap();
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    quoteflow(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.4.0"));
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    quoteflow(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("check-data"))
        .stdout(predicate::str::contains("steps"));
}

#[test]
fn test_no_args_fails() {
    let dir = TempDir::new().unwrap();
    quoteflow(dir.path()).assert().failure();
}

// ============================================================================
// Steps and config
// ============================================================================

#[test]
fn test_steps_lists_journey() {
    let dir = TempDir::new().unwrap();
    quoteflow(dir.path())
        .arg("steps")
        .assert()
        .success()
        .stdout(predicate::str::contains("Purchase Vehicle"))
        .stdout(predicate::str::contains("vehicle_data"))
        .stdout(predicate::str::contains("Make"))
        .stdout(predicate::str::contains("email_success"));
}

#[test]
fn test_config_prints_defaults() {
    let dir = TempDir::new().unwrap();
    quoteflow(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("element_timeout_ms"))
        .stdout(predicate::str::contains("Purchase Vehicle"));
}

// ============================================================================
// Init and check-data
// ============================================================================

#[test]
fn test_init_then_check_data() {
    let dir = initialized();
    assert!(dir.path().join("quoteflow.yaml").is_file());
    assert!(dir.path().join("quote.csv").is_file());

    quoteflow(dir.path())
        .args(["--color", "never", "check-data"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All 26 fields present"));
}

#[test]
fn test_init_twice_needs_force() {
    let dir = initialized();
    quoteflow(dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
    quoteflow(dir.path()).args(["init", "--force"]).assert().success();
}

#[test]
fn test_check_data_reports_missing_column() {
    let dir = initialized();
    drop_column(dir.path(), "FirstName");

    quoteflow(dir.path())
        .arg("check-data")
        .assert()
        .failure()
        .stderr(predicate::str::contains("FirstName"));
}

#[test]
fn test_check_data_unreadable_file() {
    let dir = TempDir::new().unwrap();
    quoteflow(dir.path())
        .args(["check-data", "--data", "absent.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.csv"));
}

// ============================================================================
// Simulated runs
// ============================================================================

#[test]
fn test_simulated_run_writes_report() {
    let dir = initialized();
    quoteflow(dir.path())
        .args(["--color", "never", "run", "--simulate", "--output", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PASSED"));

    let report = fs::read_to_string(dir.path().join("out/purchase-vehicle-report.json")).unwrap();
    assert!(report.contains("\"done\""));
    assert!(!report.contains("Secret123!"));
}

#[test]
fn test_failed_simulated_run_still_writes_report() {
    let dir = initialized();
    drop_column(dir.path(), "FirstName");

    quoteflow(dir.path())
        .args(["run", "--simulate", "--output", "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("insurant_data"));

    let out = dir.path().join("out");
    let report = fs::read_to_string(out.join("purchase-vehicle-report.json")).unwrap();
    assert!(report.contains("column_not_found"));
    assert!(out.join("purchase-vehicle-failure.png").is_file());
}
