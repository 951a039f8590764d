//! Integration tests for the pytrack report viewer
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests

use assert_cmd::Command;
use predicates::prelude::*;
use pytrack::Tracker;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_snapshot(dir: &TempDir, with_functions: bool) -> PathBuf {
    let tracker = Tracker::new("cli");
    if with_functions {
        tracker.measure("load", || ());
        tracker.measure("load", || ());
        tracker.measure("store", || ());
    }
    tracker.record_event("start");
    let path = dir.path().join("report.json");
    tracker.save(&path).unwrap();
    path
}

#[test]
fn test_text_summary() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(&dir, true);

    let mut cmd = Command::cargo_bin("pytrack").unwrap();
    cmd.arg(&snapshot);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("📊 PyTrack Report: cli\n"))
        .stdout(predicate::str::contains(" - load: 2 calls, avg "))
        .stdout(predicate::str::contains(" - store: 1 calls, avg "))
        .stdout(predicate::str::contains("Events:\n - start: 1 times"));
}

#[test]
fn test_json_output_parses() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(&dir, true);

    let mut cmd = Command::cargo_bin("pytrack").unwrap();
    cmd.arg("--format").arg("json").arg(&snapshot);

    let output = cmd.output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\n    \"name\": \"cli\""));
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["functions"]["load"]["calls"], 2);
    assert_eq!(parsed["events"]["start"], 1);
}

#[test]
fn test_name_override() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(&dir, false);

    let mut cmd = Command::cargo_bin("pytrack").unwrap();
    cmd.arg("--name").arg("nightly").arg(&snapshot);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("📊 PyTrack Report: nightly"));
}

#[test]
fn test_plot_without_functions() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(&dir, false);

    let mut cmd = Command::cargo_bin("pytrack").unwrap();
    cmd.arg("--plot").arg(&snapshot);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No performance data to plot"))
        .stdout(predicate::str::contains("Function Calls").not());
}

#[test]
fn test_plot_to_terminal() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(&dir, true);

    let mut cmd = Command::cargo_bin("pytrack").unwrap();
    cmd.arg("--plot").arg(&snapshot);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("PyTrack Performance Report: cli"))
        .stdout(predicate::str::contains("Function Calls (Number of Calls)"))
        .stdout(predicate::str::contains("Average Exec. Time (Time (seconds))"))
        .stdout(predicate::str::contains("█"));
}

#[test]
fn test_plot_output_svg() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(&dir, true);
    let svg_path = dir.path().join("perf.svg");

    let mut cmd = Command::cargo_bin("pytrack").unwrap();
    cmd.arg("--plot-output").arg(&svg_path).arg(&snapshot);
    cmd.assert().success();

    let svg = std::fs::read_to_string(&svg_path).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Function Calls"));
    assert!(svg.contains("Average Exec. Time"));
}

#[test]
fn test_config_applies_chart_width() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(&dir, true);
    let config = dir.path().join("pytrack.toml");
    std::fs::write(&config, "[chart]\nwidth = 640\npanel_height = 300\n").unwrap();
    let svg_path = dir.path().join("perf.svg");

    let mut cmd = Command::cargo_bin("pytrack").unwrap();
    cmd.arg("--config")
        .arg(&config)
        .arg("--plot-output")
        .arg(&svg_path)
        .arg(&snapshot);
    cmd.assert().success();

    let svg = std::fs::read_to_string(&svg_path).unwrap();
    assert!(svg.contains("width=\"640\" height=\"650\""));
}

#[test]
fn test_config_name_used_unless_overridden() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(&dir, false);
    let config = dir.path().join("pytrack.toml");
    std::fs::write(&config, "name = \"from-config\"\n").unwrap();

    let mut cmd = Command::cargo_bin("pytrack").unwrap();
    cmd.arg("--config").arg(&config).arg(&snapshot);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("📊 PyTrack Report: from-config"));

    let mut cmd = Command::cargo_bin("pytrack").unwrap();
    cmd.arg("--config")
        .arg(&config)
        .arg("--name")
        .arg("flag")
        .arg(&snapshot);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("📊 PyTrack Report: flag"));
}

#[test]
fn test_stale_average_recomputed_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stale.json");
    std::fs::write(
        &path,
        r#"{"name":"stale","functions":{"f":{"calls":2,"total_time":1.0,"avg_time":7.0}},"events":{}}"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("pytrack").unwrap();
    cmd.arg(&path);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(" - f: 2 calls, avg 0.5000s"));
}

#[test]
fn test_missing_snapshot_fails() {
    let mut cmd = Command::cargo_bin("pytrack").unwrap();
    cmd.arg("/nonexistent/report.json");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load snapshot"));
}

#[test]
fn test_invalid_snapshot_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{\"name\": ").unwrap();

    let mut cmd = Command::cargo_bin("pytrack").unwrap();
    cmd.arg(&path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid snapshot JSON"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let snapshot = write_snapshot(&dir, true);
    let config = dir.path().join("pytrack.toml");
    std::fs::write(&config, "[chart]\nwidth = 0\n").unwrap();

    let mut cmd = Command::cargo_bin("pytrack").unwrap();
    cmd.arg("--config").arg(&config).arg(&snapshot);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("chart.width"));
}
