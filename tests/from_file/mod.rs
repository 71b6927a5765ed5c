//! Integration tests running the actual crate binary against the fixtures in `tests/data/`: the full E2E path.

use std::process::Command;

use crate::support::data_dir;

#[test]
fn markdown_report_on_stdout() {
    let expected = std::fs::read_to_string(data_dir().join("two_days_expected.md"))
        .expect("failed to read expected output fixture");

    // Run from the data directory so that the report lists a relative path
    let output = Command::new(env!("CARGO_BIN_EXE_access-log-stats"))
        .current_dir(data_dir())
        .args(["--path", "two_days.log"])
        .output()
        .expect("failed to execute binary");

    assert!(
        output.status.success(),
        "binary exited with non-zero status.\nstderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("binary output was not valid UTF-8");
    assert_eq!(stdout.trim_end(), expected.trim_end());
}

#[test]
fn json_report_into_a_file() {
    let out_dir = tempfile::tempdir().unwrap();
    let report_path = out_dir.path().join("report.json");

    let output = Command::new(env!("CARGO_BIN_EXE_access-log-stats"))
        .current_dir(data_dir())
        .args(["-p", "two_days.log", "--format", "JSON", "--from", "2024-10-23"])
        .arg("-o")
        .arg(&report_path)
        .output()
        .expect("failed to execute binary");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(output.stdout.is_empty(), "the report must not go to stdout");

    let report: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&report_path).unwrap()).unwrap();
    assert_eq!(report["total_requests"], 3);
    assert_eq!(report["avg_requests_per_day"], 3);
}

#[test]
fn malformed_input_exits_with_failure() {
    let output = Command::new(env!("CARGO_BIN_EXE_access-log-stats"))
        .current_dir(data_dir())
        .args(["--path", "malformed.log"])
        .env("LOG_FORMAT", "json")
        .output()
        .expect("failed to execute binary");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("malformed line #2"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn unknown_format_is_rejected_by_the_cli() {
    let output = Command::new(env!("CARGO_BIN_EXE_access-log-stats"))
        .current_dir(data_dir())
        .args(["--path", "two_days.log", "--format", "pdf"])
        .output()
        .expect("failed to execute binary");

    assert!(!output.status.success());
}

#[test]
fn help_lists_filterable_fields() {
    let output = Command::new(env!("CARGO_BIN_EXE_access-log-stats"))
        .arg("--help")
        .output()
        .expect("failed to execute binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Filterable fields: RemoteAddress, RemoteUser, TimeLocal"),
        "unexpected help: {stdout}"
    );
}
