// End-to-end tests for the cohcheck binary and its exit status

use std::path::PathBuf;
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn cohcheck(args: &[&str], dump: &PathBuf) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cohcheck"))
        .args(args)
        .arg(dump)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run cohcheck")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_clean_dump_exits_zero() {
    let output = cohcheck(&[], &fixture("mesi_clean.out"));

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).ends_with("PASS: 4 cache(s) verified\n"));
}

#[test]
fn test_violation_exits_one() {
    let output = cohcheck(&[], &fixture("mesi_violation.out"));

    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("M in cache 0 but S in cache 1 (tag 5, set 2)"));
    assert!(text.ends_with("FAIL: 5 violation(s)\n"));
}

#[test]
fn test_fail_fast_exits_one() {
    let output = cohcheck(&["--fail-fast"], &fixture("mesi_violation.out"));

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).ends_with("FAIL: 1 violation(s) (stopped at first)\n"));
}

#[test]
fn test_json_format() {
    let output = cohcheck(&["--format", "json"], &fixture("mesi_violation.out"));

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is not JSON");
    assert_eq!(value["passed"], false);
    assert_eq!(value["violations"].as_array().map(Vec::len), Some(5));
}

#[test]
fn test_format_error_exits_two_with_empty_stdout() {
    let output = cohcheck(&[], &fixture("malformed.out"));

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty(), "stdout: {}", stdout(&output));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 5"), "stderr: {}", stderr);
}

#[test]
fn test_missing_file_exits_two() {
    let output = cohcheck(&[], &fixture("does_not_exist.out"));

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_bad_usage_exits_two() {
    let output = cohcheck(&["--format", "xml"], &fixture("mesi_clean.out"));

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}
