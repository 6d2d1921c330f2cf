//! CLI integration tests using assert_cmd.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `gradebook` command pointed at a config file that does not exist, so
/// every run starts from the built-in defaults.
fn gradebook(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("gradebook").unwrap();
    cmd.arg("--config").arg(dir.path().join("missing.toml"));
    cmd
}

#[test]
fn demo_prints_summary() {
    let dir = TempDir::new().unwrap();
    gradebook(&dir)
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total students: 4"))
        .stdout(predicate::str::contains("Total grades: 7"))
        .stdout(predicate::str::contains("Mathematics class average: 89.00"))
        .stdout(predicate::str::contains("1. Jane Smith"))
        .stdout(predicate::str::contains("Partial matches: John Doe, Michael Johnson"))
        .stdout(predicate::str::contains("1. Jane Smith: 92.00"))
        .stdout(predicate::str::contains("2. John Doe: 87.50"));
}

#[test]
fn self_tests_pass() {
    let dir = TempDir::new().unwrap();
    gradebook(&dir)
        .arg("test")
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed: 0"))
        .stdout(predicate::str::contains("All tests passed!"));
}

#[test]
fn report_text() {
    let dir = TempDir::new().unwrap();
    gradebook(&dir)
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("CLASS REPORT"))
        .stdout(predicate::str::contains("Students:      5"))
        .stdout(predicate::str::contains("Top 5 performers:"));
}

#[test]
fn report_json() {
    let dir = TempDir::new().unwrap();
    let output = gradebook(&dir)
        .args(["report", "--json", "--top", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["students"], 5);
    assert_eq!(report["total_grades"], 45);
    assert_eq!(report["top_performers"].as_array().unwrap().len(), 2);
    assert_eq!(report["top_performers"][0]["name"], "Dabe Dabe");
}

#[test]
fn interactive_exit() {
    let dir = TempDir::new().unwrap();
    gradebook(&dir)
        .write_stdin("16\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("STUDENT GRADE MANAGEMENT SYSTEM"))
        .stdout(predicate::str::contains("Thank you for using"));
}

#[test]
fn interactive_session_reports_errors_and_continues() {
    let dir = TempDir::new().unwrap();
    gradebook(&dir)
        .write_stdin("6\nNobody\n6\nDabe Dabe\n16\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Student not found"))
        .stdout(predicate::str::contains("Please try again with valid inputs."))
        .stdout(predicate::str::contains("Detailed Report: Dabe Dabe"));
}

#[test]
fn interactive_survives_malformed_input_line() {
    let dir = TempDir::new().unwrap();
    let mut stdin = vec![0xff, 0xfe, b'\n'];
    stdin.extend_from_slice(b"15\nKatlo Bonno\nEnglish\nr\n0\n16\n");
    gradebook(&dir)
        .write_stdin(stdin)
        .assert()
        .success()
        .stdout(predicate::str::contains("input line is not valid UTF-8"))
        .stdout(predicate::str::contains("Removed grade 65 from Katlo Bonno's English"))
        .stdout(predicate::str::contains("Thank you for using"));
}

#[test]
fn interactive_empty_flag_skips_sample_data() {
    let dir = TempDir::new().unwrap();
    gradebook(&dir)
        .args(["interactive", "--empty"])
        .write_stdin("7\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No data available"));
}

#[test]
fn config_path_uses_override() {
    let dir = TempDir::new().unwrap();
    gradebook(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("missing.toml"));
}

#[test]
fn config_show_json() {
    let dir = TempDir::new().unwrap();
    gradebook(&dir)
        .args(["config", "show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"top_performers\": 5"))
        .stdout(predicate::str::contains("Mathematics"));
}

#[test]
fn config_file_changes_curriculum() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[gradebook]\nsubjects = [\"History\"]\n").unwrap();

    #[allow(deprecated)]
    Command::cargo_bin("gradebook")
        .unwrap()
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Subjects:           History"));
}

#[test]
fn config_validate_rejects_bad_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[display]\nbar_step_percent = 0\n").unwrap();

    gradebook(&dir)
        .args(["config", "validate", "--file"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("bar_step_percent"));
}

#[test]
fn unknown_command_fails() {
    let dir = TempDir::new().unwrap();
    gradebook(&dir)
        .arg("frobnicate")
        .assert()
        .failure();
}
