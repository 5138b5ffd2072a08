//! CLI integration tests for the `bugs` binary.
//!
//! Uses `assert_cmd` to spawn the binary and verify exit codes, stdout
//! content, and stderr content.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn bugs() -> Command {
    cargo_bin_cmd!("bugs")
}

/// Write `src` to a temporary .bugs file; keep the TempDir alive while used.
fn source_file(src: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("input.bugs");
    fs::write(&path, src).unwrap();
    (tmp, path)
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    bugs()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bugs language parser"));
}

#[test]
fn version_exits_0() {
    bugs()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bugs"));
}

// ──────────────────────────────────────────────
// 2. Check subcommand
// ──────────────────────────────────────────────

#[test]
fn check_valid_program_exits_0() {
    bugs()
        .arg("check")
        .arg(fixture("walker.bugs"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "(2 bug definition(s), 2 function(s))",
        ));
}

#[test]
fn check_json_output_reports_counts() {
    let out = bugs()
        .args(["--output", "json", "check"])
        .arg(fixture("walker.bugs"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["ok"], true);
    assert_eq!(value["rule"], "program");
    assert_eq!(value["bugs"], 2);
    assert_eq!(value["functions"], 2);
}

#[test]
fn check_missing_brace_reports_line() {
    bugs()
        .arg("check")
        .arg(fixture("missing_brace.bugs"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Line 5: expected '}'"));
}

#[test]
fn check_json_error_object() {
    let out = bugs()
        .args(["check", "--output", "json"])
        .arg(fixture("missing_brace.bugs"))
        .assert()
        .failure()
        .code(1)
        .get_output()
        .stderr
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["kind"], "syntax");
    assert_eq!(value["line"], 5);
}

#[test]
fn check_quiet_suppresses_output() {
    bugs()
        .args(["--quiet", "check"])
        .arg(fixture("missing_brace.bugs"))
        .assert()
        .failure()
        .stderr(predicate::str::is_empty());
    bugs()
        .args(["--quiet", "check"])
        .arg(fixture("walker.bugs"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn check_single_rule() {
    let (_tmp, path) = source_file("2 + 3 * 4\n");
    bugs()
        .args(["check", "--rule", "expression"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("(expression, 5 nodes)"));
}

#[test]
fn check_rule_that_does_not_match() {
    let (_tmp, path) = source_file("move 1\n");
    bugs()
        .args(["check", "--rule", "loop-statement"])
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does not start with a loop-statement"));
}

#[test]
fn check_unknown_rule_is_a_usage_error() {
    let (_tmp, path) = source_file("move 1\n");
    bugs()
        .args(["check", "--rule", "sentence"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown rule 'sentence'"));
}

#[test]
fn check_nonexistent_file_exits_1() {
    bugs()
        .args(["check", "nonexistent_file_xyz.bugs"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error reading file"));
}

// ──────────────────────────────────────────────
// 3. Tokens subcommand
// ──────────────────────────────────────────────

#[test]
fn tokens_text_lists_kinds() {
    let (_tmp, path) = source_file("move x <= 5\n");
    bugs()
        .arg("tokens")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("KEYWORD move"))
        .stdout(predicate::str::contains("NUMBER  5.0"))
        .stdout(predicate::str::contains("EOF     EOF"));
}

#[test]
fn tokens_json_is_an_array() {
    let (_tmp, path) = source_file("a\nb");
    let out = bugs()
        .args(["tokens", "--output", "json"])
        .arg(&path)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let tokens = value.as_array().unwrap();
    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[0]["kind"], "NAME");
    assert_eq!(tokens[1]["kind"], "EOL");
    assert_eq!(tokens[2]["line"], 2);
}
