//! Command-line behavior that does not need an interactive terminal.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn jpterm() -> Command {
    Command::cargo_bin("jpterm").unwrap()
}

#[test]
fn version_prints_and_exits_zero() {
    jpterm()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("jpterm"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn help_lists_options() {
    jpterm()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--output-mode"))
        .stdout(predicate::str::contains("--output-file"));
}

#[test]
fn missing_input_file_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    jpterm()
        .arg(dir.path().join("absent.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Unable to load the input JSON:"));
}

#[test]
fn invalid_input_file_exits_one() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{\"a\": ").unwrap();

    jpterm()
        .arg(file.path())
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Unable to load the input JSON:"));
}

#[test]
fn unknown_output_mode_is_rejected() {
    jpterm()
        .args(["-m", "loud"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("loud"));
}

#[test]
fn invalid_input_writes_no_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.json");
    let output = dir.path().join("out.json");
    std::fs::write(&input, "not json").unwrap();

    jpterm()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .code(1);

    assert!(!output.exists());
}
