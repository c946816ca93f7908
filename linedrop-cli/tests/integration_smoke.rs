//! Smoke tests for the linedrop binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn linedrop() -> Command {
    let mut cmd = Command::cargo_bin("linedrop").unwrap();
    // Keep the user's config out of the tests
    cmd.env("LINEDROP_CONFIG", "/nonexistent/linedrop/config.toml");
    cmd.env_remove("RUST_LOG");
    cmd
}

// === Help ===

#[test]
fn test_dispatch_help() {
    linedrop()
        .arg("dispatch")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cursor offset in characters"));
}

#[test]
fn test_top_level_help_lists_config_subcommands() {
    linedrop()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init, get, list, validate, path"))
        .stdout(predicate::str::contains("show").not());
}

#[test]
fn test_drain_help() {
    linedrop()
        .arg("drain")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Number of empty slots"));
}

// === Dispatch ===

#[test]
fn test_dispatch_cursor_from_stdin() {
    linedrop()
        .args(["dispatch", "--slots", "filled,,", "--cursor", "3"])
        .write_stdin("abc\ndef")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""line": "abc""#))
        .stdout(predicate::str::contains(r#""updated_buffer": "def""#))
        .stdout(predicate::str::contains(r#""updated_slot_index": 1"#))
        .stdout(predicate::str::contains(r#""cursor": "range""#));
}

#[test]
fn test_dispatch_legacy_selection() {
    linedrop()
        .args(["dispatch", "--slots", ",", "--legacy-selection", "6:3", "--format", "text"])
        .write_stdin("abcdef\nghi")
        .assert()
        .success()
        .stdout(predicate::str::contains("slot 0 <- abc"));
}

#[test]
fn test_dispatch_without_cursor_takes_nothing() {
    linedrop()
        .args(["dispatch", "--slots", ",", "--format", "text"])
        .write_stdin("abc\ndef")
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing before the cursor"));
}

#[test]
fn test_dispatch_input_dash_reads_stdin() {
    linedrop()
        .args(["dispatch", "--input", "-", "--slots", ",", "--cursor", "3"])
        .write_stdin("abc\ndef")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""line": "abc""#))
        .stdout(predicate::str::contains(r#""updated_buffer": "def""#));
}

#[test]
fn test_dispatch_first_line_single_line_is_noop() {
    linedrop()
        .args(["dispatch", "--variant", "first-line", "--slots", ","])
        .write_stdin("onlyoneline")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""buffer_changed": false"#))
        .stdout(predicate::str::contains(r#""line": null"#));
}

#[test]
fn test_dispatch_full_row_drops_line() {
    linedrop()
        .args(["dispatch", "--slots", "a,b", "--cursor", "1", "--format", "text"])
        .write_stdin("x\ny")
        .assert()
        .success()
        .stdout(predicate::str::contains("no empty slot, dropped: x"));
}

#[test]
fn test_dispatch_in_place_rewrites_files() {
    let dir = tempfile::tempdir().unwrap();
    let buffer = dir.path().join("paste.txt");
    let slots = dir.path().join("slots.json");
    fs::write(&buffer, "\n  foo\nbar\nbaz").unwrap();
    fs::write(&slots, r#"["", ""]"#).unwrap();

    linedrop()
        .arg("dispatch")
        .arg("--input")
        .arg(&buffer)
        .arg("--slots-file")
        .arg(&slots)
        .args(["--variant", "first-line", "--in-place"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&buffer).unwrap(), "bar\nbaz");
    let values: Vec<String> = serde_json::from_str(&fs::read_to_string(&slots).unwrap()).unwrap();
    assert_eq!(values, vec!["foo", ""]);
}

#[test]
fn test_in_place_needs_a_file() {
    linedrop()
        .args(["dispatch", "--in-place"])
        .write_stdin("abc")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--in-place needs a buffer file"));
}

// === Drain ===

#[test]
fn test_drain_fills_slots_in_order() {
    linedrop()
        .args(["drain", "--slots", "5", "--quiet"])
        .write_stdin("one\n\n  two\nthree\n")
        .assert()
        .success()
        .stdout(predicate::str::diff("0\tone\n1\ttwo\n2\tthree\n"));
}

#[test]
fn test_drain_json_reports_leftovers() {
    linedrop()
        .args(["drain", "--slots", "1", "--format", "json", "--quiet"])
        .write_stdin("one\ntwo\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""stopped": "slots-full""#))
        .stdout(predicate::str::contains(r#""remaining": "two""#));
}

// === Config ===

#[test]
fn test_config_init_and_validate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    linedrop()
        .env("LINEDROP_CONFIG", &path)
        .args(["config", "init"])
        .assert()
        .success();

    linedrop()
        .env("LINEDROP_CONFIG", &path)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration valid"));

    linedrop()
        .env("LINEDROP_CONFIG", &path)
        .args(["config", "get", "tui.reparse_key"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ctrl-r"));
}

#[test]
fn test_config_variant_is_default_for_dispatch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[dispatch]\nvariant = \"first-line\"\n").unwrap();

    linedrop()
        .env("LINEDROP_CONFIG", &path)
        .args(["dispatch", "--slots", ","])
        .write_stdin("  alpha\nbeta")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""variant": "first-line""#))
        .stdout(predicate::str::contains(r#""line": "alpha""#));
}

// === Completions ===

#[test]
fn test_completions_bash() {
    linedrop()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("linedrop"));
}
