//! End-to-end tests for `cssdiff compare`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

const MISSING_AND_COMMON: &str = r#"{
  "type": "stylesheet",
  "stylesheet": { "rules": [
    { "type": "rule", "selectors": [".missing"],
      "declarations": [{ "type": "declaration", "property": "display", "value": "none" }] },
    { "type": "rule", "selectors": [".common"],
      "declarations": [{ "type": "declaration", "property": "display", "value": "none" }] }
  ] }
}"#;

const EXTRA_AND_COMMON: &str = r#"{
  "type": "stylesheet",
  "stylesheet": { "rules": [
    { "type": "rule", "selectors": [".extra"],
      "declarations": [{ "type": "declaration", "property": "display", "value": "none" }] },
    { "type": "comment", "comment": " kept out of the comparison " },
    { "type": "rule", "selectors": [".common"],
      "declarations": [{ "type": "declaration", "property": "display", "value": "none" }] }
  ] }
}"#;

const COSMETIC_A: &str = r##"{
  "type": "stylesheet",
  "stylesheet": { "rules": [
    { "type": "rule", "selectors": ["a"],
      "declarations": [
        { "type": "declaration", "property": "color", "value": "#FFFFFF" },
        { "type": "comment", "comment": " this is a comment " },
        { "type": "declaration", "property": "font", "value": "\"Roboto\"" }
      ] }
  ] }
}"##;

const COSMETIC_B: &str = r##"{
  "type": "stylesheet",
  "stylesheet": { "rules": [
    { "type": "rule", "selectors": ["a"],
      "declarations": [
        { "type": "declaration", "property": "color", "value": "#ffffff" },
        { "type": "declaration", "property": "font", "value": "'Roboto'" }
      ] }
  ] }
}"##;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn cssdiff(args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cssdiff"));
    cmd.arg("compare").args(args).env_remove("RUST_LOG");
    cmd
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn cosmetic_differences_exit_zero() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.json", COSMETIC_A);
    let b = write(&dir, "b.json", COSMETIC_B);

    let output = cssdiff(&[arg(&a), arg(&b)]).output().expect("run cssdiff");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "changed: false\n");
}

#[test]
fn structural_differences_exit_one_with_report() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.json", MISSING_AND_COMMON);
    let b = write(&dir, "b.json", EXTRA_AND_COMMON);

    let output = cssdiff(&[arg(&a), arg(&b)]).output().expect("run cssdiff");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("changed: true\n"));
    assert!(stdout.contains("- .missing\n"));
    assert!(stdout.contains("+ .extra\n"));
    assert!(!stdout.contains(".common"));
}

#[test]
fn json_format() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.json", MISSING_AND_COMMON);
    let b = write(&dir, "b.json", EXTRA_AND_COMMON);

    let output = cssdiff(&[arg(&a), arg(&b), "--format", "json"])
        .output()
        .expect("run cssdiff");

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["changed"], true);
    assert_eq!(report["extra"].as_array().unwrap().len(), 1);
    assert_eq!(report["missing"].as_array().unwrap().len(), 1);
}

#[test]
fn quiet_only_sets_status() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.json", MISSING_AND_COMMON);
    let b = write(&dir, "b.json", EXTRA_AND_COMMON);

    let output = cssdiff(&[arg(&a), arg(&b), "--quiet"])
        .output()
        .expect("run cssdiff");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn reads_one_side_from_stdin() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.json", COSMETIC_A);

    let mut child = cssdiff(&[arg(&a), "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn cssdiff");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(COSMETIC_B.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn invalid_input_exits_two() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.json", MISSING_AND_COMMON);
    let b = write(&dir, "b.json", r#"{ "type": "rule", "selectors": ["a"] }"#);

    let output = cssdiff(&[arg(&a), arg(&b)]).output().expect("run cssdiff");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("second stylesheet"));
    assert!(stderr.contains("invalid input"));
}

#[test]
fn missing_file_exits_two() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.json", MISSING_AND_COMMON);
    let missing = dir.path().join("nope.json");

    let output = cssdiff(&[arg(&a), arg(&missing)]).output().expect("run cssdiff");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read"));
}
