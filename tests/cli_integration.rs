//! Integration tests for the `orgtree` CLI.
//!
//! Each test writes outline files into a temp directory, runs `orgtree` as a
//! subprocess, and checks stdout and/or file contents.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Get the path to the built `orgtree` binary.
fn orgtree_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_orgtree"))
}

const SAMPLE: &str = "\
* TODO Buy milk
SCHEDULED: <2024-01-05 09:00>
Remember reusable bags
* Chores
** DONE Laundry
** TODO Dishes
DEADLINE: <2024-01-06 18:00>
* DONE Pay rent
";

fn write_sample(dir: &Path) -> PathBuf {
    let path = dir.join("todo.org");
    fs::write(&path, SAMPLE).unwrap();
    path
}

/// Run `orgtree` with the given args in the given directory, returning (stdout, stderr, success).
fn run(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(orgtree_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("ORGTREE_LOG")
        .output()
        .expect("failed to run orgtree");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `orgtree` expecting success, return stdout.
fn run_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run(dir, args);
    if !success {
        panic!(
            "orgtree {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

#[test]
fn test_parse_prints_tree() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_sample(tmp.path());

    let out = run_ok(tmp.path(), &["parse", "todo.org"]);
    assert!(out.contains("1 TODO Buy milk [scheduled 2024-01-05 09:00] (+1 line)"));
    assert!(out.contains("  2.2 TODO Dishes [deadline 2024-01-06 18:00]"));
    assert!(out.contains("3 DONE Pay rent"));
}

#[test]
fn test_parse_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_sample(tmp.path());

    let out = run_ok(tmp.path(), &["parse", "todo.org", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["kind"], "ROOT");
    let children = parsed["children"].as_array().unwrap();
    assert_eq!(children.len(), 3);
    assert_eq!(children[0]["title"], "Buy milk");
    assert_eq!(children[1]["children"][1]["deadline"], "2024-01-06 18:00");
}

#[test]
fn test_parse_missing_file_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run(tmp.path(), &["parse", "nope.org"]);
    assert!(!success);
    assert!(stderr.contains("error: could not read nope.org"));
}

#[test]
fn test_progress() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_sample(tmp.path());

    let out = run_ok(tmp.path(), &["progress", "todo.org"]);
    assert_eq!(out, " 50% 1/2 2 Chores\n");

    let out = run_ok(tmp.path(), &["progress", "todo.org", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed[0]["path"], "2");
    assert_eq!(parsed[0]["done"], 1);
    assert_eq!(parsed[0]["total"], 2);
    assert_eq!(parsed[0]["percent"], 50);
}

#[test]
fn test_agenda_lists_dated_items_in_order() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_sample(tmp.path());

    let out = run_ok(tmp.path(), &["agenda", "todo.org"]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("2024-01-05 09:00  S  TODO Buy milk"));
    assert!(lines[1].starts_with("2024-01-06 18:00  D  TODO Dishes"));

    let out = run_ok(tmp.path(), &["agenda", "todo.org", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed[1]["when"], "deadline");
    assert_eq!(parsed[1]["path"], "2.2");
}

#[test]
fn test_agenda_empty() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("plain.org"), "* nothing dated\n").unwrap();
    let out = run_ok(tmp.path(), &["agenda", "plain.org"]);
    assert_eq!(out, "No scheduled or deadline items.\n");
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

#[test]
fn test_fmt_prints_normalized_text() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(
        tmp.path().join("messy.org"),
        "*    TODO   spaced\nDEADLINE: <2024-1-2>\n\n\n",
    )
    .unwrap();

    let out = run_ok(tmp.path(), &["fmt", "messy.org"]);
    assert_eq!(out, "* TODO spaced\nDEADLINE: <2024-01-02 00:00>\n");
    // Without --write the file is untouched
    assert_eq!(
        fs::read_to_string(tmp.path().join("messy.org")).unwrap(),
        "*    TODO   spaced\nDEADLINE: <2024-1-2>\n\n\n"
    );
}

#[test]
fn test_fmt_write_is_stable() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = write_sample(tmp.path());

    run_ok(tmp.path(), &["fmt", "todo.org", "--write"]);
    assert_eq!(fs::read_to_string(&path).unwrap(), SAMPLE);
}

#[test]
fn test_write_refuses_non_utf8_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("latin1.org");
    let original: &[u8] = b"* TODO Caf\xe9 visit\nbody text\n";
    fs::write(&path, original).unwrap();

    let (_, stderr, success) = run(tmp.path(), &["fmt", "latin1.org", "--write"]);
    assert!(!success);
    assert!(stderr.contains("not valid UTF-8"));
    assert_eq!(fs::read(&path).unwrap(), original);

    let (_, stderr, success) = run(tmp.path(), &["toggle", "latin1.org", "1", "--write"]);
    assert!(!success);
    assert!(stderr.contains("not valid UTF-8"));
    assert_eq!(fs::read(&path).unwrap(), original);
}

#[test]
fn test_fmt_reads_stdin() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut child = Command::new(orgtree_bin())
        .args(["fmt", "-"])
        .current_dir(tmp.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to run orgtree");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"* TODO from stdin\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "* TODO from stdin\n");
}

#[test]
fn test_from_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_sample(tmp.path());

    let json = run_ok(tmp.path(), &["parse", "todo.org", "--json"]);
    fs::write(tmp.path().join("tree.json"), json).unwrap();

    let out = run_ok(tmp.path(), &["from-json", "tree.json"]);
    assert_eq!(out, SAMPLE);
}

// ---------------------------------------------------------------------------
// Toggle
// ---------------------------------------------------------------------------

#[test]
fn test_toggle_prints_without_writing() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = write_sample(tmp.path());

    let out = run_ok(tmp.path(), &["toggle", "todo.org", "1"]);
    assert!(out.starts_with("* DONE Buy milk\n"));
    assert_eq!(fs::read_to_string(&path).unwrap(), SAMPLE);
}

#[test]
fn test_toggle_write() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = write_sample(tmp.path());

    let out = run_ok(tmp.path(), &["toggle", "todo.org", "2.1", "--write"]);
    assert_eq!(out, "2.1 -> TODO\n");
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("** TODO Laundry\n"));
    assert_eq!(text, SAMPLE.replace("** DONE Laundry", "** TODO Laundry"));
}

#[test]
fn test_toggle_errors() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_sample(tmp.path());

    let (_, stderr, success) = run(tmp.path(), &["toggle", "todo.org", "2"]);
    assert!(!success);
    assert!(stderr.contains("node 2 has no workflow keyword"));

    let (_, stderr, success) = run(tmp.path(), &["toggle", "todo.org", "9"]);
    assert!(!success);
    assert!(stderr.contains("node not found: 9"));

    let (_, stderr, success) = run(tmp.path(), &["toggle", "todo.org", "x.1"]);
    assert!(!success);
    assert!(stderr.contains("invalid path segment"));
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn test_init_then_custom_keywords() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_ok(tmp.path(), &["init"]);
    assert!(out.contains(".orgtree.toml"));

    let (_, stderr, success) = run(tmp.path(), &["init"]);
    assert!(!success);
    assert!(stderr.contains("already exists"));

    fs::write(
        tmp.path().join(".orgtree.toml"),
        "[keywords]\ntodo = [\"NEXT\"]\ndone = [\"DONE\"]\n",
    )
    .unwrap();
    fs::write(tmp.path().join("work.org"), "* NEXT Call\n* TODO Not a keyword\n").unwrap();

    let out = run_ok(tmp.path(), &["parse", "work.org"]);
    assert!(out.contains("1 NEXT Call"));
    assert!(out.contains("2 TODO Not a keyword"));

    let out = run_ok(tmp.path(), &["toggle", "work.org", "1"]);
    assert!(out.starts_with("* DONE Call\n"));

    // TODO is plain title text under this config
    let (_, stderr, success) = run(tmp.path(), &["toggle", "work.org", "2"]);
    assert!(!success);
    assert!(stderr.contains("no workflow keyword"));
}

#[test]
fn test_config_discovered_from_subdirectory() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".orgtree.toml"),
        "[keywords]\ntodo = [\"NEXT\"]\n",
    )
    .unwrap();
    let sub = tmp.path().join("notes/2024");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("a.org"), "* NEXT a\n** DONE b\n").unwrap();

    let out = run_ok(&sub, &["progress", "a.org"]);
    assert_eq!(out, "100% 1/1 1 a\n");
}

#[test]
fn test_explicit_config_and_bad_config() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("custom.toml"), "[keywords]\ntodo = [\"LATER\"]\n").unwrap();
    fs::write(tmp.path().join("bad.toml"), "[keywords]\ntodo = [\"TWO WORDS\"]\n").unwrap();
    fs::write(tmp.path().join("a.org"), "* LATER a\n").unwrap();

    let out = run_ok(tmp.path(), &["--config", "custom.toml", "parse", "a.org"]);
    assert!(out.contains("1 LATER a"));

    let (_, stderr, success) = run(tmp.path(), &["--config", "bad.toml", "parse", "a.org"]);
    assert!(!success);
    assert!(stderr.contains("invalid keyword 'TWO WORDS'"));
}
