//! End-to-end tests of the npm-locate binary.
//!
//! Each test gets its own cache directory holding a small bulk document, so
//! nothing touches the network or the user's real cache.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const DOCUMENT: &str = r#"{
    "_updated": 1457452799000,
    "left-pad": {
        "name": "left-pad",
        "description": "String left pad",
        "keywords": ["leftpad", "left", "pad", "padding", "string"]
    },
    "chalk": {
        "name": "chalk",
        "description": "Terminal string styling done right",
        "keywords": ["color", "colour", "terminal", "cli", "string"]
    },
    "pipe-desc": {
        "name": "pipe-desc",
        "description": "a | b\nsecond line",
        "keywords": ["cli"]
    },
    "pad-right": {
        "name": "pad-right",
        "description": "Right pad a string",
        "keywords": ["pad", "right"]
    }
}"#;

fn binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_npm-locate"))
}

/// Cache directory with the bulk document installed and the index built
fn setup() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(dir.path().join("index.json"), DOCUMENT).unwrap();

    let (_, stderr, ok) = run(&["--build"], dir.path());
    assert!(ok, "build should succeed: {}", stderr);
    dir
}

/// Run npm-locate against `cache`, returning (stdout, stderr, success)
fn run(args: &[&str], cache: &Path) -> (String, String, bool) {
    let output = Command::new(binary())
        .args(args)
        .arg("--cache-dir")
        .arg(cache)
        .args(["--color", "never"])
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run npm-locate");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

/// Names from `✓ name` lines
fn names(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|l| l.strip_prefix("\u{2713} "))
        .map(str::to_string)
        .collect()
}

#[test]
fn test_build_writes_index() {
    let dir = setup();
    let index = fs::read_to_string(dir.path().join("index.db")).unwrap();

    assert_eq!(
        index,
        " | |\n\
         left-pad |String left pad |leftpad,left,pad,padding,string\n\
         chalk |Terminal string styling done right |color,colour,terminal,cli,string\n\
         pipe-desc |a \\| bsecond line |cli\n\
         pad-right |Right pad a string |pad,right\n"
    );
    assert!(!dir.path().join("index.db.1").exists());
}

#[test]
fn test_build_twice_is_identical() {
    let dir = setup();
    let first = fs::read(dir.path().join("index.db")).unwrap();

    let (_, _, ok) = run(&["--build"], dir.path());
    assert!(ok);
    assert_eq!(fs::read(dir.path().join("index.db")).unwrap(), first);
}

#[test]
fn test_build_malformed_document_keeps_index() {
    let dir = setup();
    let before = fs::read(dir.path().join("index.db")).unwrap();
    fs::write(dir.path().join("index.json"), "{ truncated").unwrap();

    let (_, stderr, ok) = run(&["--build"], dir.path());
    assert!(!ok);
    assert!(stderr.contains("malformed source document"), "stderr: {}", stderr);
    assert_eq!(fs::read(dir.path().join("index.db")).unwrap(), before);
}

#[test]
fn test_name_filter() {
    let dir = setup();
    let (stdout, _, ok) = run(&["--name", "pad"], dir.path());

    assert!(ok);
    assert_eq!(names(&stdout), vec!["left-pad", "pad-right"]);
    assert!(stdout.contains("2 packages found"));
}

#[test]
fn test_exact_match() {
    let dir = setup();
    let (stdout, _, ok) = run(&["-N", "chalk", "--keywords", "cli"], dir.path());

    assert!(ok);
    assert_eq!(names(&stdout), vec!["chalk"]);
    assert!(stdout.contains("   $ color, colour, terminal, cli, string"));
}

#[test]
fn test_keywords_all_required() {
    let dir = setup();

    let (stdout, _, _) = run(&["-k", "string"], dir.path());
    assert_eq!(names(&stdout), vec!["left-pad", "chalk"]);

    let (stdout, _, _) = run(&["-k", "string,cli"], dir.path());
    assert_eq!(names(&stdout), vec!["chalk"]);
}

#[test]
fn test_description_filter_verbose() {
    let dir = setup();
    let (stdout, _, ok) = run(&["-d", "styling", "-v"], dir.path());

    assert!(ok);
    assert_eq!(names(&stdout), vec!["chalk"]);
    assert!(stdout.contains("   Terminal string styling done right\n"));
}

#[test]
fn test_escaped_pipe_is_shown_literally() {
    let dir = setup();
    let (stdout, _, _) = run(&["-N", "pipe-desc", "-v"], dir.path());
    assert!(stdout.contains("   a \\| bsecond line\n"), "stdout: {}", stdout);
}

#[test]
fn test_no_matches() {
    let dir = setup();
    let (stdout, _, ok) = run(&["--name", "does-not-exist", "--trends"], dir.path());

    assert!(ok);
    assert!(names(&stdout).is_empty());
    assert!(stdout.contains("0 packages found"));
    assert!(!stdout.contains("npmtrends"));
}

#[test]
fn test_trends_link() {
    let dir = setup();
    let (stdout, _, ok) = run(&["--name", "pad", "--trends"], dir.path());

    assert!(ok);
    assert!(
        stdout.contains("https://www.npmtrends.com/left-pad-vs-pad-right"),
        "stdout: {}",
        stdout
    );
}

#[test]
fn test_trends_limit_from_config() {
    let dir = setup();
    fs::write(dir.path().join("config.json"), r#"{"trends_limit": 1}"#).unwrap();

    let (stdout, _, ok) = run(&["--name", "pad", "--trends"], dir.path());
    assert!(ok);
    assert!(!stdout.contains("npmtrends"));
}

#[test]
fn test_missing_index_hint() {
    let dir = TempDir::new().unwrap();
    let (stdout, stderr, ok) = run(&["--name", "pad"], dir.path());

    assert!(!ok);
    assert!(stdout.is_empty());
    assert!(stderr.contains("index.db not found."), "stderr: {}", stderr);
    assert!(stderr.contains("npm-locate --update"), "stderr: {}", stderr);
}

#[test]
fn test_cache_dir_is_created() {
    let dir = TempDir::new().unwrap();
    let cache = dir.path().join("nested").join("npm-locate");

    let (_, _, ok) = run(&[], &cache);
    assert!(!ok, "no index yet");
    assert!(cache.is_dir());
}
