use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn housekeep() -> Command {
    Command::cargo_bin("housekeep").unwrap()
}

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "x").unwrap();
}

fn sample_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), ".DS_Store");
    touch(dir.path(), "a/__pycache__/x.pyc");
    touch(dir.path(), "notes.backup");
    touch(dir.path(), "cache/blob");
    touch(dir.path(), "exports/out.tmp");
    dir
}

// ─── Help & version ──────────────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    housekeep()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("housekeeping"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--keep-logs"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_version_flag() {
    housekeep()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("housekeep"));
}

// ─── Run ─────────────────────────────────────────────────────────────────────

#[test]
fn test_run_in_current_dir() {
    let dir = sample_tree();

    housekeep()
        .current_dir(dir.path())
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains(".DS_Store files:"))
        .stdout(predicate::str::contains("__pycache__ directories:"))
        .stdout(predicate::str::contains("*.backup files:"))
        .stdout(predicate::str::contains("Cleanup complete"))
        .stdout(predicate::str::contains("cache"));

    assert!(!dir.path().join(".DS_Store").exists());
    assert!(!dir.path().join("a/__pycache__").exists());
    assert!(!dir.path().join("notes.backup").exists());
    assert!(!dir.path().join("exports/out.tmp").exists());
    assert!(dir.path().join("cache").is_dir());
    assert!(dir.path().join("a").is_dir());
}

#[test]
fn test_run_with_root_flag() {
    let dir = sample_tree();

    housekeep()
        .args(["--no-color", "-C"])
        .arg(dir.path())
        .assert()
        .success();

    assert!(!dir.path().join("notes.backup").exists());
}

#[test]
fn test_dry_run_leaves_files() {
    let dir = sample_tree();

    housekeep()
        .current_dir(dir.path())
        .args(["--dry-run", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run complete"))
        .stdout(predicate::str::is_match(r"Dry run complete .* in \d+(ms|\.\d{2}s)").unwrap())
        .stdout(predicate::str::contains("would be removed"));

    assert!(dir.path().join(".DS_Store").exists());
    assert!(dir.path().join("a/__pycache__/x.pyc").exists());
    assert!(dir.path().join("cache/blob").exists());
}

#[test]
fn test_json_output() {
    let dir = sample_tree();

    let output = housekeep()
        .current_dir(dir.path())
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["mode"], "delete");
    assert_eq!(report["counts"]["ds_store"], 1);
    assert_eq!(report["counts"]["pycache"], 1);
    assert_eq!(report["counts"]["backup"], 1);
    assert_eq!(report["steps"].as_array().unwrap().len(), 5);
}

#[test]
fn test_quiet_output() {
    let dir = sample_tree();

    housekeep()
        .current_dir(dir.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("5  "));
}

#[test]
fn test_second_run_succeeds() {
    let dir = sample_tree();

    housekeep().current_dir(dir.path()).arg("-q").assert().success();
    housekeep()
        .current_dir(dir.path())
        .arg("-q")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0  "));
}

#[test]
fn test_missing_root_fails() {
    let dir = TempDir::new().unwrap();

    housekeep()
        .arg("-C")
        .arg(dir.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_protected_root_refused() {
    housekeep()
        .args(["-C", "/", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SAFETY"));
}

#[test]
fn test_system_dir_refused_before_counting() {
    housekeep()
        .args(["--no-color", "-C", "/usr"])
        .assert()
        .code(predicate::ne(0))
        .stdout(predicate::str::contains(".DS_Store files:").not())
        .stderr(predicate::str::contains("Refusing to clean protected path"));
}

// ─── Config ──────────────────────────────────────────────────────────────────

#[test]
fn test_config_file_overrides_layout() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "tmp_cache/blob");
    touch(dir.path(), "cache/untouched");
    let config = dir.path().join("housekeep.toml");
    fs::write(&config, "cache_dir = \"tmp_cache\"\n").unwrap();

    housekeep()
        .current_dir(dir.path())
        .arg("-q")
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    assert!(!dir.path().join("tmp_cache/blob").exists());
    assert!(dir.path().join("cache/untouched").exists());
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bad.toml");
    fs::write(&config, "cache_dir = \"../outside\"\n").unwrap();

    housekeep()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cache_dir"));
}

// ─── Completions ─────────────────────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    housekeep()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("housekeep"));
}
