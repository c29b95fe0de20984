#![allow(deprecated)] // assert_cmd::Command::cargo_bin is deprecated but replacement requires nightly

use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn rxrename_cmd() -> assert_cmd::Command {
	assert_cmd::Command::cargo_bin("rxrename").unwrap()
}

fn write_rules(dir: &Path, content: &str) -> std::path::PathBuf {
	let path = dir.join("rules.txt");
	fs::write(&path, content).unwrap();
	path
}

// ============================================================================
// CLI flag tests
// ============================================================================

#[test]
fn test_help_flag() {
	rxrename_cmd()
		.arg("--help")
		.assert()
		.success()
		.stdout(predicate::str::contains("find-and-replace"));
}

#[test]
fn test_single_dash_help_flag() {
	rxrename_cmd()
		.arg("-help")
		.assert()
		.success()
		.stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_no_args_prints_usage() {
	rxrename_cmd()
		.assert()
		.failure()
		.stdout(predicate::str::contains("Usage: rxrename -dir="));
}

#[test]
fn test_missing_rules_flag_prints_usage() {
	let temp_dir = tempfile::tempdir().unwrap();

	rxrename_cmd()
		.arg(format!("-dir={}", temp_dir.path().display()))
		.assert()
		.failure()
		.stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_empty_dir_flag_prints_usage() {
	let temp_dir = tempfile::tempdir().unwrap();
	let rules = write_rules(temp_dir.path(), "foo=>bar\n");

	rxrename_cmd()
		.arg("-dir=")
		.arg(format!("-rules={}", rules.display()))
		.assert()
		.code(1)
		.stdout(predicate::str::contains("Usage: rxrename -dir="));
}

#[test]
fn test_empty_ignore_flag_is_treated_as_absent() {
	let temp_dir = tempfile::tempdir().unwrap();
	let tree = temp_dir.path().join("tree");
	fs::create_dir(&tree).unwrap();
	fs::write(tree.join("notes.txt"), "foo").unwrap();
	let rules = write_rules(temp_dir.path(), "foo=>bar\n");

	rxrename_cmd()
		.arg(format!("-dir={}", tree.display()))
		.arg(format!("-rules={}", rules.display()))
		.arg("-ignore=")
		.assert()
		.success();

	assert_eq!(fs::read_to_string(tree.join("notes.txt")).unwrap(), "bar");
}

#[test]
fn test_dry_run_reports_chained_renames_like_live_run() {
	let temp_dir = tempfile::tempdir().unwrap();
	let tree = temp_dir.path().join("tree");
	fs::create_dir(&tree).unwrap();
	fs::write(tree.join("bar.txt"), "").unwrap();
	fs::write(tree.join("foo.txt"), "").unwrap();
	let rules = write_rules(temp_dir.path(), "bar=>qux\nfoo=>bar\n");

	let dry = rxrename_cmd()
		.arg(format!("-dir={}", tree.display()))
		.arg(format!("-rules={}", rules.display()))
		.arg("-n")
		.assert()
		.success();
	let dry_stdout = String::from_utf8(dry.get_output().stdout.clone()).unwrap();

	let live = rxrename_cmd()
		.arg(format!("-dir={}", tree.display()))
		.arg(format!("-rules={}", rules.display()))
		.assert()
		.success();
	let live_stdout = String::from_utf8(live.get_output().stdout.clone()).unwrap();

	assert_eq!(dry_stdout.replace("DRY RUN: Would rename", "Renamed"), live_stdout);
	assert!(tree.join("qux.txt").exists());
	assert!(tree.join("bar.txt").exists());
	assert!(!tree.join("foo.txt").exists());
}

// ============================================================================
// Rewriting tests
// ============================================================================

#[test]
fn test_rewrites_and_renames() {
	let temp_dir = tempfile::tempdir().unwrap();
	let tree = temp_dir.path().join("tree");
	fs::create_dir(&tree).unwrap();
	fs::write(tree.join("foo.txt"), "foo123").unwrap();
	let rules = write_rules(temp_dir.path(), "foo=>bar\n");

	rxrename_cmd()
		.arg(format!("-dir={}", tree.display()))
		.arg(format!("-rules={}", rules.display()))
		.assert()
		.success()
		.stdout(predicate::str::contains(format!(
			"Made substitutions in {}",
			tree.join("foo.txt").display()
		)))
		.stdout(predicate::str::contains(format!(
			"Renamed {} to {}",
			tree.join("foo.txt").display(),
			tree.join("bar.txt").display()
		)));

	assert!(!tree.join("foo.txt").exists());
	assert_eq!(fs::read_to_string(tree.join("bar.txt")).unwrap(), "bar123");
}

#[test]
fn test_gnu_style_flags() {
	let temp_dir = tempfile::tempdir().unwrap();
	let tree = temp_dir.path().join("tree");
	fs::create_dir(&tree).unwrap();
	fs::write(tree.join("notes.md"), "Widget").unwrap();
	let rules = write_rules(temp_dir.path(), "Widget=>Gadget\n");

	rxrename_cmd()
		.arg("--dir")
		.arg(&tree)
		.arg("--rules")
		.arg(&rules)
		.assert()
		.success();

	assert_eq!(fs::read_to_string(tree.join("notes.md")).unwrap(), "Gadget");
}

#[test]
fn test_dry_run_reports_without_changing() {
	let temp_dir = tempfile::tempdir().unwrap();
	let tree = temp_dir.path().join("tree");
	fs::create_dir(&tree).unwrap();
	fs::write(tree.join("foo.txt"), "foo123").unwrap();
	let rules = write_rules(temp_dir.path(), "foo=>bar\n");

	rxrename_cmd()
		.arg("-dir")
		.arg(&tree)
		.arg("-rules")
		.arg(&rules)
		.arg("-n")
		.assert()
		.success()
		.stdout(predicate::str::contains(format!(
			"DRY RUN: Making substitutions in {}",
			tree.join("foo.txt").display()
		)))
		.stdout(predicate::str::contains(format!(
			"DRY RUN: Would rename {} to {}",
			tree.join("foo.txt").display(),
			tree.join("bar.txt").display()
		)));

	assert_eq!(fs::read_to_string(tree.join("foo.txt")).unwrap(), "foo123");
	assert!(!tree.join("bar.txt").exists());
}

#[test]
fn test_ignore_file_prunes_directory() {
	let temp_dir = tempfile::tempdir().unwrap();
	let tree = temp_dir.path().join("tree");
	fs::create_dir_all(tree.join(".git")).unwrap();
	fs::write(tree.join(".git/config"), "foo").unwrap();
	fs::write(tree.join("main.rs"), "foo").unwrap();
	let rules = write_rules(temp_dir.path(), "foo=>bar\n");
	let ignore = temp_dir.path().join("ignore.txt");
	fs::write(&ignore, "\\.git\n\n").unwrap();

	rxrename_cmd()
		.arg(format!("-dir={}", tree.display()))
		.arg(format!("-rules={}", rules.display()))
		.arg(format!("-ignore={}", ignore.display()))
		.assert()
		.success()
		.stdout(predicate::str::contains("main.rs"))
		.stdout(predicate::str::contains(".git").not());

	assert_eq!(fs::read_to_string(tree.join(".git/config")).unwrap(), "foo");
}

#[test]
fn test_malformed_rule_line_is_skipped() {
	let temp_dir = tempfile::tempdir().unwrap();
	let tree = temp_dir.path().join("tree");
	fs::create_dir(&tree).unwrap();
	fs::write(tree.join("notworking.txt"), "notworking").unwrap();
	let rules = write_rules(temp_dir.path(), "notworking\n");

	rxrename_cmd()
		.arg(format!("-dir={}", tree.display()))
		.arg(format!("-rules={}", rules.display()))
		.assert()
		.success()
		.stdout(predicate::str::is_empty());
}

// ============================================================================
// Failure tests
// ============================================================================

#[test]
fn test_invalid_rule_pattern_fails_before_walk() {
	let temp_dir = tempfile::tempdir().unwrap();
	let tree = temp_dir.path().join("tree");
	fs::create_dir(&tree).unwrap();
	fs::write(tree.join("foo.txt"), "foo").unwrap();
	let rules = write_rules(temp_dir.path(), "foo=>bar\n[broken=>x\n");

	rxrename_cmd()
		.arg(format!("-dir={}", tree.display()))
		.arg(format!("-rules={}", rules.display()))
		.assert()
		.failure()
		.stdout(predicate::str::is_empty())
		.stderr(predicate::str::contains("Failed to load rules"));

	assert_eq!(fs::read_to_string(tree.join("foo.txt")).unwrap(), "foo");
}

#[test]
fn test_missing_rules_file_fails() {
	let temp_dir = tempfile::tempdir().unwrap();

	rxrename_cmd()
		.arg(format!("-dir={}", temp_dir.path().display()))
		.arg(format!(
			"-rules={}",
			temp_dir.path().join("missing.txt").display()
		))
		.assert()
		.failure()
		.stderr(predicate::str::contains("Failed to load rules"));
}

#[test]
fn test_missing_ignore_file_fails() {
	let temp_dir = tempfile::tempdir().unwrap();
	let rules = write_rules(temp_dir.path(), "foo=>bar\n");

	rxrename_cmd()
		.arg(format!("-dir={}", temp_dir.path().display()))
		.arg(format!("-rules={}", rules.display()))
		.arg(format!(
			"-ignore={}",
			temp_dir.path().join("missing.txt").display()
		))
		.assert()
		.failure()
		.stderr(predicate::str::contains("Failed to load ignore list"));
}

#[test]
fn test_missing_directory_fails() {
	let temp_dir = tempfile::tempdir().unwrap();
	let rules = write_rules(temp_dir.path(), "foo=>bar\n");

	rxrename_cmd()
		.arg(format!("-dir={}", temp_dir.path().join("nope").display()))
		.arg(format!("-rules={}", rules.display()))
		.assert()
		.failure()
		.stderr(predicate::str::contains("Failed to rename files and content"));
}

#[test]
fn test_rename_collision_fails() {
	let temp_dir = tempfile::tempdir().unwrap();
	let tree = temp_dir.path().join("tree");
	fs::create_dir(&tree).unwrap();
	fs::write(tree.join("foo.txt"), "one").unwrap();
	fs::write(tree.join("bar.txt"), "two").unwrap();
	let rules = write_rules(temp_dir.path(), "foo=>bar\n");

	rxrename_cmd()
		.arg(format!("-dir={}", tree.display()))
		.arg(format!("-rules={}", rules.display()))
		.assert()
		.failure()
		.stderr(predicate::str::contains("already exists"));

	assert_eq!(fs::read_to_string(tree.join("bar.txt")).unwrap(), "two");
	assert!(tree.join("foo.txt").exists());
}
