//! Integration tests for the git-changelog binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command running in `home`, so file logs stay out of the real home directory
fn git_changelog(home: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("git-changelog"));
    cmd.env("HOME", home.path())
        .env_remove("RUST_LOG")
        .current_dir(home.path());
    cmd
}

#[test]
fn test_help_exits_zero() {
    let home = TempDir::new().unwrap();
    git_changelog(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--fromRef"))
        .stdout(predicate::str::contains("--output-file"))
        .stdout(predicate::str::contains("--customIssueLink"));
}

#[test]
fn test_short_help_exits_zero() {
    let home = TempDir::new().unwrap();
    git_changelog(&home).arg("-h").assert().success();
}

#[test]
fn test_version_exits_zero() {
    let home = TempDir::new().unwrap();
    git_changelog(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("git-changelog"));
}

#[test]
fn test_missing_output_sink_fails() {
    let home = TempDir::new().unwrap();
    git_changelog(&home)
        .args(["--fromRef", "v1.0"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "You must supply an output, --output-file <filename> or --stdout",
        ));
}

#[test]
fn test_unknown_flag_fails_with_usage() {
    let home = TempDir::new().unwrap();
    git_changelog(&home)
        .args(["--stdout", "--no-such-flag"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--no-such-flag"))
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_stdout_prints_resolved_settings() {
    let home = TempDir::new().unwrap();
    git_changelog(&home)
        .args(["--stdout", "--fromRef", "v1.0", "--toRef", "v2.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""fromRef": "v1.0""#))
        .stdout(predicate::str::contains(r#""toRef": "v2.0""#))
        .stdout(predicate::str::contains("fromCommit").not());
}

#[test]
fn test_legacy_flags() {
    let home = TempDir::new().unwrap();
    git_changelog(&home)
        .args(["-std", "-fc", "abc123", "-tz", "CET"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""fromCommit": "abc123""#))
        .stdout(predicate::str::contains(r#""timeZone": "CET""#));
}

#[test]
fn test_output_file_is_written() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("out.json");

    git_changelog(&home)
        .args(["--output-file", "out.json", "--fromCommit", "abc123", "--fromRef", "v1.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Changelog written to"));

    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.contains(r#""fromRef": "v1.0""#));
    assert!(!written.contains("abc123"));
}

#[test]
fn test_quiet_output_file() {
    let home = TempDir::new().unwrap();

    git_changelog(&home)
        .args(["--quiet", "--output-file", "out.json"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(home.path().join("out.json").exists());
}

#[test]
fn test_settings_file_range_is_applied() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("settings.json"),
        r#"{ "fromRef": "v0.9", "toRef": "v1.0" }"#,
    )
    .unwrap();

    git_changelog(&home)
        .args(["--settings-file", "settings.json", "--stdout", "--toCommit", "abc123"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""fromRef": "v0.9""#))
        .stdout(predicate::str::contains(r#""toCommit": "abc123""#))
        .stdout(predicate::str::contains("toRef").not());
}

#[test]
fn test_absent_flags_reset_settings_file_values() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("settings.json"),
        r#"{ "untaggedName": "Unreleased", "timeZone": "CET", "jiraServer": "https://jira" }"#,
    )
    .unwrap();

    git_changelog(&home)
        .args(["--settings-file", "settings.json", "--stdout", "--timeZone", "Europe/Oslo"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""untaggedName": "No tag""#))
        .stdout(predicate::str::contains(r#""timeZone": "Europe/Oslo""#))
        .stdout(predicate::str::contains("jiraServer").not());
}

#[test]
fn test_unreadable_settings_file_fails() {
    let home = TempDir::new().unwrap();
    git_changelog(&home)
        .args(["--settings-file", "missing.json", "--stdout"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cannot read settings file"));
}

#[test]
fn test_partial_custom_issue_is_ignored() {
    let home = TempDir::new().unwrap();
    git_changelog(&home)
        .args([
            "--stdout",
            "--customIssueName",
            "JIRA",
            "--customIssuePattern",
            r"JIRA-\d+",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("customIssues").not())
        .stderr(predicate::str::contains("custom issue tracker needs name, pattern and link"));
}

#[test]
fn test_unsupported_pattern_is_passed_through() {
    let home = TempDir::new().unwrap();
    git_changelog(&home)
        .args(["--stdout", "--ignorePattern", "^(?!feat).*", "--untaggedName", ""])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""ignoreCommitsIfMessageMatches": "^(?!feat).*""#))
        .stdout(predicate::str::contains(r#""untaggedName": """#))
        .stderr(predicate::str::contains("ignorePattern"));
}
