use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::tempdir;

fn ladder(dir: &Path) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("ladder"));
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn write_migration(dir: &Path, id: &str, body: &str) {
    fs::write(dir.join("migrations").join(format!("{id}.json")), body).unwrap();
}

fn project(dir: &Path) {
    ladder(dir).arg("init").assert().success();
    write_migration(
        dir,
        "20180918_000001",
        r#"{"description": "users", "up": ["CREATE TABLE users (id INTEGER)"], "down": ["DROP TABLE users"]}"#,
    );
    write_migration(
        dir,
        "20180918_000002",
        r#"{"description": "posts", "up": ["CREATE TABLE posts (id INTEGER)"], "down": ["DROP TABLE posts"]}"#,
    );
    fs::write(
        dir.join("migrations/migrations.json"),
        r#"["20180918_000001", "20180918_000002"]"#,
    )
    .unwrap();
}

#[test]
fn test_main_with_help_flag() {
    let tmp = tempdir().unwrap();
    ladder(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ladder"))
        .stdout(predicate::str::contains("migrate"));
}

#[test]
fn test_main_without_config_fails() {
    let tmp = tempdir().unwrap();
    ladder(tmp.path())
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ladder init"));
}

#[test]
fn test_init_then_new() {
    let tmp = tempdir().unwrap();
    ladder(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("ladder.json"));
    ladder(tmp.path())
        .arg("new")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created migration"));

    let manifest = fs::read_to_string(tmp.path().join("migrations/migrations.json")).unwrap();
    assert_eq!(manifest.lines().count(), 3);
}

#[test]
fn test_migrate_head_and_back() {
    let tmp = tempdir().unwrap();
    project(tmp.path());

    ladder(tmp.path())
        .args(["migrate", "head"])
        .assert()
        .success()
        .stdout(predicate::str::contains("20180918_000002:up"));
    ladder(tmp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("20180918_000001"))
        .stdout(predicate::str::contains("posts"));
    ladder(tmp.path())
        .args(["migrate", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("20180918_000001:down"));

    let version = fs::read_to_string(tmp.path().join("migrations/version.txt")).unwrap();
    assert_eq!(version.trim(), "0");
}

#[test]
fn test_migrate_unknown_version_fails() {
    let tmp = tempdir().unwrap();
    project(tmp.path());

    ladder(tmp.path())
        .args(["migrate", "20990101_000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a known migration"));
}

#[test]
fn test_failed_step_exits_non_zero() {
    let tmp = tempdir().unwrap();
    project(tmp.path());
    write_migration(
        tmp.path(),
        "20180918_000002",
        r#"{"up": ["INSERT INTO nowhere VALUES (1)"]}"#,
    );

    ladder(tmp.path())
        .args(["migrate", "head"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Stopped at version"));

    let version = fs::read_to_string(tmp.path().join("migrations/version.txt")).unwrap();
    assert_eq!(version.trim(), "20180918_000001");
}

#[test]
fn test_set_version_and_status() {
    let tmp = tempdir().unwrap();
    project(tmp.path());

    ladder(tmp.path())
        .args(["set-version", "20180918_000001"])
        .assert()
        .success();
    ladder(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pending migrations:"))
        .stdout(predicate::str::contains("20180918_000002"));
}

#[test]
fn test_clean_with_migrate() {
    let tmp = tempdir().unwrap();
    project(tmp.path());

    ladder(tmp.path())
        .args(["clean", "--migrate", "up"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleaned"));

    let version = fs::read_to_string(tmp.path().join("migrations/version.txt")).unwrap();
    assert_eq!(version.trim(), "20180918_000001");
}
