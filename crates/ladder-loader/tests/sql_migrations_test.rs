use std::fs;
use std::path::Path;

use ladder_core::{Target, Version};
use ladder_engine::{Engine, EngineError};
use ladder_loader::{DirectorySource, MANIFEST_FILE_NAME};
use ladder_store::TableVersionStore;
use rusqlite::Connection;
use tempfile::tempdir;

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn tables(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .unwrap();
    let names = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap();
    names
}

fn project(dir: &Path) {
    write(
        dir,
        "2018/20180918_000001.json",
        r#"{
            "description": "users",
            "up": ["CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT)"],
            "down": ["DROP TABLE users"]
        }"#,
    );
    write(
        dir,
        "2018/20180918_000002.yaml",
        "description: posts\nup:\n  - CREATE TABLE posts (id INTEGER PRIMARY KEY, user_id INTEGER)\ndown:\n  - DROP TABLE posts\n",
    );
    write(
        dir,
        "20190101_000000.json",
        r#"{
            "description": "backfill, cannot be undone",
            "up": ["INSERT INTO users (name) VALUES ('admin')"]
        }"#,
    );
    write(
        dir,
        MANIFEST_FILE_NAME,
        r#"["20180918_000001", "20180918_000002", "20190101_000000"]"#,
    );
    write(dir, "clean.sql", "DROP TABLE IF EXISTS posts; DROP TABLE IF EXISTS users;");
}

fn engine(dir: &Path) -> Engine<Connection> {
    Engine::builder(Connection::open_in_memory().unwrap())
        .source(DirectorySource::new(dir))
        .version_store(TableVersionStore::default())
        .build()
        .unwrap()
}

#[test]
fn applies_file_migrations_to_sqlite() {
    let tmp = tempdir().unwrap();
    project(tmp.path());
    let mut engine = engine(tmp.path());

    let outcome = engine.migrate_to_version(Target::Head).unwrap();

    assert!(outcome.is_success());
    assert_eq!(outcome.version().to_string(), "20190101_000000");
    assert_eq!(tables(engine.context()), vec!["mp_version", "posts", "users"]);
    let version: String = engine
        .context()
        .query_row("SELECT version FROM mp_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, "20190101_000000");
}

#[test]
fn one_way_file_halts_downgrade() {
    let tmp = tempdir().unwrap();
    project(tmp.path());
    let mut engine = engine(tmp.path());
    engine.migrate_to_version(Target::Head).unwrap();

    let outcome = engine.migrate_to_version(Target::Zero).unwrap();

    assert!(!outcome.is_success());
    assert!(outcome.failure().unwrap().is_one_way());
    assert_eq!(outcome.version().to_string(), "20190101_000000");
    assert_eq!(tables(engine.context()), vec!["mp_version", "posts", "users"]);
}

#[test]
fn clean_runs_clean_sql_and_resets_version() {
    let tmp = tempdir().unwrap();
    project(tmp.path());
    let mut engine = engine(tmp.path());
    engine.migrate_to_version(Target::Head).unwrap();

    engine.clean().unwrap();

    assert_eq!(engine.version().unwrap(), Version::Zero);
    assert_eq!(tables(engine.context()), vec!["mp_version"]);

    engine.migrate_to_version(Target::Head).unwrap();
    assert_eq!(tables(engine.context()), vec!["mp_version", "posts", "users"]);
}

#[test]
fn clean_sql_dropping_version_table_can_migrate_again() {
    let tmp = tempdir().unwrap();
    project(tmp.path());
    write(
        tmp.path(),
        "clean.sql",
        "DROP TABLE IF EXISTS posts; DROP TABLE IF EXISTS users; DROP TABLE IF EXISTS mp_version;",
    );
    let mut engine = engine(tmp.path());
    engine.migrate_to_version(Target::Head).unwrap();

    engine.clean().unwrap();
    assert!(tables(engine.context()).is_empty());

    let outcome = engine.migrate_to_version(Target::Head).unwrap();

    assert!(outcome.is_success());
    assert_eq!(outcome.steps().len(), 3);
    assert_eq!(outcome.version().to_string(), "20190101_000000");
    assert_eq!(tables(engine.context()), vec!["mp_version", "posts", "users"]);
}

#[test]
fn failing_statement_rolls_back_and_keeps_previous_version() {
    let tmp = tempdir().unwrap();
    project(tmp.path());
    write(
        tmp.path(),
        "2018/20180918_000002.yaml",
        "up:\n  - CREATE TABLE posts (id INTEGER)\n  - INSERT INTO nowhere VALUES (1)\ndown:\n  - DROP TABLE posts\nupRollback:\n  - DROP TABLE IF EXISTS posts\n",
    );
    let mut engine = engine(tmp.path());

    let outcome = engine.migrate_to_version(Target::Head).unwrap();

    assert_eq!(outcome.version().to_string(), "20180918_000001");
    assert!(outcome.failure().unwrap().rollback.was_invoked());
    assert_eq!(tables(engine.context()), vec!["mp_version", "users"]);
}

#[test]
fn unmanifested_file_is_a_mismatch() {
    let tmp = tempdir().unwrap();
    project(tmp.path());
    write(tmp.path(), "20190202_000000.json", r#"{"up": []}"#);

    let err = Engine::builder(Connection::open_in_memory().unwrap())
        .source(DirectorySource::new(tmp.path()))
        .version_store(TableVersionStore::default())
        .build()
        .err()
        .unwrap();

    assert!(matches!(err, EngineError::ManifestMismatch { .. }));
    assert!(err.to_string().contains("20190202_000000"));
}

#[test]
fn malformed_file_fails_when_reached() {
    let tmp = tempdir().unwrap();
    project(tmp.path());
    write(tmp.path(), "20190101_000000.json", "{ broken");
    let mut engine = engine(tmp.path());

    let err = engine.migrate_to_version(Target::Head).unwrap_err();

    assert!(matches!(err, EngineError::Load(_)));
    assert_eq!(engine.version().unwrap().to_string(), "20180918_000002");
}
