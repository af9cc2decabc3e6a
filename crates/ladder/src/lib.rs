//! Embed ladder migrations in an application.
//!
//! [`run_migrations`] opens the migrations directory, reads the version from
//! a table in the same SQLite database and steps to the requested target.

use std::path::PathBuf;

pub use ladder_core::{
    Delegate, Direction, MemoryVersionStore, MigrationId, MigrationSource, MigrationUnit, Target,
    Version, VersionStore,
};
pub use ladder_engine::{Engine, EngineBuilder, EngineError, HaltReason, Outcome, Registry};
pub use ladder_loader::{DirectorySource, SqlMigration};
pub use ladder_store::{DEFAULT_VERSION_TABLE, FileVersionStore, TableVersionStore};

use ladder_core::StoreError;
use rusqlite::Connection;

#[derive(thiserror::Error, Debug)]
pub enum MigrationError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("migration halted at {version} before reaching {target}: {reason:?}")]
    Halted {
        version: Version,
        target: Version,
        reason: HaltReason,
    },
}

#[derive(Debug, Clone)]
pub struct MigrationOptions {
    pub migrations_dir: PathBuf,
    pub version_table: String,
    pub target: Target,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            migrations_dir: PathBuf::from("migrations"),
            version_table: DEFAULT_VERSION_TABLE.to_string(),
            target: Target::Head,
        }
    }
}

/// Migrate `conn` to `options.target` and hand the connection back.
///
/// A halted run is reported as [`MigrationError::Halted`]; the database is
/// left at the last committed version.
pub fn run_migrations(
    conn: Connection,
    options: &MigrationOptions,
) -> Result<(Connection, Version), MigrationError> {
    let store = TableVersionStore::new(options.version_table.clone())?;
    let mut engine = Engine::builder(conn)
        .source(DirectorySource::new(&options.migrations_dir))
        .version_store(store)
        .build()?;

    let version = match engine.migrate_to_version(options.target.clone())? {
        Outcome::AlreadyAt(version) | Outcome::Reached { version, .. } => version,
        Outcome::Halted {
            version,
            target,
            reason,
            ..
        } => {
            return Err(MigrationError::Halted {
                version,
                target,
                reason,
            });
        }
    };
    Ok((engine.into_context(), version))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_migrations(dir: &std::path::Path, second_up: &str) {
        fs::write(
            dir.join("migrations.json"),
            r#"["20240101_000001", "20240101_000002"]"#,
        )
        .unwrap();
        fs::write(
            dir.join("20240101_000001.json"),
            r#"{"up": ["CREATE TABLE users (id INTEGER)"], "down": ["DROP TABLE users"]}"#,
        )
        .unwrap();
        fs::write(
            dir.join("20240101_000002.json"),
            format!(r#"{{"up": ["{second_up}"], "down": ["DROP TABLE posts"]}}"#),
        )
        .unwrap();
    }

    fn options(dir: &std::path::Path, target: Target) -> MigrationOptions {
        MigrationOptions {
            migrations_dir: dir.to_path_buf(),
            target,
            ..Default::default()
        }
    }

    #[test]
    fn migrates_to_head_and_back_to_zero() {
        let tmp = tempdir().unwrap();
        write_migrations(tmp.path(), "CREATE TABLE posts (id INTEGER)");

        let conn = Connection::open_in_memory().unwrap();
        let (conn, version) = run_migrations(conn, &options(tmp.path(), Target::Head)).unwrap();
        assert_eq!(version.to_string(), "20240101_000002");

        let (_, version) = run_migrations(conn, &options(tmp.path(), Target::Zero)).unwrap();
        assert!(version.is_zero());
    }

    #[test]
    fn failing_step_is_reported_as_halted() {
        let tmp = tempdir().unwrap();
        write_migrations(tmp.path(), "NOT VALID SQL");

        let conn = Connection::open_in_memory().unwrap();
        let err = run_migrations(conn, &options(tmp.path(), Target::Head)).unwrap_err();

        match err {
            MigrationError::Halted { version, .. } => {
                assert_eq!(version.to_string(), "20240101_000001")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_table_name_is_rejected() {
        let tmp = tempdir().unwrap();
        let opts = MigrationOptions {
            version_table: "drop table; --".to_string(),
            ..options(tmp.path(), Target::Head)
        };
        let conn = Connection::open_in_memory().unwrap();
        assert!(matches!(
            run_migrations(conn, &opts),
            Err(MigrationError::Store(_))
        ));
    }
}
