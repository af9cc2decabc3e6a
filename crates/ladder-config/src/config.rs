use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::file_format::FileFormat;
use crate::store_kind::StoreKind;

/// Default name of the table that holds the current version.
pub fn default_version_table() -> String {
    "mp_version".to_string()
}

fn default_migrations_dir() -> PathBuf {
    PathBuf::from("migrations")
}

/// Top-level ladder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct LadderConfig {
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: PathBuf,
    /// SQLite database the migrations run against.
    #[serde(default)]
    pub database: Option<PathBuf>,
    #[serde(default)]
    pub version_store: StoreKind,
    /// Table used by the `table` version store.
    #[serde(default = "default_version_table")]
    pub version_table: String,
    #[serde(default)]
    pub migration_format: FileFormat,
    /// Generate `migrations.json` from the discovered files when it is missing.
    #[serde(default)]
    pub offer_manifest_upgrade: bool,
}

impl Default for LadderConfig {
    fn default() -> Self {
        Self {
            migrations_dir: default_migrations_dir(),
            database: None,
            version_store: StoreKind::File,
            version_table: default_version_table(),
            migration_format: FileFormat::Json,
            offer_manifest_upgrade: false,
        }
    }
}

impl LadderConfig {
    /// Path where migrations are stored.
    pub fn migrations_dir(&self) -> &Path {
        &self.migrations_dir
    }

    /// Database file, if one is configured.
    pub fn database(&self) -> Option<&Path> {
        self.database.as_deref()
    }

    /// Which version store to use.
    pub fn version_store(&self) -> StoreKind {
        self.version_store
    }

    pub fn version_table(&self) -> &str {
        &self.version_table
    }

    /// Preferred file format for new migrations.
    pub fn migration_format(&self) -> FileFormat {
        self.migration_format
    }

    pub fn offer_manifest_upgrade(&self) -> bool {
        self.offer_manifest_upgrade
    }

    /// Resolve relative paths against `root`.
    pub fn rooted_at(mut self, root: &Path) -> Self {
        if self.migrations_dir.is_relative() {
            self.migrations_dir = root.join(&self.migrations_dir);
        }
        if let Some(db) = self.database.take() {
            self.database = Some(if db.is_relative() { root.join(db) } else { db });
        }
        self
    }
}
