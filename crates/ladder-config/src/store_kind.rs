use serde::{Deserialize, Serialize};

/// Where the current version is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    /// `version.txt` inside the migrations directory.
    File,
    /// Single-row table in the configured database.
    Table,
}

impl StoreKind {
    pub fn is_file(self) -> bool {
        matches!(self, StoreKind::File)
    }

    pub fn is_table(self) -> bool {
        matches!(self, StoreKind::Table)
    }
}

impl Default for StoreKind {
    fn default() -> Self {
        StoreKind::File
    }
}
