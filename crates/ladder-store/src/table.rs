use ladder_core::{StoreError, VERSION_ZERO_TOKEN, Version, VersionStore};
use rusqlite::Connection;
use tracing::debug;

pub const DEFAULT_VERSION_TABLE: &str = "mp_version";

/// Keeps the version in a single-row table of the migrated SQLite database,
/// so the version lives next to the schema it describes.
#[derive(Debug, Clone)]
pub struct TableVersionStore {
    table: String,
}

impl Default for TableVersionStore {
    fn default() -> Self {
        Self {
            table: DEFAULT_VERSION_TABLE.to_string(),
        }
    }
}

impl TableVersionStore {
    /// The table name is spliced into SQL, so only `[A-Za-z_][A-Za-z0-9_]*` is
    /// accepted.
    pub fn new(table: impl Into<String>) -> Result<Self, StoreError> {
        let table = table.into();
        let mut chars = table.chars();
        let valid_head = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if !valid_head || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(StoreError::Unavailable(format!(
                "invalid version table name '{table}'"
            )));
        }
        Ok(Self { table })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Checked on every access: a clean hook may have dropped the table.
    fn ensure_table(&self, conn: &Connection) -> Result<(), StoreError> {
        let table = &self.table;
        conn.execute_batch(&format!("CREATE TABLE IF NOT EXISTS {table} (version text)"))
            .map_err(|e| unavailable(&format!("cannot create table {table}"), e))?;

        let rows: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
            .map_err(|e| unavailable(&format!("cannot read {table}"), e))?;
        if rows == 0 {
            debug!("Initializing version table {table}");
            conn.execute(
                &format!("INSERT INTO {table} (version) VALUES (?1)"),
                [VERSION_ZERO_TOKEN],
            )
            .map_err(|e| unavailable(&format!("cannot initialize {table}"), e))?;
        }
        Ok(())
    }
}

fn unavailable(context: &str, err: rusqlite::Error) -> StoreError {
    StoreError::Unavailable(format!("{context}: {err}"))
}

impl VersionStore<Connection> for TableVersionStore {
    fn version(&mut self, conn: &mut Connection) -> Result<Version, StoreError> {
        self.ensure_table(conn)?;
        let raw: String = conn
            .query_row(
                &format!("SELECT version FROM {} LIMIT 1", self.table),
                [],
                |row| row.get(0),
            )
            .map_err(|e| unavailable(&format!("cannot read {}", self.table), e))?;
        Version::parse(&raw).map_err(|source| StoreError::Corrupt { raw, source })
    }

    fn set_version(&mut self, conn: &mut Connection, version: &Version) -> Result<(), StoreError> {
        self.ensure_table(conn)?;
        conn.execute(
            &format!("UPDATE {} SET version = ?1", self.table),
            [version.to_string()],
        )
        .map_err(|e| unavailable(&format!("cannot update {}", self.table), e))?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "table"
    }
}
