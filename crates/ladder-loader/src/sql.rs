use ladder_core::{MigrationId, MigrationUnit, StepError, StepResult, UnitError};
use rusqlite::Connection;
use tracing::debug;

use crate::file::MigrationFile;

/// A [`MigrationFile`] bound to its id, run against a SQLite connection.
#[derive(Debug, Clone)]
pub struct SqlMigration {
    id: MigrationId,
    file: MigrationFile,
}

impl SqlMigration {
    pub fn new(id: MigrationId, file: MigrationFile) -> Self {
        Self { id, file }
    }

    pub fn id(&self) -> &MigrationId {
        &self.id
    }

    fn run(&self, conn: &Connection, statements: &[String]) -> Result<(), rusqlite::Error> {
        for sql in statements {
            debug!(migration = %self.id, "{sql}");
            conn.execute_batch(sql)?;
        }
        Ok(())
    }

    fn run_hook(
        &self,
        conn: &Connection,
        statements: Option<&Vec<String>>,
    ) -> Option<Result<(), UnitError>> {
        statements.map(|sql| self.run(conn, sql).map_err(UnitError::from))
    }
}

impl MigrationUnit<Connection> for SqlMigration {
    fn description(&self) -> Option<String> {
        self.file.description.clone()
    }

    fn up(&mut self, conn: &mut Connection) -> StepResult {
        self.run(conn, &self.file.up).map_err(StepError::failed)
    }

    fn down(&mut self, conn: &mut Connection) -> StepResult {
        match &self.file.down {
            Some(statements) => self.run(conn, statements).map_err(StepError::failed),
            None => Err(StepError::OneWay),
        }
    }

    fn up_rollback(&mut self, conn: &mut Connection) -> Option<Result<(), UnitError>> {
        self.run_hook(conn, self.file.up_rollback.as_ref())
    }

    fn down_rollback(&mut self, conn: &mut Connection) -> Option<Result<(), UnitError>> {
        self.run_hook(conn, self.file.down_rollback.as_ref())
    }
}
