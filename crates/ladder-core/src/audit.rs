use std::fmt;

use crate::migration::{Direction, MigrationId};

/// One attempted step, recorded whether or not it succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub id: MigrationId,
    pub direction: Direction,
}

impl AuditEntry {
    pub fn new(id: MigrationId, direction: Direction) -> Self {
        Self { id, direction }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.id, self.direction)
    }
}
