use ladder_core::{AuditEntry, Direction, MigrationId};

/// Every step attempted by one engine, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditTrail {
    entries: Vec<AuditEntry>,
}

impl AuditTrail {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, id: &MigrationId, direction: Direction) {
        self.entries.push(AuditEntry::new(id.clone(), direction));
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries appended after the trail had `mark` entries.
    pub fn since(&self, mark: usize) -> &[AuditEntry] {
        self.entries.get(mark..).unwrap_or(&[])
    }

    /// `id:direction` strings, the format the trail is usually asserted in.
    pub fn to_strings(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}
