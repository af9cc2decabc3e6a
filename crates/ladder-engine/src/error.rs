use ladder_core::{
    Direction, LoadError, MigrationId, SourceError, StoreError, UnitError, Version,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(
        "manifest mismatch: {manifested} migrations manifested, {discovered} migration units found. {}",
        mismatch_details(.manifested_without_unit, .unit_without_manifest)
    )]
    ManifestMismatch {
        manifested: usize,
        discovered: usize,
        manifested_without_unit: Vec<MigrationId>,
        unit_without_manifest: Vec<MigrationId>,
    },
    #[error("migration {0} is listed more than once in the manifest")]
    DuplicateManifestEntry(MigrationId),
    #[error("version {0} is not a known migration")]
    UnknownVersion(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Step(#[from] StepFailure),
    #[error("{target} not reached: no further migration after {version}")]
    BoundaryReached { version: Version, target: Version },
    #[error("clean hook failed: {0}")]
    Clean(UnitError),
}

fn mismatch_details(
    manifested_without_unit: &[MigrationId],
    unit_without_manifest: &[MigrationId],
) -> String {
    let unit_part = if unit_without_manifest.is_empty() {
        "All migration units have been manifested.".to_string()
    } else {
        format!(
            "The following migrations have units but have not been manifested: {}",
            join_ids(unit_without_manifest)
        )
    };
    let manifest_part = if manifested_without_unit.is_empty() {
        "All manifested migrations have units.".to_string()
    } else {
        format!(
            "The following migrations are manifested but have no corresponding unit: {}",
            join_ids(manifested_without_unit)
        )
    };
    format!("{unit_part} {manifest_part}")
}

fn join_ids(ids: &[MigrationId]) -> String {
    ids.iter()
        .map(MigrationId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// What went wrong inside `up()` or `down()`.
#[derive(Debug, Error)]
pub enum FailureKind {
    #[error("one-way migration cannot be reverted")]
    OneWay,
    #[error("{0}")]
    Error(UnitError),
}

/// A step that ran and failed. Nothing was persisted for it.
#[derive(Debug, Error)]
#[error("{} of migration {id} failed: {kind}", .direction.action_name())]
pub struct StepFailure {
    pub id: MigrationId,
    pub direction: Direction,
    pub kind: FailureKind,
    pub rollback: RollbackReport,
}

impl StepFailure {
    pub fn is_one_way(&self) -> bool {
        matches!(self.kind, FailureKind::OneWay)
    }
}

/// Error raised by a rollback hook. Reported, never propagated.
#[derive(Debug, Error)]
#[error("rollback of {} migration {id} failed: {source}", .direction.action_name())]
pub struct RollbackFailure {
    pub id: MigrationId,
    pub direction: Direction,
    pub source: UnitError,
}

/// What happened with the rollback hook after a failed step.
#[derive(Debug)]
pub enum RollbackReport {
    NotDefined,
    Succeeded,
    Failed(RollbackFailure),
}

impl RollbackReport {
    pub fn was_invoked(&self) -> bool {
        !matches!(self, RollbackReport::NotDefined)
    }
}
