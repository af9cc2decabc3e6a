use ladder_core::{Direction, MigrationId, StepError, UnitMap, Version, VersionStore};
use tracing::{info, warn};

use crate::audit::AuditTrail;
use crate::catalog::Catalog;
use crate::error::{EngineError, FailureKind, RollbackFailure, RollbackReport, StepFailure};
use crate::resolve;

/// Result of a single step that was actually attempted.
#[derive(Debug)]
pub enum StepOutcome {
    /// The unit succeeded and this version was persisted.
    Committed(Version),
    Failed(StepFailure),
}

impl StepOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, StepOutcome::Committed(_))
    }
}

/// Borrowed engine state needed to run one step.
pub(crate) struct StepExecutor<'a, C> {
    pub(crate) catalog: &'a Catalog,
    pub(crate) units: &'a UnitMap<C>,
    pub(crate) store: &'a mut Box<dyn VersionStore<C>>,
    pub(crate) audit: &'a mut AuditTrail,
    pub(crate) ctx: &'a mut C,
}

impl<C> StepExecutor<'_, C> {
    /// Run `id` once in `direction`.
    ///
    /// Load and store errors are fatal and come back as `Err`. A failing unit is
    /// an ordinary `StepOutcome::Failed`: nothing is persisted and the matching
    /// rollback hook, if defined, has been given one chance to clean up.
    pub(crate) fn execute(
        self,
        id: &MigrationId,
        direction: Direction,
    ) -> Result<StepOutcome, EngineError> {
        let Self {
            catalog,
            units,
            store,
            audit,
            ctx,
        } = self;

        let factory = units
            .get(id)
            .ok_or_else(|| EngineError::UnknownVersion(id.to_string()))?;
        let mut unit = factory()?;

        audit.record(id, direction);

        let action = direction.action_name();
        info!(
            migration = %id,
            %direction,
            "Running {id} {action}: {}",
            unit.description().unwrap_or_default()
        );

        let result = match direction {
            Direction::Up => unit.up(ctx),
            Direction::Down => unit.down(ctx),
        };

        let err = match result {
            Ok(()) => {
                let version = match direction {
                    Direction::Up => Version::At(id.clone()),
                    Direction::Down => resolve::version_below(catalog, id)?,
                };
                store.set_version(ctx, &version)?;
                return Ok(StepOutcome::Committed(version));
            }
            Err(err) => err,
        };

        let kind = match err {
            StepError::OneWay => FailureKind::OneWay,
            StepError::Failed(cause) => FailureKind::Error(cause),
        };
        warn!(migration = %id, %direction, "Error during {action} migration {id}: {kind}");

        let hook = match direction {
            Direction::Up => unit.up_rollback(ctx),
            Direction::Down => unit.down_rollback(ctx),
        };
        let rollback = match hook {
            None => RollbackReport::NotDefined,
            Some(Ok(())) => RollbackReport::Succeeded,
            Some(Err(source)) => {
                let failure = RollbackFailure {
                    id: id.clone(),
                    direction,
                    source,
                };
                warn!(migration = %id, %direction, "{failure}");
                RollbackReport::Failed(failure)
            }
        };

        Ok(StepOutcome::Failed(StepFailure {
            id: id.clone(),
            direction,
            kind,
            rollback,
        }))
    }
}
