/// Boxed cause carried by a failed step or hook.
pub type UnitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why `up()` or `down()` did not complete.
#[derive(thiserror::Error, Debug)]
pub enum StepError {
    /// `down()` refuses to run: the migration cannot be reversed.
    #[error("migration is one-way and cannot be reverted")]
    OneWay,
    #[error(transparent)]
    Failed(UnitError),
}

impl StepError {
    pub fn failed(cause: impl Into<UnitError>) -> Self {
        StepError::Failed(cause.into())
    }
}

pub type StepResult = Result<(), StepError>;

/// The forward/backward pair for a single migration.
///
/// Units are created on demand for one step and dropped afterwards. `C` is the
/// engine context lent for the duration of the call, e.g. a database
/// connection.
///
/// The rollback hooks return `None` when the unit has no cleanup for that
/// direction; the executor then skips them entirely.
pub trait MigrationUnit<C: ?Sized> {
    fn description(&self) -> Option<String> {
        None
    }

    fn up(&mut self, ctx: &mut C) -> StepResult;

    fn down(&mut self, ctx: &mut C) -> StepResult;

    /// Cleanup after a failed `up()`.
    fn up_rollback(&mut self, _ctx: &mut C) -> Option<Result<(), UnitError>> {
        None
    }

    /// Cleanup after a failed `down()`.
    fn down_rollback(&mut self, _ctx: &mut C) -> Option<Result<(), UnitError>> {
        None
    }
}
