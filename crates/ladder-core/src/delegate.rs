use crate::source::MigrationSource;
use crate::store::VersionStore;
use crate::unit::UnitError;

/// Application hooks that override engine defaults.
///
/// Every method is optional. Anything a delegate returns wins over what was
/// configured on the engine builder.
pub trait Delegate<C: ?Sized> {
    fn version_store(&mut self) -> Option<Box<dyn VersionStore<C>>> {
        None
    }

    fn source(&mut self) -> Option<Box<dyn MigrationSource<C>>> {
        None
    }

    /// Application-specific reset. `None` means the delegate has no clean hook.
    fn clean(&mut self, _ctx: &mut C) -> Option<Result<(), UnitError>> {
        None
    }
}
