pub mod audit;
pub mod delegate;
pub mod migration;
pub mod source;
pub mod store;
pub mod unit;

pub use audit::AuditEntry;
pub use delegate::Delegate;
pub use migration::{Direction, MigrationId, ParseIdError, Target, VERSION_ZERO_TOKEN, Version};
pub use source::{CleanHook, LoadError, MigrationSource, SourceError, UnitFactory, UnitMap};
pub use store::{MemoryVersionStore, StoreError, VersionStore};
pub use unit::{MigrationUnit, StepError, StepResult, UnitError};
