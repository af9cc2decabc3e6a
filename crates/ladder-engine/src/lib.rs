pub mod audit;
pub mod catalog;
pub mod engine;
pub mod error;
mod executor;
pub mod outcome;
pub mod registry;
pub mod resolve;

pub use audit::AuditTrail;
pub use catalog::Catalog;
pub use engine::{Engine, EngineBuilder, MigrationInfo};
pub use error::{EngineError, FailureKind, RollbackFailure, RollbackReport, StepFailure};
pub use executor::StepOutcome;
pub use outcome::{HaltReason, Outcome};
pub use registry::Registry;
