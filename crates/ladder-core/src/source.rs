use std::collections::HashMap;
use std::path::PathBuf;

use crate::migration::MigrationId;
use crate::unit::{MigrationUnit, UnitError};

/// Builds a fresh unit for one step.
pub type UnitFactory<C> = Box<dyn Fn() -> Result<Box<dyn MigrationUnit<C>>, LoadError>>;

/// Discovered units keyed by id.
pub type UnitMap<C> = HashMap<MigrationId, UnitFactory<C>>;

/// Resets the target system to a clean slate.
pub type CleanHook<C> = Box<dyn FnMut(&mut C) -> Result<(), UnitError>>;

/// A unit could not be materialized.
#[derive(thiserror::Error, Debug)]
#[error("cannot load migration {id}: {source}")]
pub struct LoadError {
    pub id: MigrationId,
    #[source]
    pub source: UnitError,
}

impl LoadError {
    pub fn new(id: MigrationId, source: impl Into<UnitError>) -> Self {
        Self {
            id,
            source: source.into(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("no manifest file found: {}", .0.display())]
    NoManifest(PathBuf),
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{context}: {source}")]
    Invalid {
        context: String,
        #[source]
        source: UnitError,
    },
}

impl SourceError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        SourceError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn invalid(context: impl Into<String>, source: impl Into<UnitError>) -> Self {
        SourceError::Invalid {
            context: context.into(),
            source: source.into(),
        }
    }
}

/// Supplies the two independent inputs of a catalog: the ordering manifest and
/// the set of units that actually exist. The engine cross-checks them.
pub trait MigrationSource<C: ?Sized> {
    fn manifest(&self) -> Result<Vec<MigrationId>, SourceError>;

    fn units(&self) -> Result<UnitMap<C>, SourceError>;

    /// Default clean hook discovered alongside the migrations, if any.
    fn clean_hook(&self) -> Option<CleanHook<C>> {
        None
    }
}
