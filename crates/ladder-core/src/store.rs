use crate::migration::{ParseIdError, Version};
use crate::unit::UnitError;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// The backing resource (file, connection, table) cannot be used.
    #[error("version store unavailable: {0}")]
    Unavailable(String),
    #[error("version store unavailable: {context}: {source}")]
    Backend {
        context: String,
        #[source]
        source: UnitError,
    },
    #[error("version store holds an invalid version '{raw}': {source}")]
    Corrupt {
        raw: String,
        #[source]
        source: ParseIdError,
    },
}

impl StoreError {
    pub fn backend(context: impl Into<String>, source: impl Into<UnitError>) -> Self {
        StoreError::Backend {
            context: context.into(),
            source: source.into(),
        }
    }
}

/// Where the current version lives.
///
/// Implementations must report [`Version::Zero`] the first time an unset store
/// is read, initialising their backing resource if needed.
pub trait VersionStore<C: ?Sized> {
    fn version(&mut self, ctx: &mut C) -> Result<Version, StoreError>;

    fn set_version(&mut self, ctx: &mut C, version: &Version) -> Result<(), StoreError>;

    /// Short name for log lines.
    fn name(&self) -> &'static str;
}

/// Keeps the version in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryVersionStore {
    version: Option<Version>,
}

impl MemoryVersionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(version: Version) -> Self {
        Self {
            version: Some(version),
        }
    }
}

impl<C: ?Sized> VersionStore<C> for MemoryVersionStore {
    fn version(&mut self, _ctx: &mut C) -> Result<Version, StoreError> {
        Ok(self.version.get_or_insert(Version::Zero).clone())
    }

    fn set_version(&mut self, _ctx: &mut C, version: &Version) -> Result<(), StoreError> {
        self.version = Some(version.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
