use std::fs;
use std::path::{Path, PathBuf};

use ladder_core::{StoreError, VERSION_ZERO_TOKEN, Version, VersionStore};
use tracing::debug;

pub const VERSION_FILE_NAME: &str = "version.txt";

/// Keeps the version as a single token in a text file.
#[derive(Debug, Clone)]
pub struct FileVersionStore {
    path: PathBuf,
}

impl FileVersionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `version.txt` inside the migrations directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(VERSION_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_token(&self, token: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::backend(format!("cannot create {}", parent.display()), e)
            })?;
        }
        fs::write(&self.path, format!("{token}\n"))
            .map_err(|e| StoreError::backend(format!("cannot write {}", self.path.display()), e))
    }
}

impl<C: ?Sized> VersionStore<C> for FileVersionStore {
    fn version(&mut self, _ctx: &mut C) -> Result<Version, StoreError> {
        if !self.path.exists() {
            debug!("Creating version file {}", self.path.display());
            self.write_token(VERSION_ZERO_TOKEN)?;
            return Ok(Version::Zero);
        }

        let raw = fs::read_to_string(&self.path)
            .map_err(|e| StoreError::backend(format!("cannot read {}", self.path.display()), e))?;
        Version::parse(&raw).map_err(|source| StoreError::Corrupt {
            raw: raw.trim().to_string(),
            source,
        })
    }

    fn set_version(&mut self, _ctx: &mut C, version: &Version) -> Result<(), StoreError> {
        self.write_token(&version.to_string())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
