use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use ladder_core::{
    CleanHook, LoadError, MigrationId, MigrationSource, MigrationUnit, SourceError, UnitError,
    UnitFactory, UnitMap,
};
use rusqlite::Connection;
use tracing::{info, warn};

use crate::discover::discover_migrations;
use crate::file::MigrationFile;
use crate::manifest::{natural_sort, read_manifest, write_manifest};
use crate::sql::SqlMigration;

pub const CLEAN_FILE_NAME: &str = "clean.sql";

/// SQL migrations stored as files under one directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    offer_manifest_upgrade: bool,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            offer_manifest_upgrade: false,
        }
    }

    /// Generate `migrations.json` from the discovered files when it is missing.
    pub fn offer_manifest_upgrade(mut self, enabled: bool) -> Self {
        self.offer_manifest_upgrade = enabled;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn clean_path(&self) -> PathBuf {
        self.dir.join(CLEAN_FILE_NAME)
    }

    fn upgrade_manifest(&self) -> Result<Vec<MigrationId>, SourceError> {
        let mut ids: Vec<MigrationId> = discover_migrations(&self.dir)?.into_keys().collect();
        natural_sort(&mut ids);
        write_manifest(&self.dir, &ids)?;
        info!(
            "Generated migrations.json with {} migrations in {}; check the order before migrating.",
            ids.len(),
            self.dir.display()
        );
        Ok(ids)
    }
}

impl MigrationSource<Connection> for DirectorySource {
    fn manifest(&self) -> Result<Vec<MigrationId>, SourceError> {
        match read_manifest(&self.dir) {
            Err(SourceError::NoManifest(path)) if self.offer_manifest_upgrade => {
                warn!("No manifest at {}, generating one", path.display());
                self.upgrade_manifest()
            }
            other => other,
        }
    }

    fn units(&self) -> Result<UnitMap<Connection>, SourceError> {
        let discovered = discover_migrations(&self.dir)?;
        let mut units: UnitMap<Connection> = HashMap::with_capacity(discovered.len());
        for (id, path) in discovered {
            let unit_id = id.clone();
            let factory = move || -> Result<Box<dyn MigrationUnit<Connection>>, LoadError> {
                let file =
                    MigrationFile::load(&path).map_err(|e| LoadError::new(unit_id.clone(), e))?;
                Ok(Box::new(SqlMigration::new(unit_id.clone(), file)))
            };
            units.insert(id, Box::new(factory) as UnitFactory<Connection>);
        }
        Ok(units)
    }

    fn clean_hook(&self) -> Option<CleanHook<Connection>> {
        let path = self.clean_path();
        if !path.is_file() {
            return None;
        }
        Some(Box::new(move |conn: &mut Connection| -> Result<(), UnitError> {
            let sql = fs::read_to_string(&path)?;
            conn.execute_batch(&sql)?;
            Ok(())
        }))
    }
}
