use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use ladder_config::FileFormat;
use ladder_core::{MigrationId, SourceError};
use tracing::debug;

/// Whether `stem` looks like `YYYYMMDD_HHMMSS`.
pub fn is_migration_stem(stem: &str) -> bool {
    let bytes = stem.as_bytes();
    bytes.len() == 15
        && bytes[8] == b'_'
        && bytes[..8].iter().all(u8::is_ascii_digit)
        && bytes[9..].iter().all(u8::is_ascii_digit)
}

fn is_year_dir(name: &str) -> bool {
    name.len() == 4 && name.bytes().all(|b| b.is_ascii_digit())
}

/// Find migration files in `dir` and its four-digit year subdirectories.
///
/// Files are not opened. An id found twice (another extension or another
/// year directory) is an error.
pub fn discover_migrations(dir: &Path) -> Result<HashMap<MigrationId, PathBuf>, SourceError> {
    let mut found = HashMap::new();
    if !dir.exists() {
        return Ok(found);
    }

    scan(dir, &mut found)?;
    for entry in read_dir(dir)? {
        let path = entry.path();
        let is_year = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(is_year_dir);
        if path.is_dir() && is_year {
            scan(&path, &mut found)?;
        }
    }

    debug!("Discovered {} migration files in {}", found.len(), dir.display());
    Ok(found)
}

fn read_dir(dir: &Path) -> Result<Vec<fs::DirEntry>, SourceError> {
    let context = || format!("read migrations directory: {}", dir.display());
    fs::read_dir(dir)
        .map_err(|e| SourceError::io(context(), e))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| SourceError::io(context(), e))
}

fn scan(dir: &Path, found: &mut HashMap<MigrationId, PathBuf>) -> Result<(), SourceError> {
    for entry in read_dir(dir)? {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let supported = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(FileFormat::from_extension)
            .is_some();
        if !supported || !is_migration_stem(stem) {
            continue;
        }

        let id = MigrationId::new(stem)
            .map_err(|e| SourceError::invalid(format!("migration file {}", path.display()), e))?;
        if let Some(previous) = found.get(&id) {
            return Err(SourceError::invalid(
                format!("migration {id}"),
                format!(
                    "defined by both {} and {}",
                    previous.display(),
                    path.display()
                ),
            ));
        }
        found.insert(id, path);
    }
    Ok(())
}
