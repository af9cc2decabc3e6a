use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use ladder_core::{MigrationId, SourceError};

pub const MANIFEST_FILE_NAME: &str = "migrations.json";

pub fn manifest_path(dir: &Path) -> PathBuf {
    dir.join(MANIFEST_FILE_NAME)
}

/// Read the ordered id list from `migrations.json`.
pub fn read_manifest(dir: &Path) -> Result<Vec<MigrationId>, SourceError> {
    let path = manifest_path(dir);
    if !path.exists() {
        return Err(SourceError::NoManifest(path));
    }
    let content = fs::read_to_string(&path)
        .map_err(|e| SourceError::io(format!("read manifest: {}", path.display()), e))?;
    serde_json::from_str(&content)
        .map_err(|e| SourceError::invalid(format!("parse manifest: {}", path.display()), e))
}

/// Write `ids` as a JSON array, two-space indented, one id per line.
pub fn write_manifest(dir: &Path, ids: &[MigrationId]) -> Result<(), SourceError> {
    let path = manifest_path(dir);
    let mut content = serde_json::to_string_pretty(ids)
        .map_err(|e| SourceError::invalid("serialize manifest", e))?;
    content.push('\n');
    fs::write(&path, content)
        .map_err(|e| SourceError::io(format!("write manifest: {}", path.display()), e))
}

/// Append `id` to the end of an existing manifest.
pub fn append_to_manifest(dir: &Path, id: &MigrationId) -> Result<Vec<MigrationId>, SourceError> {
    let mut ids = read_manifest(dir)?;
    if !ids.contains(id) {
        ids.push(id.clone());
        write_manifest(dir, &ids)?;
    }
    Ok(ids)
}

/// Order ids the way a person would: digit runs compare by value.
pub fn natural_sort(ids: &mut [MigrationId]) {
    ids.sort_by(|a, b| natural_cmp(a.as_str(), b.as_str()));
}

pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_run = take_digits(&mut left);
                let r_run = take_digits(&mut right);
                let l_trim = l_run.trim_start_matches('0');
                let r_trim = r_run.trim_start_matches('0');
                let ord = l_trim
                    .len()
                    .cmp(&r_trim.len())
                    .then_with(|| l_trim.cmp(r_trim));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                if l != r {
                    return l.cmp(&r);
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}
