use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use ladder_config::FileFormat;
use ladder_core::MigrationId;

use crate::file::MigrationFile;
use crate::manifest::{append_to_manifest, manifest_path, write_manifest};
use crate::source::CLEAN_FILE_NAME;

const CLEAN_TEMPLATE: &str = "\
-- Statements that reset the database to an empty state.
-- Run by `ladder clean` after the version has been reset to 0.
";

/// Create the migrations directory with an empty manifest and a `clean.sql`
/// template. Existing files are left alone.
///
/// Returns `true` when the directory itself was created.
pub fn init_migrations_dir(dir: &Path) -> Result<bool> {
    let created = !dir.exists();
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;

    if !manifest_path(dir).exists() {
        write_manifest(dir, &[])?;
    }
    let clean = dir.join(CLEAN_FILE_NAME);
    if !clean.exists() {
        fs::write(&clean, CLEAN_TEMPLATE).with_context(|| format!("write {}", clean.display()))?;
    }
    Ok(created)
}

/// Id for a migration created at `now`.
pub fn migration_id_at(now: NaiveDateTime) -> Result<MigrationId> {
    let raw = now.format("%Y%m%d_%H%M%S").to_string();
    MigrationId::new(raw).context("build migration id")
}

/// Write a new migration template and append it to the manifest.
///
/// The file goes into the year directory for `now` when that directory
/// exists, otherwise into `dir` itself.
pub fn create_migration(
    dir: &Path,
    format: FileFormat,
    now: NaiveDateTime,
    schema_url: Option<&str>,
) -> Result<(MigrationId, PathBuf)> {
    if !dir.exists() {
        bail!(
            "migrations directory {} does not exist. Run 'ladder init' first.",
            dir.display()
        );
    }

    let id = migration_id_at(now)?;
    let year_dir = dir.join(now.format("%Y").to_string());
    let target_dir = if year_dir.is_dir() { year_dir } else { dir.to_path_buf() };
    let path = target_dir.join(format!("{id}.{}", format.extension()));
    if path.exists() {
        bail!("migration file already exists: {}", path.display());
    }

    let template = MigrationFile {
        schema: schema_url.map(str::to_string),
        ..MigrationFile::template()
    };
    let content = template
        .render(format)
        .map_err(|e| anyhow::anyhow!("render migration template: {e}"))?;
    fs::write(&path, content).with_context(|| format!("write {}", path.display()))?;
    append_to_manifest(dir, &id)?;
    Ok((id, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::read_manifest;
    use chrono::NaiveDate;
    use rstest::rstest;
    use tempfile::tempdir;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 9, 18)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn init_creates_manifest_and_clean_template() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("migrations");

        assert!(init_migrations_dir(&dir).unwrap());

        assert_eq!(fs::read_to_string(manifest_path(&dir)).unwrap(), "[]\n");
        assert!(dir.join(CLEAN_FILE_NAME).exists());
        assert!(!init_migrations_dir(&dir).unwrap());
    }

    #[test]
    fn init_keeps_existing_manifest() {
        let tmp = tempdir().unwrap();
        fs::write(manifest_path(tmp.path()), r#"["20180918_000001"]"#).unwrap();

        init_migrations_dir(tmp.path()).unwrap();

        assert_eq!(read_manifest(tmp.path()).unwrap().len(), 1);
    }

    #[rstest]
    #[case(FileFormat::Json, "json")]
    #[case(FileFormat::Yaml, "yaml")]
    #[case(FileFormat::Yml, "yml")]
    fn create_writes_template_and_appends(#[case] format: FileFormat, #[case] ext: &str) {
        let tmp = tempdir().unwrap();
        init_migrations_dir(tmp.path()).unwrap();

        let (id, path) = create_migration(tmp.path(), format, at(10, 30, 5), None).unwrap();

        assert_eq!(id.as_str(), "20180918_103005");
        assert_eq!(path, tmp.path().join(format!("20180918_103005.{ext}")));
        assert_eq!(read_manifest(tmp.path()).unwrap(), vec![id]);
        assert!(MigrationFile::load(&path).is_ok());
    }

    #[test]
    fn create_embeds_schema_hint() {
        let tmp = tempdir().unwrap();
        init_migrations_dir(tmp.path()).unwrap();

        let (_, path) = create_migration(
            tmp.path(),
            FileFormat::Json,
            at(4, 5, 6),
            Some("https://example.com/migration.schema.json"),
        )
        .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"$schema\": \"https://example.com/migration.schema.json\""));
    }

    #[test]
    fn create_prefers_year_dir() {
        let tmp = tempdir().unwrap();
        init_migrations_dir(tmp.path()).unwrap();
        fs::create_dir_all(tmp.path().join("2018")).unwrap();

        let (_, path) = create_migration(tmp.path(), FileFormat::Json, at(0, 0, 1), None).unwrap();

        assert_eq!(path, tmp.path().join("2018/20180918_000001.json"));
    }

    #[test]
    fn create_refuses_to_overwrite() {
        let tmp = tempdir().unwrap();
        init_migrations_dir(tmp.path()).unwrap();
        create_migration(tmp.path(), FileFormat::Json, at(1, 2, 3), None).unwrap();

        let err = create_migration(tmp.path(), FileFormat::Json, at(1, 2, 3), None).unwrap_err();

        assert!(err.to_string().contains("already exists"));
        assert_eq!(read_manifest(tmp.path()).unwrap().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn failed_write_leaves_manifest_untouched() {
        let tmp = tempdir().unwrap();
        init_migrations_dir(tmp.path()).unwrap();
        std::os::unix::fs::symlink(
            tmp.path().join("missing/target.json"),
            tmp.path().join("20180918_010203.json"),
        )
        .unwrap();

        let err = create_migration(tmp.path(), FileFormat::Json, at(1, 2, 3), None).unwrap_err();

        assert!(err.to_string().contains("write"));
        assert!(read_manifest(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn create_requires_initialized_dir() {
        let tmp = tempdir().unwrap();
        let err = create_migration(
            &tmp.path().join("missing"),
            FileFormat::Json,
            at(1, 2, 3),
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("ladder init"));
    }
}
