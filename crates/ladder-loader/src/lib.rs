pub mod config;
pub mod discover;
pub mod file;
pub mod manifest;
pub mod scaffold;
pub mod source;
pub mod sql;

pub use config::{CONFIG_FILE_NAME, load_config, load_config_from_path, load_config_or_default};
pub use discover::{discover_migrations, is_migration_stem};
pub use file::MigrationFile;
pub use manifest::{
    MANIFEST_FILE_NAME, append_to_manifest, natural_sort, read_manifest, write_manifest,
};
pub use scaffold::{create_migration, init_migrations_dir, migration_id_at};
pub use source::{CLEAN_FILE_NAME, DirectorySource};
pub use sql::SqlMigration;
