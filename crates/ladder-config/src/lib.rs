pub mod config;
pub mod file_format;
pub mod store_kind;

pub use config::{LadderConfig, default_version_table};
pub use file_format::FileFormat;
pub use store_kind::StoreKind;

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;

    #[test]
    fn default_values_are_file_store_and_standard_paths() {
        let cfg = LadderConfig::default();
        assert_eq!(cfg.migrations_dir, PathBuf::from("migrations"));
        assert!(cfg.version_store().is_file());
    }

    #[test]
    fn overrides_work_via_struct_update() {
        let cfg = LadderConfig {
            migrations_dir: PathBuf::from("custom_migrations"),
            version_store: StoreKind::Table,
            ..Default::default()
        };

        assert_eq!(cfg.migrations_dir(), Path::new("custom_migrations"));
        assert!(cfg.version_store().is_table());
    }
}
