use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use ladder_config::LadderConfig;
use ladder_core::Version;
use ladder_loader::init_migrations_dir;

use crate::utils::{config_root, default_config_path, open_engine};

pub fn cmd_init(config_path: Option<&Path>) -> Result<()> {
    let path = config_path.map_or_else(default_config_path, Path::to_path_buf);
    if path.exists() {
        bail!("{} already exists", path.display());
    }

    let config = LadderConfig {
        database: Some(PathBuf::from("ladder.db")),
        ..LadderConfig::default()
    };
    let json = serde_json::to_string_pretty(&config).context("serialize default config")?;
    fs::write(&path, json).with_context(|| format!("write {}", path.display()))?;
    println!("{} {}", "Created".bright_green(), path.display());

    let config = match config_root(&path) {
        Some(root) => config.rooted_at(root),
        None => config,
    };
    if init_migrations_dir(config.migrations_dir())? {
        open_engine(&config)?.set_version(&Version::Zero)?;
        println!(
            "{} {}",
            "Created".bright_green(),
            config.migrations_dir().display()
        );
    }
    Ok(())
}
