use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ladder_config::LadderConfig;

pub const CONFIG_FILE_NAME: &str = "ladder.json";

/// Load ladder.json config from current directory.
pub fn load_config() -> Result<LadderConfig> {
    let path = PathBuf::from(CONFIG_FILE_NAME);
    if !path.exists() {
        anyhow::bail!("ladder.json not found. Run 'ladder init' first.");
    }
    read_config(&path)
}

/// Load config from a specific path.
pub fn load_config_from_path(path: PathBuf) -> Result<LadderConfig> {
    if !path.exists() {
        anyhow::bail!("ladder.json not found at: {}", path.display());
    }
    read_config(&path)
}

/// Load config from project root, with fallback to defaults.
pub fn load_config_or_default(project_root: Option<PathBuf>) -> Result<LadderConfig> {
    let config_path = match project_root {
        Some(root) => root.join(CONFIG_FILE_NAME),
        None => PathBuf::from(CONFIG_FILE_NAME),
    };

    if config_path.exists() {
        load_config_from_path(config_path)
    } else {
        Ok(LadderConfig::default())
    }
}

fn read_config(path: &Path) -> Result<LadderConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read {}", path.display()))?;
    let config: LadderConfig = serde_json::from_str(&content)
        .with_context(|| format!("parse {}", path.display()))?;
    Ok(config)
}
