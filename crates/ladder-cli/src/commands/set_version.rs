use anyhow::Result;
use colored::Colorize;
use ladder_config::LadderConfig;
use ladder_core::Version;

use crate::utils::{format_version, open_engine};

pub fn cmd_set_version(config: &LadderConfig, version: &Version) -> Result<()> {
    let mut engine = open_engine(config)?;
    engine.set_version(version)?;
    println!("{} {}", "Version set to".bright_green(), format_version(version));
    Ok(())
}
