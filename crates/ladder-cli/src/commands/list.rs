use anyhow::Result;
use colored::Colorize;
use ladder_config::LadderConfig;

use crate::utils::open_engine;

pub fn cmd_list(config: &LadderConfig) -> Result<()> {
    let mut engine = open_engine(config)?;
    let current = engine.version()?;
    let migrations = engine.list_migrations()?;

    if migrations.is_empty() {
        println!("{}", "No migrations found.".bright_yellow());
        return Ok(());
    }

    for info in &migrations {
        let marker = if current.as_id() == Some(&info.id) {
            "*".bright_green().bold()
        } else {
            " ".normal()
        };
        println!(
            "{} {}: {}",
            marker,
            info.id.as_str().bright_magenta(),
            info.description.as_deref().unwrap_or("").bright_white()
        );
    }
    Ok(())
}
