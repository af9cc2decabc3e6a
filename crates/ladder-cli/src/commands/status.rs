use anyhow::Result;
use colored::Colorize;
use ladder_config::LadderConfig;
use ladder_core::Version;

use crate::utils::{format_version, open_engine};

pub fn cmd_status(config: &LadderConfig) -> Result<()> {
    println!("{}", "Configuration:".bright_cyan().bold());
    println!(
        "  {} {}",
        "Migrations directory:".cyan(),
        format!("{}", config.migrations_dir().display()).bright_white()
    );
    if let Some(db) = config.database() {
        println!(
            "  {} {}",
            "Database:".cyan(),
            format!("{}", db.display()).bright_white()
        );
    }
    println!("  {} {:?}", "Version store:".cyan(), config.version_store());
    if config.version_store().is_table() {
        println!(
            "  {} {}",
            "Version table:".cyan(),
            config.version_table().bright_white()
        );
    }
    println!(
        "  {} {:?}",
        "Migration format:".cyan(),
        config.migration_format()
    );
    println!();

    let mut engine = open_engine(config)?;
    let current = engine.version()?;
    let catalog = engine.catalog();

    println!(
        "{} {}",
        "Migrations:".bright_cyan().bold(),
        catalog.count().to_string().bright_yellow()
    );
    println!("  {} {}", "Current version:".cyan(), format_version(&current));
    match engine.latest_version() {
        Some(latest) => println!(
            "  {} {}",
            "Latest version:".cyan(),
            latest.as_str().bright_magenta()
        ),
        None => println!("  {} {}", "Latest version:".cyan(), "none".bright_black()),
    }

    let applied = match &current {
        Version::Zero => Some(0),
        Version::At(id) => catalog.index_of(id).ok().map(|index| index + 1),
    };
    match applied {
        Some(applied) => {
            let pending = catalog.count() - applied;
            if pending == 0 {
                println!("{}", "Up to date.".bright_green());
            } else {
                println!(
                    "{} {}",
                    "Pending migrations:".bright_yellow().bold(),
                    pending.to_string().bright_yellow()
                );
                for id in catalog.iter().skip(applied) {
                    println!("  {} {}", "-".bright_white(), id.as_str().bright_blue());
                }
            }
        }
        None => println!(
            "{}",
            "Current version is not in the manifest. Fix it with `ladder set-version`."
                .bright_red()
        ),
    }
    Ok(())
}
