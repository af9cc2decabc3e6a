use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use ladder_config::LadderConfig;
use ladder_loader::create_migration;

fn schema_url() -> String {
    // Users can override via LADDER_SCHEMA_BASE_URL.
    let base = std::env::var("LADDER_SCHEMA_BASE_URL").ok();
    let base = base
        .as_deref()
        .unwrap_or("https://raw.githubusercontent.com/ladder-rs/ladder/refs/heads/main/schemas");
    format!("{}/migration.schema.json", base.trim_end_matches('/'))
}

pub fn cmd_new(config: &LadderConfig) -> Result<()> {
    let (id, path) = create_migration(
        config.migrations_dir(),
        config.migration_format(),
        Local::now().naive_local(),
        Some(&schema_url()),
    )?;
    println!(
        "{} {} {}",
        "Created migration".bright_green(),
        id.as_str().bright_magenta(),
        path.display()
    );
    Ok(())
}
