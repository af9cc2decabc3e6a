use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use colored::{ColoredString, Colorize};
use ladder_config::{LadderConfig, StoreKind};
use ladder_core::Version;
use ladder_engine::{Engine, HaltReason, Outcome};
use ladder_loader::{DirectorySource, load_config, load_config_from_path};
use ladder_store::{FileVersionStore, TableVersionStore};
use rusqlite::Connection;

/// Directory that relative paths in a config file are resolved against.
pub fn config_root(config_path: &Path) -> Option<&Path> {
    config_path.parent().filter(|p| !p.as_os_str().is_empty())
}

/// Load ladder.json from `path`, or from the current directory.
pub fn load_project_config(path: Option<&Path>) -> Result<LadderConfig> {
    match path {
        Some(path) => {
            let config = load_config_from_path(path.to_path_buf())?;
            Ok(match config_root(path) {
                Some(root) => config.rooted_at(root),
                None => config,
            })
        }
        None => load_config(),
    }
}

/// Open the configured database and build an engine over the migrations dir.
pub fn open_engine(config: &LadderConfig) -> Result<Engine<Connection>> {
    let db = config
        .database()
        .ok_or_else(|| anyhow!("no database configured. Set \"database\" in ladder.json."))?;
    let conn = Connection::open(db).with_context(|| format!("open database {}", db.display()))?;

    let source = DirectorySource::new(config.migrations_dir())
        .offer_manifest_upgrade(config.offer_manifest_upgrade());
    let builder = Engine::builder(conn).source(source);
    let builder = match config.version_store() {
        StoreKind::File => builder.version_store(FileVersionStore::in_dir(config.migrations_dir())),
        StoreKind::Table => builder.version_store(TableVersionStore::new(config.version_table())?),
    };
    Ok(builder.build()?)
}

pub fn format_version(version: &Version) -> ColoredString {
    match version {
        Version::Zero => "0".bright_black(),
        Version::At(id) => id.as_str().bright_magenta(),
    }
}

/// Print what a migration run did; fails when the target was not reached.
pub fn report_outcome(outcome: &Outcome) -> Result<()> {
    for step in outcome.steps() {
        println!("  {} {}", "-".bright_white(), step.to_string().bright_blue());
    }
    match outcome {
        Outcome::AlreadyAt(version) => {
            println!("{} {}", "Already at version".yellow(), format_version(version));
            Ok(())
        }
        Outcome::Reached { version, steps } => {
            println!(
                "{} {} ({} {})",
                "Reached version".bright_green().bold(),
                format_version(version),
                steps.len().to_string().bright_yellow(),
                if steps.len() == 1 { "step" } else { "steps" }
            );
            Ok(())
        }
        Outcome::Halted {
            version,
            target,
            reason,
            ..
        } => {
            println!(
                "{} {} {} {}",
                "Stopped at version".bright_red().bold(),
                format_version(version),
                "before reaching".bright_red(),
                format_version(target)
            );
            match reason {
                HaltReason::StepFailed(failure) => Err(anyhow!("{failure}")),
                HaltReason::BoundaryReached => Err(anyhow!("no migration left to run")),
            }
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from(ladder_loader::CONFIG_FILE_NAME)
}
