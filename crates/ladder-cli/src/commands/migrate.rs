use anyhow::{Result, anyhow};
use colored::Colorize;
use ladder_config::LadderConfig;
use ladder_core::{Direction, MigrationId, Target};
use ladder_engine::StepOutcome;

use crate::utils::{format_version, open_engine, report_outcome};

pub fn cmd_migrate(config: &LadderConfig, target: Target) -> Result<()> {
    let mut engine = open_engine(config)?;
    let outcome = engine.migrate_to_version(target)?;
    report_outcome(&outcome)
}

pub fn cmd_upgrade(config: &LadderConfig, id: &MigrationId) -> Result<()> {
    run_single(config, id, Direction::Up)
}

pub fn cmd_downgrade(config: &LadderConfig, id: &MigrationId) -> Result<()> {
    run_single(config, id, Direction::Down)
}

fn run_single(config: &LadderConfig, id: &MigrationId, direction: Direction) -> Result<()> {
    let mut engine = open_engine(config)?;
    match engine.run_migration(id, direction)? {
        StepOutcome::Committed(version) => {
            println!(
                "{} {} {} {}",
                direction.action_name().bright_green().bold(),
                id.as_str().bright_magenta(),
                "done, version now".bright_green(),
                format_version(&version)
            );
            Ok(())
        }
        StepOutcome::Failed(failure) => Err(anyhow!("{failure}")),
    }
}
