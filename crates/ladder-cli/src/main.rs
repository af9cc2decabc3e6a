use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ladder_core::{MigrationId, Target, Version};
use tracing_subscriber::EnvFilter;

mod commands;
mod utils;
use commands::{
    cmd_clean, cmd_downgrade, cmd_init, cmd_list, cmd_migrate, cmd_new, cmd_set_version,
    cmd_status, cmd_upgrade,
};
use utils::load_project_config;

/// ladder command-line interface.
#[derive(Parser, Debug)]
#[command(name = "ladder", author, version, about)]
struct Cli {
    /// Show resolution details and every executed statement.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
    /// Only report errors.
    #[arg(short, long, global = true)]
    quiet: bool,
    /// Path to ladder.json (defaults to the current directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create ladder.json and the migrations directory.
    Init,
    /// Create a new migration file and append it to the manifest.
    New,
    /// List migrations in manifest order.
    List,
    /// Show configuration, current version and pending migrations.
    Status,
    /// Migrate to a version: an id, 0, head, up or down.
    Migrate { target: Target },
    /// Run one migration's upgrade, regardless of the current version.
    Upgrade { id: MigrationId },
    /// Run one migration's downgrade, regardless of the current version.
    Downgrade { id: MigrationId },
    /// Reset the version to 0 and run the clean hook.
    Clean {
        /// Migrate to this target after cleaning.
        #[arg(long)]
        migrate: Option<Target>,
    },
    /// Write the current version without running any migration.
    SetVersion { version: Version },
}

fn init_tracing(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Init => cmd_init(config_path),
        Commands::New => cmd_new(&load_project_config(config_path)?),
        Commands::List => cmd_list(&load_project_config(config_path)?),
        Commands::Status => cmd_status(&load_project_config(config_path)?),
        Commands::Migrate { target } => cmd_migrate(&load_project_config(config_path)?, target),
        Commands::Upgrade { id } => cmd_upgrade(&load_project_config(config_path)?, &id),
        Commands::Downgrade { id } => cmd_downgrade(&load_project_config(config_path)?, &id),
        Commands::Clean { migrate } => cmd_clean(&load_project_config(config_path)?, migrate),
        Commands::SetVersion { version } => {
            cmd_set_version(&load_project_config(config_path)?, &version)
        }
    }
}
