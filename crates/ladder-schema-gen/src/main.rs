use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use ladder_config::LadderConfig;
use ladder_core::MigrationId;
use ladder_loader::MigrationFile;
use schemars::{Schema, schema_for};

#[derive(Debug, Parser)]
#[command(
    name = "ladder-schema-gen",
    about = "Emit JSON Schemas for ladder migration files, the manifest and ladder.json."
)]
struct Args {
    /// Output directory for schema files.
    #[arg(short = 'o', long = "out", default_value = "schemas")]
    out: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    run(args.out)
}

fn write_schema(out: &Path, file_name: &str, schema: &Schema) -> Result<PathBuf> {
    let path = out.join(file_name);
    let text = serde_json::to_string_pretty(schema)
        .with_context(|| format!("serialize {file_name}"))?;
    fs::write(&path, text).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

fn run(out: PathBuf) -> Result<()> {
    if !out.exists() {
        fs::create_dir_all(&out).with_context(|| format!("create dir {}", out.display()))?;
    }

    let written = [
        write_schema(&out, "migration.schema.json", &schema_for!(MigrationFile))?,
        write_schema(&out, "manifest.schema.json", &schema_for!(Vec<MigrationId>))?,
        write_schema(&out, "config.schema.json", &schema_for!(LadderConfig))?,
    ];

    println!("Wrote schemas:");
    for path in &written {
        println!("  {}", path.display());
    }
    Ok(())
}
