use anyhow::Result;
use colored::Colorize;
use ladder_config::LadderConfig;
use ladder_core::Target;

use crate::utils::{open_engine, report_outcome};

pub fn cmd_clean(config: &LadderConfig, migrate: Option<Target>) -> Result<()> {
    let mut engine = open_engine(config)?;
    engine.clean()?;
    println!("{}", "Cleaned, version reset to 0".bright_green());

    match migrate {
        Some(target) => report_outcome(&engine.migrate_to_version(target)?),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ladder_core::Version;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn cmd_clean_runs_clean_sql_then_migrates() {
        let tmp = tempdir().unwrap();
        let mut config = LadderConfig::default().rooted_at(tmp.path());
        config.database = Some(tmp.path().join("app.db"));
        let dir = config.migrations_dir().to_path_buf();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("migrations.json"), r#"["20180918_000001"]"#).unwrap();
        fs::write(
            dir.join("20180918_000001.json"),
            r#"{"up": ["CREATE TABLE users (id INTEGER)"]}"#,
        )
        .unwrap();
        fs::write(dir.join("clean.sql"), "DROP TABLE IF EXISTS users;").unwrap();

        cmd_clean(&config, Some(Target::Head)).unwrap();
        cmd_clean(&config, Some(Target::Head)).unwrap();
        assert_eq!(
            open_engine(&config).unwrap().version().unwrap().to_string(),
            "20180918_000001"
        );

        cmd_clean(&config, None).unwrap();
        assert_eq!(open_engine(&config).unwrap().version().unwrap(), Version::Zero);
    }
}
