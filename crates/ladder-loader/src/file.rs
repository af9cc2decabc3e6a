use std::fs;
use std::path::Path;

use ladder_config::FileFormat;
use ladder_core::UnitError;
use serde::{Deserialize, Serialize};

/// On-disk shape of one SQL migration.
///
/// Each list holds statements (or statement batches) executed in order. A
/// missing `down` makes the migration one-way.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MigrationFile {
    /// Editor hint pointing at `migration.schema.json`; ignored by the loader.
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub up: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub down: Option<Vec<String>>,
    /// Cleanup run after `up` fails.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up_rollback: Option<Vec<String>>,
    /// Cleanup run after `down` fails.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub down_rollback: Option<Vec<String>>,
}

impl MigrationFile {
    /// Read and parse a migration file, picking the parser from its extension.
    pub fn load(path: &Path) -> Result<Self, UnitError> {
        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(FileFormat::from_extension)
            .ok_or_else(|| format!("unsupported migration file: {}", path.display()))?;
        let content = fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    pub fn parse(content: &str, format: FileFormat) -> Result<Self, UnitError> {
        let file: Self = match format {
            FileFormat::Json => serde_json::from_str(content)?,
            FileFormat::Yaml | FileFormat::Yml => serde_yaml::from_str(content)?,
        };
        Ok(file)
    }

    pub fn render(&self, format: FileFormat) -> Result<String, UnitError> {
        let text = match format {
            FileFormat::Json => {
                let mut text = serde_json::to_string_pretty(self)?;
                text.push('\n');
                text
            }
            FileFormat::Yaml | FileFormat::Yml => serde_yaml::to_string(self)?,
        };
        Ok(text)
    }

    pub fn is_one_way(&self) -> bool {
        self.down.is_none()
    }

    /// Starting point written by `ladder new`.
    pub fn template() -> Self {
        Self {
            schema: None,
            description: Some("Describe this migration".to_string()),
            up: vec!["-- SQL to apply".to_string()],
            down: Some(vec!["-- SQL to revert".to_string()]),
            up_rollback: None,
            down_rollback: None,
        }
    }
}
