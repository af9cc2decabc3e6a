use serde::{Deserialize, Serialize};

/// Supported file formats for migration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Json,
    Yaml,
    Yml,
}

impl FileFormat {
    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            FileFormat::Json => "json",
            FileFormat::Yaml => "yaml",
            FileFormat::Yml => "yml",
        }
    }

    /// Format for a file extension, if it is one ladder reads.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "json" => Some(FileFormat::Json),
            "yaml" => Some(FileFormat::Yaml),
            "yml" => Some(FileFormat::Yml),
            _ => None,
        }
    }
}

impl Default for FileFormat {
    fn default() -> Self {
        FileFormat::Json
    }
}
