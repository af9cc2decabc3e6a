use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Persisted token for [`Version::Zero`].
pub const VERSION_ZERO_TOKEN: &str = "0";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseIdError {
    #[error("migration id must not be empty")]
    Empty,
    #[error("migration id '{0}' is reserved for version zero")]
    Reserved(String),
    #[error("migration id '{0}' contains whitespace or ':'")]
    InvalidChar(String),
}

/// Opaque migration identifier.
///
/// Ids are usually timestamp-derived (`20090719_000001`), but the engine never
/// compares them: order comes from the catalog, so this type has no `Ord`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(try_from = "String", into = "String")]
pub struct MigrationId(String);

impl MigrationId {
    pub fn new(raw: impl Into<String>) -> Result<Self, ParseIdError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ParseIdError::Empty);
        }
        if raw == VERSION_ZERO_TOKEN {
            return Err(ParseIdError::Reserved(raw));
        }
        if raw.chars().any(|c| c.is_whitespace() || c == ':') {
            return Err(ParseIdError::InvalidChar(raw));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MigrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MigrationId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for MigrationId {
    type Error = ParseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MigrationId> for String {
    fn from(id: MigrationId) -> Self {
        id.0
    }
}

/// Position of the target system: before any migration, or at a catalog id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Version {
    Zero,
    At(MigrationId),
}

impl Version {
    /// Parse a persisted version token. `"0"` is zero, anything else an id.
    pub fn parse(token: &str) -> Result<Self, ParseIdError> {
        let token = token.trim();
        if token == VERSION_ZERO_TOKEN {
            Ok(Version::Zero)
        } else {
            MigrationId::new(token).map(Version::At)
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Version::Zero)
    }

    pub fn as_id(&self) -> Option<&MigrationId> {
        match self {
            Version::Zero => None,
            Version::At(id) => Some(id),
        }
    }
}

impl Default for Version {
    fn default() -> Self {
        Version::Zero
    }
}

impl From<MigrationId> for Version {
    fn from(id: MigrationId) -> Self {
        Version::At(id)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::Zero => f.write_str(VERSION_ZERO_TOKEN),
            Version::At(id) => id.fmt(f),
        }
    }
}

impl FromStr for Version {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Human-readable action name used in log lines.
    pub fn action_name(self) -> &'static str {
        match self {
            Direction::Up => "Upgrade",
            Direction::Down => "Downgrade",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => f.write_str("up"),
            Direction::Down => f.write_str("down"),
        }
    }
}

/// What a caller asks the engine to reach.
///
/// `Head`, `Up` and `Down` are symbolic and resolved against the catalog and the
/// current version before anything runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Zero,
    Head,
    Up,
    Down,
    Version(MigrationId),
}

impl From<Version> for Target {
    fn from(version: Version) -> Self {
        match version {
            Version::Zero => Target::Zero,
            Version::At(id) => Target::Version(id),
        }
    }
}

impl From<MigrationId> for Target {
    fn from(id: MigrationId) -> Self {
        Target::Version(id)
    }
}

impl FromStr for Target {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "0" | "zero" => Ok(Target::Zero),
            "head" => Ok(Target::Head),
            "up" => Ok(Target::Up),
            "down" => Ok(Target::Down),
            _ => MigrationId::new(trimmed).map(Target::Version),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Zero => f.write_str(VERSION_ZERO_TOKEN),
            Target::Head => f.write_str("head"),
            Target::Up => f.write_str("up"),
            Target::Down => f.write_str("down"),
            Target::Version(id) => id.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("0")]
    #[case("2009 0719")]
    #[case("20090719:1")]
    fn migration_id_rejects_invalid_tokens(#[case] raw: &str) {
        assert!(MigrationId::new(raw).is_err());
    }

    #[test]
    fn migration_id_serde_is_a_plain_string() {
        let id = MigrationId::new("20090719_000001").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"20090719_000001\"");
        let back: MigrationId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<MigrationId>("\"0\"").is_err());
    }

    #[test]
    fn version_parses_zero_token_and_ids() {
        assert_eq!(Version::parse("0").unwrap(), Version::Zero);
        assert_eq!(Version::parse(" 0\n").unwrap(), Version::Zero);
        let v = Version::parse("20090719_000002").unwrap();
        assert_eq!(v.as_id().map(MigrationId::as_str), Some("20090719_000002"));
        assert_eq!(v.to_string(), "20090719_000002");
        assert_eq!(Version::Zero.to_string(), "0");
    }

    #[rstest]
    #[case("head", Target::Head)]
    #[case("HEAD", Target::Head)]
    #[case("up", Target::Up)]
    #[case("Down", Target::Down)]
    #[case("0", Target::Zero)]
    #[case("zero", Target::Zero)]
    fn target_parses_symbolic_names(#[case] raw: &str, #[case] expected: Target) {
        assert_eq!(raw.parse::<Target>().unwrap(), expected);
    }

    #[test]
    fn target_falls_back_to_migration_id() {
        let target: Target = "20090719_000003".parse().unwrap();
        assert_eq!(
            target,
            Target::Version(MigrationId::new("20090719_000003").unwrap())
        );
    }

    #[test]
    fn direction_display_matches_audit_format() {
        assert_eq!(Direction::Up.to_string(), "up");
        assert_eq!(Direction::Down.to_string(), "down");
        assert_eq!(Direction::Down.action_name(), "Downgrade");
    }
}
