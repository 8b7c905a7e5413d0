//! Error types for scheme construction and role resolution.

use thiserror::Error;

use crate::role::Role;
use crate::spec::SpecVersion;

/// Everything that can go wrong building a scheme or resolving a role.
///
/// Out-of-range tones are not errors: they are clamped where they arise.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemeError {
    /// The role exists in the catalog but not in the active spec version
    #[error("Role `{role}` is not available in the {version} color spec")]
    RoleUnavailable { role: Role, version: SpecVersion },

    /// No role has this name
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// No spec version has this name
    #[error("Unknown spec version: {0} (expected 2021 or 2025)")]
    UnknownSpecVersion(String),

    /// Source color could not be parsed
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Contrast level outside [-1, 1]
    #[error("Contrast level {0} is outside [-1, 1]")]
    ContrastOutOfRange(f64),

    /// Configuration file could not be read or parsed
    #[error("Config error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for SchemeError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for scheme operations
pub type Result<T> = std::result::Result<T, SchemeError>;
