//! Error types for Hex Bounce.
//!
//! The simulation itself never fails: numeric faults are recovered by
//! resetting the ball. Only loading and validating configuration can fail.

use std::fmt;

/// Errors that can occur while loading or validating [`crate::Settings`].
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the settings file.
    Io(std::io::Error),
    /// Settings JSON could not be parsed.
    Parse(serde_json::Error),
    /// A field holds a value the simulation cannot run with.
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read settings: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse settings: {}", e),
            ConfigError::Invalid { field, reason } => {
                write!(f, "Invalid setting `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}
