//! Checker error types.

use std::path::PathBuf;

use thiserror::Error;
use vlcheck_manifest::ManifestError;

/// Errors that stop a manifest, or the whole run, from being checked.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The manifest file does not exist.
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The manifest is not a valid JSON object.
    #[error("Invalid manifest: {0}")]
    Manifest(#[from] ManifestError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CheckError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = CheckError::NotFound(PathBuf::from("missing/plugin.json"));
        assert_eq!(err.to_string(), "Input file not found: missing/plugin.json");
    }

    #[test]
    fn test_config_display() {
        let err = CheckError::config("bad");
        assert_eq!(err.to_string(), "Configuration error: bad");
    }
}
