//! Checker configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonschema::Validator;
use serde::{Deserialize, Serialize};
use vlcheck_manifest::ValidationOptions;

use crate::CheckError;

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Configuration for the checker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// Treat checked manifests as official Voxelite plugins.
    #[serde(default)]
    pub official: bool,

    /// Manifests to check when none are given explicitly.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,

    /// Default output format name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Directory of the configuration file; `files` are relative to it.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl CheckerConfig {
    /// Config file names, in discovery order.
    pub const CONFIG_FILES: &'static [&'static str] = &[".vlcheck.jsonc", ".vlcheck.json"];

    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds a config file in `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = dir.as_ref();
        Self::CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CheckError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CheckError::config(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let mut config = Self::from_jsonc(&content)?;
        if let Some(parent) = path.parent() {
            config.base_dir = Some(parent.to_path_buf());
        }
        Ok(config)
    }

    /// Parses configuration from JSON with comments, with schema validation.
    pub fn from_jsonc(content: &str) -> Result<Self, CheckError> {
        let value = jsonc_parser::parse_to_serde_value(content, &Default::default())
            .map_err(|e| CheckError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        let schema = CONFIG_SCHEMA.get_or_init(|| {
            let schema_json: serde_json::Value =
                serde_json::from_str(SCHEMA_JSON).expect("Invalid embedded config schema");
            Validator::new(&schema_json).expect("Invalid config schema compilation")
        });

        if let Err(e) = schema.validate(&value) {
            return Err(CheckError::config(format!(
                "Config validation failed: {} at {}",
                e,
                e.instance_path()
            )));
        }

        serde_json::from_value(value).map_err(|e| CheckError::config(format!("Invalid config: {}", e)))
    }

    /// Manifest paths from `files`, resolved against the config directory.
    pub fn resolved_files(&self) -> Vec<PathBuf> {
        self.files
            .iter()
            .map(|file| match &self.base_dir {
                Some(base) => base.join(file),
                None => PathBuf::from(file),
            })
            .collect()
    }

    /// Engine options derived from this configuration.
    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            official: self.official,
        }
    }

    /// The config file written by `vlcheck init`.
    pub fn default_contents() -> &'static str {
        r#"{
  // Set to true for official Voxelite plugins.
  "official": false,
  "files": ["plugin.json"],
  "format": "text"
}
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = CheckerConfig::new();
        assert!(!config.official);
        assert!(config.files.is_empty());
        assert_eq!(config.format, None);
    }

    #[test]
    fn test_config_from_jsonc_with_comments() {
        let config = CheckerConfig::from_jsonc(
            r#"{
                // official plugin
                "official": true,
                "files": ["plugin.json", "extra/plugin.json"]
            }"#,
        )
        .unwrap();

        assert!(config.official);
        assert_eq!(config.files.len(), 2);
        assert!(config.validation_options().official);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = CheckerConfig::from_jsonc("").unwrap();
        assert_eq!(config, CheckerConfig::default());
    }

    #[test]
    fn test_default_contents_are_valid() {
        let config = CheckerConfig::from_jsonc(CheckerConfig::default_contents()).unwrap();
        assert_eq!(config.files, vec!["plugin.json".to_string()]);
        assert_eq!(config.format.as_deref(), Some("text"));
    }

    #[rstest]
    #[case::unknown_property(r#"{ "oficial": true }"#)]
    #[case::type_mismatch(r#"{ "official": "yes" }"#)]
    #[case::invalid_format(r#"{ "format": "xml" }"#)]
    #[case::empty_file(r#"{ "files": [""] }"#)]
    fn test_config_validation_errors(#[case] json: &str) {
        let err = CheckerConfig::from_jsonc(json).unwrap_err();
        assert!(
            err.to_string().contains("Config validation failed"),
            "Error message '{}' should mention validation",
            err
        );
    }

    #[test]
    fn test_discover_prefers_jsonc() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".vlcheck.json"), "{}").unwrap();
        fs::write(dir.path().join(".vlcheck.jsonc"), "{}").unwrap();

        let found = CheckerConfig::discover(dir.path()).unwrap();
        assert_eq!(found.file_name().unwrap(), ".vlcheck.jsonc");
    }

    #[test]
    fn test_discover_none() {
        let dir = TempDir::new().unwrap();
        assert_eq!(CheckerConfig::discover(dir.path()), None);
    }

    #[test]
    fn test_from_file_resolves_files_against_config_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".vlcheck.json");
        fs::write(&path, r#"{ "files": ["plugin.json"] }"#).unwrap();

        let config = CheckerConfig::from_file(&path).unwrap();

        assert_eq!(config.resolved_files(), vec![dir.path().join("plugin.json")]);
    }
}
