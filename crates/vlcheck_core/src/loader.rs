//! Manifest file loading.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;
use vlcheck_manifest::ManifestError;

use crate::CheckError;

/// Reads and parses a manifest file into its top-level object.
///
/// A missing file, unparsable JSON and a non-object root are all
/// precondition failures; no field rules run for such a file.
pub fn load_manifest(path: impl AsRef<Path>) -> Result<Map<String, Value>, CheckError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(CheckError::NotFound(path.to_path_buf()));
    }

    debug!("Loading manifest {}", path.display());
    let content = fs::read_to_string(path)?;
    parse_manifest(&content)
}

/// Parses manifest text into its top-level object.
pub fn parse_manifest(content: &str) -> Result<Map<String, Value>, CheckError> {
    let value: Value = serde_json::from_str(content).map_err(ManifestError::from)?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ManifestError::not_an_object(&other).into()),
    }
}
