//! Manifest error types.

use thiserror::Error;

/// Error type for manifests that cannot be validated at all.
///
/// Field problems are never errors of this kind; they are reported as
/// diagnostics.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to parse manifest JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Manifest must be a JSON object, found {0}")]
    NotAnObject(&'static str),
}

impl ManifestError {
    /// Creates a [`ManifestError::NotAnObject`] naming the type of `value`.
    pub fn not_an_object(value: &serde_json::Value) -> Self {
        Self::NotAnObject(json_type_name(value))
    }
}

/// Names the JSON type of `value` for error messages.
fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_an_object_display() {
        let err = ManifestError::not_an_object(&serde_json::json!([1]));
        assert_eq!(err.to_string(), "Manifest must be a JSON object, found an array");
    }
}
