//! Validation report.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::diagnostic::{Diagnostic, Severity};
use crate::relations::{Relation, RelationKind};

/// Output key of the canonical codename.
pub const OUTPUT_CODENAME: &str = "codename";
/// Output key of the joined alias list.
pub const OUTPUT_ALIAS: &str = "alias";
/// Output key of the canonical version.
pub const OUTPUT_VERSION: &str = "version";
/// Output key of the joined `depends` plugin names.
pub const OUTPUT_DEPENDS: &str = "depends";
/// Output key of the joined names across all relation fields.
pub const OUTPUT_OTHER_PLUGINS: &str = "other_plugins";

/// Separator of joined output lists.
pub const LIST_SEPARATOR: &str = ",";

/// Result of validating one manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Diagnostics in the order they were produced.
    pub diagnostics: Vec<Diagnostic>,

    /// Canonical values for downstream steps, keyed by output name.
    pub outputs: BTreeMap<String, String>,

    /// Valid relation entries per relation kind.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub relations: BTreeMap<RelationKind, Vec<Relation>>,
}

impl Report {
    /// Returns true if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Returns a published output value.
    pub fn output(&self, key: &str) -> Option<&str> {
        self.outputs.get(key).map(String::as_str)
    }

    /// Diagnostics of one field.
    pub fn diagnostics_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.field == field)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let report = Report::default();

        assert!(!report.has_errors());
        assert_eq!(report.error_count(), 0);
        assert_eq!(report.output(OUTPUT_CODENAME), None);
    }

    #[test]
    fn test_counts() {
        let report = Report {
            diagnostics: vec![
                Diagnostic::warning("name", "Missing `name`, `codename` will be used instead"),
                Diagnostic::error("version", "Missing `version`"),
                Diagnostic::warning("codename", "`codename` should be at least 8 characters"),
            ],
            ..Report::default()
        };

        assert!(report.has_errors());
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 2);
        assert_eq!(report.diagnostics_for("version").count(), 1);
    }

    #[test]
    fn test_serializes_without_empty_relations() {
        let mut report = Report::default();
        report
            .outputs
            .insert(OUTPUT_CODENAME.to_string(), "example_plugin".to_string());

        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "diagnostics": [],
                "outputs": { "codename": "example_plugin" }
            })
        );
    }
}
