//! SARIF 2.1.0 output for manifest reports.
//!
//! Each manifest field is reported as a rule, so code scanning groups
//! findings by the field they concern.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use vlcheck_manifest::{Diagnostic, Severity};

use crate::{CheckError, CheckResult};

const SARIF_VERSION: &str = "2.1.0";
const SARIF_SCHEMA: &str =
    "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const TOOL_NAME: &str = "vlcheck";

/// Rule id of manifests that could not be loaded at all.
pub const MANIFEST_RULE: &str = "manifest";

/// Generates a SARIF log from check results and per-file failures.
pub fn generate_sarif(
    results: &[CheckResult],
    failures: &[(PathBuf, CheckError)],
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&SarifLog::from_results(results, failures))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLog {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<Run>,
}

impl SarifLog {
    fn from_results(results: &[CheckResult], failures: &[(PathBuf, CheckError)]) -> Self {
        Self {
            schema: SARIF_SCHEMA,
            version: SARIF_VERSION,
            runs: vec![Run::from_results(results, failures)],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Run {
    tool: Tool,
    results: Vec<SarifResult>,
}

impl Run {
    fn from_results(check_results: &[CheckResult], failures: &[(PathBuf, CheckError)]) -> Self {
        let mut results = Vec::new();
        let mut rules: BTreeMap<&str, ReportingDescriptor> = BTreeMap::new();

        for check_result in check_results {
            for diagnostic in &check_result.report.diagnostics {
                results.push(SarifResult::from_diagnostic(diagnostic, &check_result.path));
                rules
                    .entry(diagnostic.field.as_str())
                    .or_insert_with(|| ReportingDescriptor::for_field(&diagnostic.field));
            }
        }

        for (path, error) in failures {
            let diagnostic = Diagnostic::error(MANIFEST_RULE, error.to_string());
            results.push(SarifResult::from_diagnostic(&diagnostic, path));
            rules.entry(MANIFEST_RULE).or_insert_with(|| ReportingDescriptor {
                id: MANIFEST_RULE.to_string(),
                short_description: Message::text("The manifest file can be read as a JSON object"),
            });
        }

        Self {
            tool: Tool {
                driver: ToolComponent {
                    name: TOOL_NAME,
                    version: option_env!("CARGO_PKG_VERSION"),
                    rules: rules.into_values().collect(),
                },
            },
            results,
        }
    }
}

#[derive(Debug, Serialize)]
struct Tool {
    driver: ToolComponent,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolComponent {
    name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    rules: Vec<ReportingDescriptor>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportingDescriptor {
    id: String,
    short_description: Message,
}

impl ReportingDescriptor {
    fn for_field(field: &str) -> Self {
        Self {
            id: field.to_string(),
            short_description: Message::text(format!("Validates the `{field}` manifest field")),
        }
    }
}

#[derive(Debug, Serialize)]
struct Message {
    text: String,
}

impl Message {
    fn text(s: impl Into<String>) -> Self {
        Self { text: s.into() }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult {
    rule_id: String,
    level: &'static str,
    message: Message,
    locations: Vec<Location>,
}

impl SarifResult {
    fn from_diagnostic(diagnostic: &Diagnostic, path: &Path) -> Self {
        let level = match diagnostic.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };

        Self {
            rule_id: diagnostic.field.clone(),
            level,
            message: Message::text(&diagnostic.message),
            locations: vec![Location {
                physical_location: PhysicalLocation {
                    artifact_location: ArtifactLocation {
                        uri: path.to_string_lossy().replace('\\', "/"),
                    },
                },
            }],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Location {
    physical_location: PhysicalLocation,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PhysicalLocation {
    artifact_location: ArtifactLocation,
}

#[derive(Debug, Serialize)]
struct ArtifactLocation {
    uri: String,
}
