//! GitHub Actions workflow commands.
//!
//! Diagnostics become `::error` and `::warning` annotations, and published
//! outputs are written in the format read back from `$GITHUB_OUTPUT`.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use vlcheck_manifest::{Diagnostic, Severity};

use crate::CheckResult;

/// Environment variable naming the step output file.
pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

const OUTPUT_DELIMITER: &str = "VLCHECK_EOF";

/// Renders every diagnostic of the results as workflow commands.
pub fn generate_annotations(results: &[CheckResult]) -> String {
    let mut out = String::new();
    for result in results {
        for diagnostic in &result.report.diagnostics {
            out.push_str(&annotation(diagnostic, Some(&result.path)));
            out.push('\n');
        }
    }
    out
}

/// Renders a single diagnostic as a workflow command.
pub fn annotation(diagnostic: &Diagnostic, path: Option<&Path>) -> String {
    let command = match diagnostic.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };

    let mut line = format!("::{command} ");
    if let Some(path) = path {
        let _ = write!(line, "file={},", escape_property(&path.to_string_lossy()));
    }
    let _ = write!(
        line,
        "title={}::{}",
        escape_property(&diagnostic.field),
        escape_data(&diagnostic.message)
    );
    line
}

/// Renders published outputs for the `$GITHUB_OUTPUT` file.
///
/// Single-line values use `key=value`. A value with a line break (a codename
/// or plugin key carrying `\n`) uses the `key<<DELIMITER` form so that it
/// cannot start a line of its own.
pub fn output_lines(outputs: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for (key, value) in outputs {
        if value.contains(['\n', '\r']) {
            let delimiter = delimiter_for(value);
            let _ = write!(out, "{key}<<{delimiter}\n{value}\n{delimiter}\n");
        } else {
            let _ = writeln!(out, "{key}={value}");
        }
    }
    out
}

/// A heredoc delimiter that does not occur in `value`.
fn delimiter_for(value: &str) -> String {
    let mut delimiter = OUTPUT_DELIMITER.to_string();
    let mut n = 0;
    while value.contains(&delimiter) {
        n += 1;
        delimiter = format!("{OUTPUT_DELIMITER}_{n}");
    }
    delimiter
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}
