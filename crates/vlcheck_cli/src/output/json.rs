//! JSON output formatter

use std::path::PathBuf;

use miette::{IntoDiagnostic, Result};
use vlcheck_core::{CheckError, CheckResult};

pub fn output_json(results: &[CheckResult], failures: &[(PathBuf, CheckError)]) -> Result<()> {
    let checked = results.iter().map(|r| {
        serde_json::json!({
            "path": r.path.display().to_string(),
            "diagnostics": r.report.diagnostics,
            "outputs": r.report.outputs,
        })
    });
    let failed = failures.iter().map(|(path, error)| {
        serde_json::json!({
            "path": path.display().to_string(),
            "error": error.to_string(),
        })
    });

    let output: Vec<_> = checked.chain(failed).collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&output).into_diagnostic()?
    );
    Ok(())
}
