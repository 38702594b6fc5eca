//! Text output formatter

use std::path::PathBuf;

use vlcheck_core::{CheckError, CheckResult, CheckSummary};

pub fn output_text(
    results: &[CheckResult],
    failures: &[(PathBuf, CheckError)],
    summary: &CheckSummary,
) {
    for result in results {
        let report = &result.report;
        if report.diagnostics.is_empty() && report.outputs.is_empty() {
            continue;
        }

        println!("\n{}:", result.path.display());
        for diag in &report.diagnostics {
            println!("  {} [{}]: {}", diag.severity.as_str(), diag.field, diag.message);
        }
        for (key, value) in &report.outputs {
            println!("  {} = {}", key, value);
        }
    }

    for (path, error) in failures {
        println!("\n{}:", path.display());
        println!("  failed: {}", error);
    }

    println!();
    println!(
        "Checked {} manifests, found {} errors and {} warnings",
        summary.files_checked, summary.errors, summary.warnings
    );
    if summary.files_failed > 0 {
        println!("{} manifests could not be checked", summary.files_failed);
    }
}
