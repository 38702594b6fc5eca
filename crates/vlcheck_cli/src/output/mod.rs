//! Output formatting module

mod github;
mod json;
mod sarif;
mod text;

use std::path::PathBuf;

use miette::Result;
use vlcheck_core::{CheckError, CheckResult, CheckSummary};

use crate::cli::OutputFormat;

pub use github::publish_outputs;

/// Prints results in `format`; returns true if the run failed.
pub fn output_results(
    results: &[CheckResult],
    failures: &[(PathBuf, CheckError)],
    format: OutputFormat,
) -> Result<bool> {
    let summary = CheckSummary::from_results(results, failures.len());

    match format {
        OutputFormat::Sarif => sarif::output_sarif(results, failures)?,
        OutputFormat::Json => json::output_json(results, failures)?,
        OutputFormat::Github => github::output_github(results, failures),
        OutputFormat::Text => text::output_text(results, failures, &summary),
    }

    Ok(summary.failed())
}
