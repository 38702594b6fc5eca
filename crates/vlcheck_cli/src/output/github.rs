//! GitHub Actions output formatter

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use miette::{IntoDiagnostic, Result};
use tracing::debug;
use vlcheck_core::formatters::{
    GITHUB_OUTPUT_ENV, MANIFEST_RULE, annotation, generate_annotations, output_lines,
};
use vlcheck_core::{CheckError, CheckResult};
use vlcheck_manifest::Diagnostic;

pub fn output_github(results: &[CheckResult], failures: &[(PathBuf, CheckError)]) {
    print!("{}", generate_annotations(results));

    for (path, error) in failures {
        let diagnostic = Diagnostic::error(MANIFEST_RULE, error.to_string());
        println!("{}", annotation(&diagnostic, Some(path)));
    }
}

/// Appends outputs to the file named by `$GITHUB_OUTPUT`, if set.
pub fn publish_outputs(outputs: &BTreeMap<String, String>) -> Result<()> {
    let Some(path) = std::env::var_os(GITHUB_OUTPUT_ENV) else {
        debug!("{} is not set, skipping output publication", GITHUB_OUTPUT_ENV);
        return Ok(());
    };

    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(&path)
        .into_diagnostic()?;
    file.write_all(output_lines(outputs).as_bytes())
        .into_diagnostic()?;

    debug!("Published {} outputs", outputs.len());
    Ok(())
}
