//! SARIF output formatter

use std::path::PathBuf;

use miette::{IntoDiagnostic, Result};
use vlcheck_core::formatters::generate_sarif;
use vlcheck_core::{CheckError, CheckResult};

pub fn output_sarif(results: &[CheckResult], failures: &[(PathBuf, CheckError)]) -> Result<()> {
    let sarif_output = generate_sarif(results, failures).into_diagnostic()?;
    println!("{}", sarif_output);
    Ok(())
}
