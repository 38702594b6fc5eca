//! Check command implementation

use std::path::PathBuf;

use clap::ValueEnum;
use miette::{IntoDiagnostic, Result};
use tracing::{debug, info};
use vlcheck_core::{Checker, CheckerConfig};

use crate::cli::{Cli, OutputFormat};
use crate::output::{output_results, publish_outputs};

/// Manifest checked when neither arguments nor config name any.
const DEFAULT_MANIFEST: &str = "plugin.json";

pub fn run_check(
    cli: &Cli,
    files: &[PathBuf],
    format: Option<OutputFormat>,
    official: bool,
) -> Result<bool> {
    let mut config = load_config(cli)?;
    config.official |= official;

    let format = match format {
        Some(format) => format,
        None => config_format(&config)?,
    };

    let paths = if !files.is_empty() {
        files.to_vec()
    } else if !config.files.is_empty() {
        config.resolved_files()
    } else {
        vec![PathBuf::from(DEFAULT_MANIFEST)]
    };
    debug!(
        "Checking {} manifests (official: {})",
        paths.len(),
        config.official
    );

    let checker = Checker::from_config(&config);
    let (results, failures) = checker.check_files(&paths);

    let failed = output_results(&results, &failures, format)?;

    if format == OutputFormat::Github
        && paths.len() == 1
        && let Some(result) = results.first()
    {
        publish_outputs(&result.report.outputs)?;
    }

    Ok(failed)
}

fn load_config(cli: &Cli) -> Result<CheckerConfig> {
    if let Some(path) = &cli.config {
        return CheckerConfig::from_file(path).into_diagnostic();
    }

    let cwd = std::env::current_dir().into_diagnostic()?;
    match CheckerConfig::discover(&cwd) {
        Some(path) => {
            info!("Using config {}", path.display());
            CheckerConfig::from_file(&path).into_diagnostic()
        }
        None => Ok(CheckerConfig::default()),
    }
}

fn config_format(config: &CheckerConfig) -> Result<OutputFormat> {
    match config.format.as_deref() {
        Some(name) => OutputFormat::from_str(name, true)
            .map_err(|e| miette::miette!("Invalid output format '{}': {}", name, e)),
        None => Ok(OutputFormat::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_format_defaults_to_text() {
        let config = CheckerConfig::default();
        assert_eq!(config_format(&config).unwrap(), OutputFormat::Text);
    }

    #[test]
    fn test_config_format_from_file_value() {
        let config = CheckerConfig {
            format: Some("sarif".to_string()),
            ..CheckerConfig::default()
        };
        assert_eq!(config_format(&config).unwrap(), OutputFormat::Sarif);
    }
}
