//! Manifest checker.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use vlcheck_manifest::{ManifestValidator, ValidationOptions};

use crate::loader::load_manifest;
use crate::{CheckError, CheckResult, CheckerConfig};

/// Successful results and per-file failures of a multi-file check.
pub type CheckFilesResult = (Vec<CheckResult>, Vec<(PathBuf, CheckError)>);

/// Runs the manifest rules over files on disk.
#[derive(Debug, Clone, Default)]
pub struct Checker {
    validator: ManifestValidator,
}

impl Checker {
    /// Creates a checker with the given engine options.
    pub fn new(options: ValidationOptions) -> Self {
        Self {
            validator: ManifestValidator::new(options),
        }
    }

    /// Creates a checker from a loaded configuration.
    pub fn from_config(config: &CheckerConfig) -> Self {
        Self::new(config.validation_options())
    }

    pub fn options(&self) -> &ValidationOptions {
        self.validator.options()
    }

    /// Checks one manifest file.
    pub fn check_file(&self, path: impl AsRef<Path>) -> Result<CheckResult, CheckError> {
        let path = path.as_ref();
        debug!("Checking {}", path.display());

        let manifest = load_manifest(path)?;
        let report = self.validator.validate(&manifest);

        debug!(
            "{}: {} errors, {} warnings",
            path.display(),
            report.error_count(),
            report.warning_count()
        );
        Ok(CheckResult::new(path.to_path_buf(), report))
    }

    /// Checks every file, collecting failures instead of stopping at them.
    pub fn check_files(&self, paths: &[PathBuf]) -> CheckFilesResult {
        info!("Checking {} manifests", paths.len());

        let mut successes = Vec::new();
        let mut failures = Vec::new();
        for path in paths {
            match self.check_file(path) {
                Ok(result) => successes.push(result),
                Err(error) => {
                    warn!("Failed to check {}: {}", path.display(), error);
                    failures.push((path.clone(), error));
                }
            }
        }

        (successes, failures)
    }
}
