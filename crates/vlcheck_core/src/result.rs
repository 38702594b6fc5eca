//! Check result types.

use std::path::PathBuf;

use vlcheck_manifest::Report;

/// Result of checking a single manifest file.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Path to the checked manifest.
    pub path: PathBuf,

    /// Diagnostics and published outputs.
    pub report: Report,
}

impl CheckResult {
    /// Creates a new check result.
    pub fn new(path: PathBuf, report: Report) -> Self {
        Self { path, report }
    }

    /// Returns true if there are any error diagnostics.
    pub fn has_errors(&self) -> bool {
        self.report.has_errors()
    }
}

/// Summary of checking multiple manifests.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CheckSummary {
    /// Manifests that were validated.
    pub files_checked: usize,

    /// Manifests that could not be loaded.
    pub files_failed: usize,

    /// Total error diagnostics.
    pub errors: usize,

    /// Total warning diagnostics.
    pub warnings: usize,
}

impl CheckSummary {
    /// Creates a summary from results and the number of load failures.
    pub fn from_results(results: &[CheckResult], files_failed: usize) -> Self {
        let mut summary = Self {
            files_failed,
            ..Self::default()
        };

        for result in results {
            summary.files_checked += 1;
            summary.errors += result.report.error_count();
            summary.warnings += result.report.warning_count();
        }

        summary
    }

    /// Returns true if the run must be reported as failed.
    pub fn failed(&self) -> bool {
        self.errors > 0 || self.files_failed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vlcheck_manifest::Diagnostic;

    #[test]
    fn test_result_without_errors() {
        let result = CheckResult::new(PathBuf::from("plugin.json"), Report::default());
        assert!(!result.has_errors());
    }

    #[test]
    fn test_summary_counts() {
        let report = Report {
            diagnostics: vec![
                Diagnostic::error("version", "Missing `version`"),
                Diagnostic::warning("name", "Missing `name`, `codename` will be used instead"),
            ],
            ..Report::default()
        };
        let results = vec![
            CheckResult::new(PathBuf::from("a/plugin.json"), report),
            CheckResult::new(PathBuf::from("b/plugin.json"), Report::default()),
        ];

        let summary = CheckSummary::from_results(&results, 0);

        assert_eq!(
            summary,
            CheckSummary {
                files_checked: 2,
                files_failed: 0,
                errors: 1,
                warnings: 1,
            }
        );
        assert!(summary.failed());
    }

    #[test]
    fn test_summary_fails_on_load_failures_alone() {
        let summary = CheckSummary::from_results(&[], 1);
        assert!(summary.failed());
    }
}
