//! Diagnostic types for manifest validation.

use serde::{Deserialize, Serialize};

/// Severity level for diagnostics.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - blocks the manifest.
    #[default]
    Error,
    /// Warning - advisory only.
    Warning,
}

impl Severity {
    /// Returns the lowercase name used in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// A diagnostic message tied to one manifest field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level.
    #[serde(default)]
    pub severity: Severity,

    /// The manifest field the diagnostic belongs to.
    pub field: String,

    /// The diagnostic message.
    pub message: String,
}

impl Diagnostic {
    /// Creates a new error diagnostic.
    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a new warning diagnostic.
    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true for [`Severity::Error`].
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Marker returned once an error has been recorded for the current field.
///
/// Validators return [`Check`] so that `?` ends the field's check chain on
/// the first error while earlier warnings stay recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Halted;

/// Result of a single check chain.
pub type Check<T = ()> = Result<T, Halted>;

/// Ordered collection of diagnostics produced during one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning. Never stops the check chain.
    pub fn warn(&mut self, field: &str, message: impl Into<String>) {
        self.items.push(Diagnostic::warning(field, message));
    }

    /// Records an error and returns the marker that stops the check chain.
    ///
    /// Typical use is `return Err(diags.fail(field, "..."));`.
    pub fn fail(&mut self, field: &str, message: impl Into<String>) -> Halted {
        self.items.push(Diagnostic::error(field, message));
        Halted
    }

    /// Number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true if any error was recorded.
    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    /// Diagnostics in recording order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Consumes the collection, keeping recording order.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_error() {
        let diag = Diagnostic::error("codename", "`codename` cannot be empty");

        assert_eq!(diag.field, "codename");
        assert_eq!(diag.message, "`codename` cannot be empty");
        assert_eq!(diag.severity, Severity::Error);
        assert!(diag.is_error());
    }

    #[test]
    fn test_diagnostic_warning() {
        let diag = Diagnostic::warning("name", "Missing `name`");

        assert_eq!(diag.severity, Severity::Warning);
        assert!(!diag.is_error());
    }

    #[test]
    fn test_severity_default() {
        assert_eq!(Severity::default(), Severity::Error);
    }

    #[test]
    fn test_severity_serialization() {
        let json = serde_json::to_string(&Severity::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
        assert_eq!(Severity::Error.as_str(), "error");
    }

    #[test]
    fn test_fail_returns_halted_and_records_error() {
        let mut diags = Diagnostics::new();
        diags.warn("name", "short");

        let check: Check = Err(diags.fail("name", "broken"));

        assert_eq!(check, Err(Halted));
        assert_eq!(diags.len(), 2);
        assert!(diags.has_errors());
    }

    #[test]
    fn test_warnings_only_has_no_errors() {
        let mut diags = Diagnostics::new();
        diags.warn("name", "short");

        assert!(!diags.has_errors());
        assert_eq!(diags.into_vec().len(), 1);
    }
}
