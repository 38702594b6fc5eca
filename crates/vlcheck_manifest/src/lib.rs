//! # vlcheck_manifest
//!
//! Rule engine for Voxelite plugin manifests (`plugin.json`).
//!
//! The engine takes an already parsed manifest and produces a [`Report`]:
//! ordered error/warning diagnostics plus the canonical values (codename,
//! version, aliases, related plugin names) that downstream build steps
//! consume. It performs no I/O.
//!
//! ## Example
//!
//! ```rust
//! use vlcheck_manifest::{ManifestValidator, ValidationOptions};
//!
//! let validator = ManifestValidator::new(ValidationOptions::default());
//! let report = validator
//!     .validate_str(r#"{"api_version": 1, "codename": "example_plugin", "version": "1.0.0"}"#)
//!     .unwrap();
//!
//! assert!(!report.has_errors());
//! assert_eq!(report.output("codename"), Some("example_plugin"));
//! ```

pub mod diagnostic;
mod error;
pub mod fields;
pub mod grammar;
pub mod relations;
mod report;
pub mod text;
mod validator;

pub use diagnostic::{Check, Diagnostic, Diagnostics, Halted, Severity};
pub use error::ManifestError;
pub use grammar::{Comparator, VersionConstraint};
pub use relations::{Relation, RelationKind, RelationSet, resolve_relations};
pub use report::{
    LIST_SEPARATOR, OUTPUT_ALIAS, OUTPUT_CODENAME, OUTPUT_DEPENDS, OUTPUT_OTHER_PLUGINS,
    OUTPUT_VERSION, Report,
};
pub use validator::{ManifestValidator, ValidationOptions};
