//! # vlcheck_core
//!
//! File-level checking for Voxelite plugin manifests.
//!
//! This crate provides:
//! - Configuration loading (`.vlcheck.jsonc`)
//! - Manifest loading with precondition failures
//! - The multi-file `Checker`
//! - SARIF and GitHub Actions formatters
//!
//! ## Example
//!
//! ```rust,ignore
//! use vlcheck_core::{Checker, CheckerConfig};
//!
//! let config = CheckerConfig::from_file(".vlcheck.jsonc")?;
//! let checker = Checker::from_config(&config);
//!
//! let (results, failures) = checker.check_files(&config.resolved_files());
//! for result in &results {
//!     println!("{}: {} errors", result.path.display(), result.report.error_count());
//! }
//! ```

mod checker;
mod config;
mod error;
pub mod formatters;
pub mod loader;
mod result;

pub use checker::{CheckFilesResult, Checker};
pub use config::CheckerConfig;
pub use error::CheckError;
pub use result::{CheckResult, CheckSummary};
