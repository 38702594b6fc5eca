//! Machine-readable report formats.

pub mod github;
pub mod sarif;

pub use github::{GITHUB_OUTPUT_ENV, annotation, generate_annotations, output_lines};
pub use sarif::{MANIFEST_RULE, generate_sarif};
