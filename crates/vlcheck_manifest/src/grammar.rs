//! Format grammars shared by the field validators.
//!
//! Every grammar comes in two flavours: a pure predicate (`is_*`) and a
//! `check_*` function that records diagnostics against a field label.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::diagnostic::{Check, Diagnostics};

/// The only supported `api_version`.
pub const SUPPORTED_API_VERSION: i64 = 1;

/// Minimum length of an identifier.
pub const IDENTIFIER_MIN_LENGTH: usize = 2;

/// Identifiers shorter than this are accepted with a warning.
pub const IDENTIFIER_WARN_LENGTH: usize = 8;

/// Codename prefixes reserved for official plugins (lowercase).
pub const RESERVED_PREFIXES: &[&str] = &["vl_", "voxelite_"];

/// Comparison tokens accepted in front of a relation version, longest first.
const COMPARATOR_TOKENS: &[(&str, Comparator)] = &[
    ("<=", Comparator::LessOrEqual),
    (">=", Comparator::GreaterOrEqual),
    ("<", Comparator::Less),
    (">", Comparator::Greater),
    ("=", Comparator::Equal),
];

fn pattern(cell: &'static OnceLock<Regex>, source: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).expect("Invalid embedded pattern"))
}

fn identifier_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // No leading digit or underscore, no trailing or doubled underscore.
    pattern(&RE, r"^[a-zA-Z]([_a-zA-Z0-9]?[a-zA-Z0-9])*$")
}

fn strict_identifier_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    pattern(&RE, r"^[a-z]([_a-z0-9]?[a-z0-9])*$")
}

fn semver_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    pattern(&RE, r"^[0-9]+\.[0-9]+(\.[0-9]+)?$")
}

fn permission_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    pattern(
        &RE,
        r"^[a-z]([_a-z0-9]?[a-z0-9])*(\.[a-z]([_a-z0-9]?[a-z0-9])*)*$",
    )
}

fn dotted_version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    pattern(&RE, r"^([0-9]+(\.[0-9]+){0,2})?$")
}

/// Returns true if `value` matches the required identifier format.
pub fn is_identifier(value: &str) -> bool {
    identifier_regex().is_match(value)
}

/// Returns true if `value` matches the lowercase identifier format.
pub fn is_strict_identifier(value: &str) -> bool {
    strict_identifier_regex().is_match(value)
}

/// Returns true for `major.minor` or `major.minor.patch`.
pub fn is_semver(value: &str) -> bool {
    semver_regex().is_match(value)
}

/// Returns true for dot-separated lowercase identifier segments.
pub fn is_permission_path(value: &str) -> bool {
    permission_regex().is_match(value)
}

/// Returns true if the codename starts with a reserved official prefix.
pub fn has_reserved_prefix(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    RESERVED_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
}

/// Where an identifier appears in the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierUse {
    /// Declared by this plugin (`codename`, `alias`); reserved prefixes apply.
    Declared,
    /// A reference to another plugin; only hard errors apply.
    Referenced,
}

/// Checks `api_version`: numeric `1` is valid, string `"1"` only warns.
pub fn check_api_version(value: &Value, diags: &mut Diagnostics) -> Check {
    const FIELD: &str = "api_version";

    match value {
        Value::Number(n) => {
            if n.as_f64() != Some(SUPPORTED_API_VERSION as f64) {
                return Err(diags.fail(FIELD, "`api_version` only supports value of 1"));
            }
        }
        Value::String(s) => {
            diags.warn(FIELD, "`api_version` should be a number");
            if s != "1" {
                return Err(diags.fail(FIELD, "`api_version` only supports value of 1"));
            }
        }
        _ => return Err(diags.fail(FIELD, "Invalid type of `api_version`, use number")),
    }
    Ok(())
}

/// Checks a codename, alias or referenced plugin name.
///
/// Returns the identifier only if no error was recorded.
pub fn check_identifier<'a>(
    field: &str,
    label: &str,
    value: &'a Value,
    usage: IdentifierUse,
    official: bool,
    diags: &mut Diagnostics,
) -> Check<&'a str> {
    let Some(identifier) = value.as_str() else {
        return Err(diags.fail(field, format!("{label} must be a string")));
    };

    check_identifier_str(field, label, identifier, usage, official, diags)?;
    Ok(identifier)
}

/// Identifier rules for a value already known to be a string.
pub fn check_identifier_str(
    field: &str,
    label: &str,
    identifier: &str,
    usage: IdentifierUse,
    official: bool,
    diags: &mut Diagnostics,
) -> Check {
    // Naming style of another plugin is not this manifest's concern.
    let declared = usage == IdentifierUse::Declared;

    let length = identifier.chars().count();
    if length == 0 {
        return Err(diags.fail(field, format!("{label} cannot be empty")));
    } else if length < IDENTIFIER_MIN_LENGTH {
        return Err(diags.fail(
            field,
            format!("{label} must be at least {IDENTIFIER_MIN_LENGTH} characters"),
        ));
    } else if declared && length < IDENTIFIER_WARN_LENGTH {
        diags.warn(
            field,
            format!("{label} should be at least {IDENTIFIER_WARN_LENGTH} characters"),
        );
    }

    if !is_identifier(identifier) {
        return Err(diags.fail(
            field,
            format!(
                "{label} does not match required format - only alphanumeric characters with optional underscore"
            ),
        ));
    } else if declared && !is_strict_identifier(identifier) {
        diags.warn(
            field,
            format!(
                "{label} does not match expected format - only lowercase letters, numbers and optional underscores"
            ),
        );
    }

    if declared && !official && has_reserved_prefix(identifier) {
        diags.warn(
            field,
            format!(
                "It looks like you are using {label} similar to official Voxelite ones, please choose a different prefix"
            ),
        );
    }

    Ok(())
}

/// Checks `version` against `major.minor[.patch]`.
pub fn check_version<'a>(value: &'a Value, diags: &mut Diagnostics) -> Check<&'a str> {
    const FIELD: &str = "version";

    let Some(version) = value.as_str() else {
        return Err(diags.fail(
            FIELD,
            "`version` must be a string in a specific format - see Semantic Versioning ( https://semver.org/ )",
        ));
    };

    if !is_semver(version) {
        return Err(diags.fail(
            FIELD,
            "`version` does not match Semantic Versioning ( https://semver.org/ ) format of `major.minor.patch` or `major.minor`",
        ));
    }
    Ok(version)
}

/// Checks the dotted format of a permission that already passed the text rule.
pub fn check_permission(field: &str, permission: &str, diags: &mut Diagnostics) -> Check {
    if !is_permission_path(permission) {
        return Err(diags.fail(
            field,
            format!("Wrong permission format for '{permission}' - is the permission correct?"),
        ));
    }
    Ok(())
}

/// Rejects control characters (code points below 32).
///
/// Stops at the first offending character.
pub fn check_non_printable(field: &str, label: &str, value: &str, diags: &mut Diagnostics) -> Check {
    let Some(c) = value.chars().find(|c| (*c as u32) < 32) else {
        return Ok(());
    };

    let message = match c {
        '\r' | '\n' => format!("{label} cannot contain a new line"),
        '\t' => format!("{label} cannot contain tab character"),
        other => format!(
            "{label} cannot contain non-printable character (first 32 ASCII characters) - found character {}",
            other as u32
        ),
    };
    Err(diags.fail(field, message))
}

/// Comparison operator of a relation version constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparator {
    #[serde(rename = "<")]
    Less,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = ">=")]
    GreaterOrEqual,
}

impl Comparator {
    pub fn as_str(self) -> &'static str {
        match self {
            Comparator::Less => "<",
            Comparator::Greater => ">",
            Comparator::Equal => "=",
            Comparator::LessOrEqual => "<=",
            Comparator::GreaterOrEqual => ">=",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed relation version constraint.
///
/// An empty constraint (`""`) means any version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionConstraint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparator: Option<Comparator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl VersionConstraint {
    /// Returns true if the constraint accepts any version.
    pub fn is_any(&self) -> bool {
        self.comparator.is_none() && self.version.is_none()
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(comparator) = self.comparator {
            write!(f, "{comparator}")?;
        }
        if let Some(version) = &self.version {
            f.write_str(version)?;
        }
        Ok(())
    }
}

/// Splits one leading comparison token off `value`.
pub fn split_comparator(value: &str) -> (Option<Comparator>, &str) {
    COMPARATOR_TOKENS
        .iter()
        .find_map(|(token, comparator)| {
            value
                .strip_prefix(token)
                .map(|rest| (Some(*comparator), rest))
        })
        .unwrap_or((None, value))
}

/// Parses a relation version constraint.
///
/// Comparison tokens are only stripped when `allow_relative` is set, so an
/// exact-only relation rejects `>=1.0`.
pub fn parse_version_constraint(value: &str, allow_relative: bool) -> Option<VersionConstraint> {
    let (comparator, rest) = if allow_relative {
        split_comparator(value)
    } else {
        (None, value)
    };

    if !dotted_version_regex().is_match(rest) {
        return None;
    }

    Some(VersionConstraint {
        comparator,
        version: (!rest.is_empty()).then(|| rest.to_string()),
    })
}

/// Checks a relation version constraint and returns its parsed form.
pub fn check_relative_version(
    field: &str,
    label: &str,
    value: &str,
    allow_relative: bool,
    diags: &mut Diagnostics,
) -> Check<VersionConstraint> {
    if let Some(constraint) = parse_version_constraint(value, allow_relative) {
        return Ok(constraint);
    }

    let expected = if allow_relative {
        "an optional comparison (<, >, =, <=, >=) followed by `major[.minor[.patch]]`"
    } else {
        "an exact version `major[.minor[.patch]]` without comparison"
    };
    Err(diags.fail(
        field,
        format!("{label} has invalid version constraint '{value}' - expected {expected}"),
    ))
}
