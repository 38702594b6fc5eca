//! The shared rule for free-text fields.
//!
//! `name`, `description`, `website`, `author` and `permissions` entries all
//! go through the same length, whitespace and control-character checks; only
//! the limits differ.

use serde_json::Value;

use crate::diagnostic::{Check, Diagnostics};
use crate::grammar::check_non_printable;

/// Length limits of one text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRule {
    /// Shorter values are errors.
    pub min_len: usize,
    /// Shorter values are warnings.
    pub warn_len: Option<usize>,
    /// Appended to the too-short error for optional fields.
    pub optional: bool,
    /// Quote the offending value in length diagnostics.
    pub quote_value: bool,
}

impl TextRule {
    pub const NAME: TextRule = TextRule {
        min_len: 2,
        warn_len: Some(8),
        optional: false,
        quote_value: true,
    };

    pub const DESCRIPTION: TextRule = TextRule {
        min_len: 16,
        warn_len: None,
        optional: true,
        quote_value: false,
    };

    pub const WEBSITE: TextRule = TextRule {
        min_len: 10,
        warn_len: None,
        optional: true,
        quote_value: false,
    };

    pub const AUTHOR: TextRule = TextRule::NAME;

    pub const PERMISSION: TextRule = TextRule {
        min_len: 2,
        warn_len: None,
        optional: false,
        quote_value: true,
    };
}

/// Type and length checks.
///
/// Returns the string so later checks in the same chain can use it.
pub fn check_text_value<'a>(
    field: &str,
    label: &str,
    value: &'a Value,
    rule: TextRule,
    diags: &mut Diagnostics,
) -> Check<&'a str> {
    let Some(text) = value.as_str() else {
        return Err(diags.fail(field, format!("{label} must be a string")));
    };

    let length = text.chars().count();
    let which = if rule.quote_value {
        format!(" which '{text}' is not")
    } else {
        String::new()
    };

    if length == 0 {
        return Err(diags.fail(field, format!("{label} cannot be empty")));
    } else if length < rule.min_len {
        let suffix = if rule.optional {
            " (or not present)"
        } else {
            which.as_str()
        };
        return Err(diags.fail(
            field,
            format!("{label} must be at least {} characters{suffix}", rule.min_len),
        ));
    } else if let Some(warn_len) = rule.warn_len
        && length < warn_len
    {
        diags.warn(
            field,
            format!("{label} should be at least {warn_len} characters{which}"),
        );
    }

    Ok(text)
}

/// Whitespace warnings: no space at either edge, no doubled spaces.
pub fn check_spacing(field: &str, label: &str, text: &str, diags: &mut Diagnostics) {
    if text.starts_with(' ') || text.ends_with(' ') {
        diags.warn(
            field,
            format!("{label} should not start or end with a space character"),
        );
    }
    if text.contains("  ") {
        diags.warn(
            field,
            format!("{label} should not contain multiple consecutive space characters"),
        );
    }
}

/// Full text rule: type, length, spacing and control characters.
pub fn check_text<'a>(
    field: &str,
    label: &str,
    value: &'a Value,
    rule: TextRule,
    diags: &mut Diagnostics,
) -> Check<&'a str> {
    let text = check_text_value(field, label, value, rule, diags)?;
    check_spacing(field, label, text, diags);
    check_non_printable(field, label, text, diags)?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use crate::diagnostic::Severity;

    fn run(value: Value, rule: TextRule) -> (Check<String>, Vec<(Severity, String)>) {
        let mut diags = Diagnostics::new();
        let result = check_text("name", "`name`", &value, rule, &mut diags).map(str::to_string);
        let collected = diags
            .iter()
            .map(|d| (d.severity, d.message.clone()))
            .collect();
        (result, collected)
    }

    #[test]
    fn test_valid_name_has_no_diagnostics() {
        let (result, diags) = run(json!("Example Plugin"), TextRule::NAME);

        assert_eq!(result, Ok("Example Plugin".to_string()));
        assert!(diags.is_empty());
    }

    #[test]
    fn test_short_name_warns_with_value() {
        let (result, diags) = run(json!("Tiny"), TextRule::NAME);

        assert!(result.is_ok());
        assert_eq!(
            diags,
            vec![(
                Severity::Warning,
                "`name` should be at least 8 characters which 'Tiny' is not".to_string()
            )]
        );
    }

    #[test]
    fn test_short_description_is_error() {
        let (result, diags) = run(json!("Too short"), TextRule::DESCRIPTION);

        assert!(result.is_err());
        assert_eq!(
            diags,
            vec![(
                Severity::Error,
                "`name` must be at least 16 characters (or not present)".to_string()
            )]
        );
    }

    #[rstest]
    #[case::number(json!(3))]
    #[case::array(json!(["Example Plugin"]))]
    #[case::null(json!(null))]
    fn test_non_string_is_error(#[case] value: Value) {
        let (result, diags) = run(value, TextRule::NAME);

        assert!(result.is_err());
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].1, "`name` must be a string");
    }

    #[test]
    fn test_spacing_warnings_accumulate() {
        let (result, diags) = run(json!(" Example  Plugin "), TextRule::NAME);

        assert!(result.is_ok());
        let severities: Vec<_> = diags.iter().map(|(s, _)| *s).collect();
        assert_eq!(severities, vec![Severity::Warning, Severity::Warning]);
    }

    #[test]
    fn test_control_character_after_warnings() {
        let (result, diags) = run(json!("Tiny\n"), TextRule::NAME);

        assert!(result.is_err());
        let severities: Vec<_> = diags.iter().map(|(s, _)| *s).collect();
        assert_eq!(severities, vec![Severity::Warning, Severity::Error]);
    }

    #[test]
    fn test_empty_is_error_before_length() {
        let (_, diags) = run(json!(""), TextRule::PERMISSION);

        assert_eq!(diags, vec![(Severity::Error, "`name` cannot be empty".to_string())]);
    }
}
