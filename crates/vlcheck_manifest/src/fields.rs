//! Validators for the individual manifest fields.

use serde_json::Value;

use crate::diagnostic::{Check, Diagnostics};
use crate::grammar::{IdentifierUse, check_identifier_str, check_non_printable, check_permission};
use crate::text::{TextRule, check_spacing, check_text, check_text_value};
use crate::validator::ValidationOptions;

/// Domain of the project's own website.
pub const PROJECT_DOMAIN: &str = "voxelite.net";

/// Author names that refer to the project itself.
pub const RESERVED_AUTHORS: &[&str] = &["vl", "voxelite"];

/// Validates `codename`.
///
/// Returns the codename whenever it is a string, even if it carries
/// diagnostics, so that it can be published verbatim.
pub fn check_codename<'a>(
    value: &'a Value,
    options: &ValidationOptions,
    diags: &mut Diagnostics,
) -> Option<&'a str> {
    let Some(codename) = value.as_str() else {
        let _ = diags.fail("codename", "`codename` must be a string");
        return None;
    };

    let _ = check_identifier_str(
        "codename",
        "`codename`",
        codename,
        IdentifierUse::Declared,
        options.official,
        diags,
    );
    Some(codename)
}

/// Validates `alias`, a string or an array of strings.
///
/// Returns every string alias in declaration order, duplicates included.
pub fn check_alias<'a>(
    value: &'a Value,
    options: &ValidationOptions,
    diags: &mut Diagnostics,
) -> Vec<&'a str> {
    let items: Vec<&Value> = match value {
        Value::String(_) => vec![value],
        Value::Array(items) => items.iter().collect(),
        _ => {
            let _ = diags.fail(
                "alias",
                "Unsupported data type for `alias` - use a string or an array of strings",
            );
            return Vec::new();
        }
    };

    items
        .into_iter()
        .filter_map(|item| {
            let Some(alias) = item.as_str() else {
                let _ = diags.fail("alias", "Each item in `alias` must be a string");
                return None;
            };
            let label = format!("`alias` '{alias}'");
            let _ = check_identifier_str(
                "alias",
                &label,
                alias,
                IdentifierUse::Declared,
                options.official,
                diags,
            );
            Some(alias)
        })
        .collect()
}

/// Validates `name`.
pub fn check_name(value: &Value, diags: &mut Diagnostics) -> Check {
    check_text("name", "`name`", value, TextRule::NAME, diags).map(|_| ())
}

/// Validates `description`.
pub fn check_description(value: &Value, diags: &mut Diagnostics) -> Check {
    check_text(
        "description",
        "`description`",
        value,
        TextRule::DESCRIPTION,
        diags,
    )
    .map(|_| ())
}

/// Validates `website`.
pub fn check_website(
    value: &Value,
    options: &ValidationOptions,
    diags: &mut Diagnostics,
) -> Check {
    const FIELD: &str = "website";
    const LABEL: &str = "`website`";

    let website = check_text_value(FIELD, LABEL, value, TextRule::WEBSITE, diags)?;
    check_spacing(FIELD, LABEL, website, diags);

    if website.starts_with("http://") {
        diags.warn(
            FIELD,
            "Consider using `https://` instead of `http://` for `website`",
        );
    } else if !website.starts_with("https://") {
        return Err(diags.fail(FIELD, "`website` must start with `https://`"));
    }

    check_non_printable(FIELD, LABEL, website, diags)?;

    if !options.official && website.contains(PROJECT_DOMAIN) {
        diags.warn(
            FIELD,
            "It looks like you are using official Voxelite `website`, please use your own website or don't include any `website` info",
        );
    }
    Ok(())
}

/// Validates `author`, a string or an array of strings.
pub fn check_author(value: &Value, options: &ValidationOptions, diags: &mut Diagnostics) -> Check {
    let authors = string_items(value).ok_or_else(|| {
        diags.fail(
            "author",
            "Unsupported data type for `author` - use a string or an array of strings",
        )
    })?;

    for author in authors {
        let _ = check_single_author(author, options, diags);
    }
    Ok(())
}

fn check_single_author(
    author: &Value,
    options: &ValidationOptions,
    diags: &mut Diagnostics,
) -> Check {
    let author = check_text("author", "`author`", author, TextRule::AUTHOR, diags)?;

    if !options.official && RESERVED_AUTHORS.contains(&author) {
        diags.warn(
            "author",
            "Please don't include `voxelite` in the list of authors",
        );
    }
    Ok(())
}

/// Validates `permissions`, an array of dotted permission paths.
pub fn check_permissions(value: &Value, diags: &mut Diagnostics) -> Check {
    let permissions = match value {
        Value::Array(items) if items.iter().all(Value::is_string) => items,
        _ => {
            return Err(diags.fail(
                "permissions",
                "Unsupported data type for `permissions` - use an array of strings",
            ));
        }
    };

    for permission in permissions {
        let _ = check_single_permission(permission, diags);
    }
    Ok(())
}

fn check_single_permission(permission: &Value, diags: &mut Diagnostics) -> Check {
    const FIELD: &str = "permissions";

    let text = check_text_value(FIELD, "Permission", permission, TextRule::PERMISSION, diags)?;
    check_spacing(FIELD, "`permissions` item", text, diags);
    check_non_printable(FIELD, "`permission`", text, diags)?;
    check_permission(FIELD, text, diags)
}

/// A string, or an array made only of strings.
fn string_items(value: &Value) -> Option<Vec<&Value>> {
    match value {
        Value::String(_) => Some(vec![value]),
        Value::Array(items) if items.iter().all(Value::is_string) => Some(items.iter().collect()),
        _ => None,
    }
}
