//! Plugin relation resolution.
//!
//! The relation fields (`depends`, `recommends`, `suggests`, `breaks`,
//! `replaces`) map another plugin's codename to a version constraint.
//! Resolution validates both sides of every entry and collects the names of
//! all referenced plugins, valid or not.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::diagnostic::Diagnostics;
use crate::grammar::{IdentifierUse, VersionConstraint, check_identifier_str, check_relative_version};

/// A kind of relation to another plugin.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Depends,
    Recommends,
    Suggests,
    Breaks,
    Replaces,
}

impl RelationKind {
    /// All kinds in processing order.
    pub const ALL: [RelationKind; 5] = [
        RelationKind::Depends,
        RelationKind::Recommends,
        RelationKind::Suggests,
        RelationKind::Breaks,
        RelationKind::Replaces,
    ];

    /// The manifest key of this relation.
    pub fn key(self) -> &'static str {
        match self {
            RelationKind::Depends => "depends",
            RelationKind::Recommends => "recommends",
            RelationKind::Suggests => "suggests",
            RelationKind::Breaks => "breaks",
            RelationKind::Replaces => "replaces",
        }
    }

    /// Whether constraints may carry a comparison such as `>=`.
    ///
    /// `replaces` names the exact version being replaced.
    pub fn allows_relative(self) -> bool {
        !matches!(self, RelationKind::Replaces)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One valid relation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub plugin: String,
    pub constraint: VersionConstraint,
}

/// Deduplicated set of plugin names referenced by relations.
///
/// Names are kept sorted so that joined output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationSet {
    names: BTreeSet<String>,
}

impl RelationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Adds every name of `other` to this set.
    pub fn union_with(&mut self, other: &RelationSet) {
        self.names.extend(other.names.iter().cloned());
    }

    /// Joins the names with `separator`.
    pub fn join(&self, separator: &str) -> String {
        self.iter().collect::<Vec<_>>().join(separator)
    }
}

impl<S: Into<String>> FromIterator<S> for RelationSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Outcome of resolving one relation field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolved {
    /// Every plugin named by the field, valid or not.
    pub plugins: RelationSet,
    /// Entries whose name and constraint were both valid, in document order.
    pub relations: Vec<Relation>,
}

/// Resolves one relation field.
///
/// `label` is the manifest key used in diagnostics. A value that is not an
/// object of strings is a single error and yields no names.
pub fn resolve_relations(
    label: &str,
    value: &Value,
    allow_relative: bool,
    diags: &mut Diagnostics,
) -> Resolved {
    let Some(entries) = as_string_map(value) else {
        let _ = diags.fail(
            label,
            format!(
                "`{label}` must be an object mapping plugin codenames to version constraints"
            ),
        );
        return Resolved::default();
    };

    let mut resolved = Resolved::default();
    for (plugin, constraint) in entries {
        resolved.plugins.insert(plugin.as_str());

        let plugin_label = format!("`{label}` plugin '{plugin}'");
        let name_ok = check_identifier_str(
            label,
            &plugin_label,
            plugin,
            IdentifierUse::Referenced,
            false,
            diags,
        )
        .is_ok();

        // Constraint checks are independent of the name checks.
        let Some(constraint) = constraint.as_str() else {
            continue;
        };
        let constraint =
            check_relative_version(label, &plugin_label, constraint, allow_relative, diags);

        if let (true, Ok(constraint)) = (name_ok, constraint) {
            resolved.relations.push(Relation {
                plugin: plugin.clone(),
                constraint,
            });
        }
    }

    debug!(
        "resolved `{label}`: {} plugins, {} valid relations",
        resolved.plugins.len(),
        resolved.relations.len()
    );
    resolved
}

/// Resolves a relation field by kind.
pub fn resolve_kind(kind: RelationKind, value: &Value, diags: &mut Diagnostics) -> Resolved {
    resolve_relations(kind.key(), value, kind.allows_relative(), diags)
}

fn as_string_map(value: &Value) -> Option<&Map<String, Value>> {
    value
        .as_object()
        .filter(|entries| entries.values().all(Value::is_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use crate::diagnostic::Severity;
    use crate::grammar::Comparator;

    #[test]
    fn test_depends_with_relative_constraint() {
        let mut diags = Diagnostics::new();
        let resolved =
            resolve_relations("depends", &json!({ "foo": ">=1.2" }), true, &mut diags);

        assert!(diags.is_empty());
        assert_eq!(resolved.plugins, RelationSet::from_iter(["foo"]));
        assert_eq!(
            resolved.relations,
            vec![Relation {
                plugin: "foo".to_string(),
                constraint: VersionConstraint {
                    comparator: Some(Comparator::GreaterOrEqual),
                    version: Some("1.2".to_string()),
                },
            }]
        );
    }

    #[test]
    fn test_depends_with_long_name_has_no_diagnostics() {
        let mut diags = Diagnostics::new();
        let resolved = resolve_relations(
            "depends",
            &json!({ "terrain_tools": ">=1.2" }),
            true,
            &mut diags,
        );

        assert!(diags.is_empty());
        assert!(resolved.plugins.contains("terrain_tools"));
    }

    #[test]
    fn test_replaces_rejects_relative_constraint_but_keeps_name() {
        let mut diags = Diagnostics::new();
        let resolved = resolve_kind(
            RelationKind::Replaces,
            &json!({ "foo": ">=1.2" }),
            &mut diags,
        );

        let errors: Vec<_> = diags.iter().filter(|d| d.is_error()).collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("invalid version constraint '>=1.2'"));
        assert!(resolved.plugins.contains("foo"));
        assert!(resolved.relations.is_empty());
    }

    #[test]
    fn test_invalid_name_is_still_collected() {
        let mut diags = Diagnostics::new();
        let resolved = resolve_relations(
            "breaks",
            &json!({ "bad__plugin": "", "good_plugin": "2.0" }),
            true,
            &mut diags,
        );

        assert_eq!(
            resolved.plugins,
            RelationSet::from_iter(["bad__plugin", "good_plugin"])
        );
        assert_eq!(resolved.relations.len(), 1);
        assert_eq!(resolved.relations[0].plugin, "good_plugin");
        assert_eq!(
            diags.iter().map(|d| d.severity).collect::<Vec<_>>(),
            vec![Severity::Error]
        );
    }

    #[test]
    fn test_empty_constraint_means_any_version() {
        let mut diags = Diagnostics::new();
        let resolved = resolve_kind(
            RelationKind::Suggests,
            &json!({ "terrain_tools": "" }),
            &mut diags,
        );

        assert!(diags.is_empty());
        assert!(resolved.relations[0].constraint.is_any());
    }

    #[rstest]
    #[case::array(json!(["foo"]))]
    #[case::string(json!("foo"))]
    #[case::non_string_constraint(json!({ "terrain_tools": 1 }))]
    fn test_unsupported_shape(#[case] value: Value) {
        let mut diags = Diagnostics::new();
        let resolved = resolve_relations("depends", &value, true, &mut diags);

        assert!(resolved.plugins.is_empty());
        assert_eq!(diags.len(), 1);
        assert!(diags.has_errors());
    }

    #[test]
    fn test_relation_set_union_deduplicates() {
        let mut all = RelationSet::from_iter(["terrain_tools", "sky_box"]);
        all.union_with(&RelationSet::from_iter(["sky_box", "water_physics"]));

        assert_eq!(all.len(), 3);
        assert_eq!(all.join(","), "sky_box,terrain_tools,water_physics");
    }

    #[rstest]
    #[case(RelationKind::Depends, true)]
    #[case(RelationKind::Recommends, true)]
    #[case(RelationKind::Suggests, true)]
    #[case(RelationKind::Breaks, true)]
    #[case(RelationKind::Replaces, false)]
    fn test_allows_relative(#[case] kind: RelationKind, #[case] expected: bool) {
        assert_eq!(kind.allows_relative(), expected);
    }
}
