//! Validation orchestrator.
//!
//! Walks the known manifest fields in a fixed order, dispatches each present
//! field to its validator and assembles the [`Report`]. A failing field never
//! stops the others from being checked.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::diagnostic::Diagnostics;
use crate::error::ManifestError;
use crate::fields;
use crate::grammar::{check_api_version, check_version};
use crate::relations::{RelationKind, RelationSet, resolve_kind};
use crate::report::{
    LIST_SEPARATOR, OUTPUT_ALIAS, OUTPUT_CODENAME, OUTPUT_DEPENDS, OUTPUT_OTHER_PLUGINS,
    OUTPUT_VERSION, Report,
};

/// Caller-supplied settings of a validation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// The manifest belongs to an official plugin; reserved namespace,
    /// domain and author warnings are suppressed.
    pub official: bool,
}

impl ValidationOptions {
    pub fn official() -> Self {
        Self { official: true }
    }
}

/// Whether an absent field is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    Required,
    Expected,
    Optional,
}

/// Validates manifests with fixed options.
#[derive(Debug, Clone, Default)]
pub struct ManifestValidator {
    options: ValidationOptions,
}

impl ManifestValidator {
    pub fn new(options: ValidationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Parses and validates a manifest document.
    pub fn validate_str(&self, json: &str) -> Result<Report, ManifestError> {
        let value: Value = serde_json::from_str(json)?;
        self.validate_value(&value)
    }

    /// Validates a parsed document; the root must be an object.
    pub fn validate_value(&self, value: &Value) -> Result<Report, ManifestError> {
        let manifest = value
            .as_object()
            .ok_or_else(|| ManifestError::not_an_object(value))?;
        Ok(self.validate(manifest))
    }

    /// Validates a manifest object.
    pub fn validate(&self, manifest: &Map<String, Value>) -> Report {
        let mut run = Run {
            manifest,
            options: &self.options,
            diags: Diagnostics::new(),
            outputs: BTreeMap::new(),
            report: Report::default(),
        };

        run.api_version();
        run.codename();
        run.alias();
        run.version();
        run.name();
        run.description();
        run.website();
        run.author();
        run.permissions();
        run.relations();

        run.finish()
    }
}

/// State of one validation pass.
struct Run<'a> {
    manifest: &'a Map<String, Value>,
    options: &'a ValidationOptions,
    diags: Diagnostics,
    outputs: BTreeMap<String, String>,
    report: Report,
}

impl<'a> Run<'a> {
    /// Looks up `key`, reporting it if absent according to `presence`.
    fn field(&mut self, key: &str, presence: Presence) -> Option<&'a Value> {
        let value = self.manifest.get(key);
        if value.is_none() {
            match presence {
                Presence::Required => {
                    let _ = self.diags.fail(key, format!("Missing `{key}`"));
                }
                Presence::Expected => self.diags.warn(
                    key,
                    format!("Missing `{key}`, `codename` will be used instead"),
                ),
                Presence::Optional => {}
            }
        } else {
            debug!("checking `{key}`");
        }
        value
    }

    fn publish(&mut self, key: &str, value: impl Into<String>) {
        self.outputs.insert(key.to_string(), value.into());
    }

    fn api_version(&mut self) {
        if let Some(value) = self.field("api_version", Presence::Required) {
            let _ = check_api_version(value, &mut self.diags);
        }
    }

    fn codename(&mut self) {
        let Some(value) = self.field("codename", Presence::Required) else {
            return;
        };
        if let Some(codename) = fields::check_codename(value, self.options, &mut self.diags) {
            self.publish(OUTPUT_CODENAME, codename);
        }
    }

    fn alias(&mut self) {
        let Some(value) = self.field("alias", Presence::Optional) else {
            return;
        };
        let aliases = fields::check_alias(value, self.options, &mut self.diags);
        if !aliases.is_empty() {
            self.publish(OUTPUT_ALIAS, aliases.join(LIST_SEPARATOR));
        }
    }

    fn version(&mut self) {
        let Some(value) = self.field("version", Presence::Required) else {
            return;
        };
        if let Ok(version) = check_version(value, &mut self.diags) {
            self.publish(OUTPUT_VERSION, version);
        }
    }

    fn name(&mut self) {
        if let Some(value) = self.field("name", Presence::Expected) {
            let _ = fields::check_name(value, &mut self.diags);
        }
    }

    fn description(&mut self) {
        if let Some(value) = self.field("description", Presence::Optional) {
            let _ = fields::check_description(value, &mut self.diags);
        }
    }

    fn website(&mut self) {
        if let Some(value) = self.field("website", Presence::Optional) {
            let _ = fields::check_website(value, self.options, &mut self.diags);
        }
    }

    fn author(&mut self) {
        if let Some(value) = self.field("author", Presence::Optional) {
            let _ = fields::check_author(value, self.options, &mut self.diags);
        }
    }

    fn permissions(&mut self) {
        if let Some(value) = self.field("permissions", Presence::Optional) {
            let _ = fields::check_permissions(value, &mut self.diags);
        }
    }

    fn relations(&mut self) {
        let mut other_plugins = RelationSet::new();

        for kind in RelationKind::ALL {
            let Some(value) = self.field(kind.key(), Presence::Optional) else {
                continue;
            };

            let resolved = resolve_kind(kind, value, &mut self.diags);
            other_plugins.union_with(&resolved.plugins);

            if kind == RelationKind::Depends && !resolved.plugins.is_empty() {
                self.publish(OUTPUT_DEPENDS, resolved.plugins.join(LIST_SEPARATOR));
            }
            if !resolved.relations.is_empty() {
                self.report.relations.insert(kind, resolved.relations);
            }
        }

        if !other_plugins.is_empty() {
            self.publish(OUTPUT_OTHER_PLUGINS, other_plugins.join(LIST_SEPARATOR));
        }
    }

    fn finish(self) -> Report {
        Report {
            diagnostics: self.diags.into_vec(),
            outputs: self.outputs,
            ..self.report
        }
    }
}
