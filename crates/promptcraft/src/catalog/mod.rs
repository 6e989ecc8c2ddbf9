//! Section blueprints, templates, and preset vocabularies.
//!
//! A [`Catalog`] is built once at startup and injected into the
//! [`Synthesizer`](crate::engine::Synthesizer). It is either the compiled-in
//! table ([`Catalog::builtin`]) or a JSON file ([`Catalog::load`]) checked
//! against the catalog's JSON Schema before it is parsed.

mod builtin;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Audience used when neither the caller nor a previous draft supplies one.
pub const DEFAULT_AUDIENCE: &str =
    "Executive stakeholders and cross-functional collaborators who will act on the output.";

/// Response format used when the template does not define one.
pub const DEFAULT_RESPONSE_FORMAT: &str = "Use structured markdown with descriptive headings, tables where relevant, and a concise executive summary.";

/// Success criterion always offered for selection, after the catalog presets.
pub const ASSUMPTIONS_CRITERION: &str = "Explicitly state assumptions and unresolved questions.";

/// Catalog definition of one authoring dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectionBlueprint {
    pub id: String,
    pub label: String,
    pub description: String,
    pub placeholder: String,
    #[serde(default)]
    pub required: bool,
    /// Boilerplate offered when a required section is left empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starter: Option<String>,
}

/// Per-template replacement text for one blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectionOverride {
    /// Blueprint id this override applies to.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// A named starting configuration for one use case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub persona: String,
    pub tone: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub guardrails: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub success_criteria: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub section_overrides: Vec<SectionOverride>,
}

impl Template {
    pub fn override_for(&self, blueprint_id: &str) -> Option<&SectionOverride> {
        self.section_overrides.iter().find(|o| o.id == blueprint_id)
    }
}

/// Read-only catalog of blueprints, templates, and preset vocabularies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub blueprints: Vec<SectionBlueprint>,
    pub templates: Vec<Template>,
    pub preset_guardrails: Vec<String>,
    pub preset_success_criteria: Vec<String>,
    #[serde(default = "default_audience")]
    pub default_audience: String,
    #[serde(default = "default_response_format")]
    pub default_response_format: String,
}

fn default_audience() -> String {
    DEFAULT_AUDIENCE.to_string()
}

fn default_response_format() -> String {
    DEFAULT_RESPONSE_FORMAT.to_string()
}

impl Catalog {
    /// The compiled-in catalog.
    pub fn builtin() -> Self {
        builtin::catalog()
    }

    /// Read and validate a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read catalog '{}': {e}", path.display()))?;
        let catalog = Self::from_json(&data)
            .map_err(|e| format!("invalid catalog '{}': {e}", path.display()))?;
        debug!(
            "Loaded catalog from {} ({} blueprints, {} templates)",
            path.display(),
            catalog.blueprints.len(),
            catalog.templates.len()
        );
        Ok(catalog)
    }

    /// Parse a catalog from JSON text.
    ///
    /// The document is validated against the catalog JSON Schema first so
    /// that shape errors point at the offending path, then checked for the
    /// cross-reference invariants in [`validate`](Self::validate).
    pub fn from_json(data: &str) -> Result<Self, String> {
        let value: serde_json::Value =
            serde_json::from_str(data).map_err(|e| format!("failed to parse JSON: {e}"))?;

        let schema = crate::json_schema_for::<Catalog>();
        let validator = jsonschema::validator_for(&schema)
            .map_err(|e| format!("catalog schema is invalid: {e}"))?;
        let errors: Vec<String> = validator
            .iter_errors(&value)
            .map(|e| format!("  - {}: {e}", e.instance_path()))
            .collect();
        if !errors.is_empty() {
            return Err(format!(
                "schema validation failed:\n{}",
                errors.join("\n")
            ));
        }

        let catalog: Catalog =
            serde_json::from_value(value).map_err(|e| format!("failed to decode catalog: {e}"))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check the invariants serde cannot express: unique ids, template
    /// guardrails drawn from the preset vocabulary, overrides naming known
    /// blueprints, and at least one blueprint and template.
    pub fn validate(&self) -> Result<(), String> {
        if self.blueprints.is_empty() {
            return Err("catalog defines no section blueprints".into());
        }
        if self.templates.is_empty() {
            return Err("catalog defines no templates".into());
        }

        let mut blueprint_ids = HashSet::new();
        for blueprint in &self.blueprints {
            if blueprint.id.trim().is_empty() {
                return Err(format!("blueprint '{}' has an empty id", blueprint.label));
            }
            if !blueprint_ids.insert(blueprint.id.as_str()) {
                return Err(format!("duplicate blueprint id '{}'", blueprint.id));
            }
        }

        let presets: HashSet<&str> = self.preset_guardrails.iter().map(String::as_str).collect();
        let mut template_ids = HashSet::new();
        for template in &self.templates {
            if !template_ids.insert(template.id.as_str()) {
                return Err(format!("duplicate template id '{}'", template.id));
            }
            if let Some(g) = template
                .guardrails
                .iter()
                .find(|g| !presets.contains(g.as_str()))
            {
                return Err(format!(
                    "template '{}' uses guardrail '{g}' which is not a preset",
                    template.id
                ));
            }
            if let Some(o) = template
                .section_overrides
                .iter()
                .find(|o| !blueprint_ids.contains(o.id.as_str()))
            {
                return Err(format!(
                    "template '{}' overrides unknown section '{}'",
                    template.id, o.id
                ));
            }
        }
        Ok(())
    }

    pub fn template(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// The first template; used when the caller has not chosen one.
    pub fn default_template(&self) -> Option<&Template> {
        self.templates.first()
    }

    pub fn blueprint(&self, id: &str) -> Option<&SectionBlueprint> {
        self.blueprints.iter().find(|b| b.id == id)
    }

    /// Starter text for a section: the blueprint's own starter, or a generic
    /// prompt built from the section description.
    pub fn starter_for(&self, section_id: &str, description: &str) -> String {
        self.blueprint(section_id)
            .and_then(|b| b.starter.clone())
            .unwrap_or_else(|| {
                let focus = description.trim().trim_end_matches('.');
                if focus.is_empty() {
                    "Describe this part of the task in two or three concrete sentences.".into()
                } else {
                    format!("{focus}. Spell out the specifics the model must account for.")
                }
            })
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::builtin();
        catalog.validate().unwrap();
        assert!(catalog.blueprints.iter().any(|b| b.required));
        assert!(catalog.preset_success_criteria.len() >= 4);
        assert!(catalog.preset_guardrails.len() >= 2);
    }

    #[test]
    fn builtin_round_trips_through_json_validation() {
        let json = serde_json::to_string(&Catalog::builtin()).unwrap();
        let parsed = Catalog::from_json(&json).unwrap();
        assert_eq!(parsed, Catalog::builtin());
    }

    #[test]
    fn schema_errors_name_the_offending_path() {
        let err = Catalog::from_json(r#"{"blueprints": 3, "templates": []}"#).unwrap_err();
        assert!(err.contains("schema validation failed"), "{err}");
        assert!(err.contains("blueprints"), "{err}");
    }

    #[test]
    fn rejects_non_preset_template_guardrail() {
        let mut catalog = Catalog::builtin();
        catalog.templates[0].guardrails.push("Invented rule".into());
        let err = catalog.validate().unwrap_err();
        assert!(err.contains("Invented rule"));
    }

    #[test]
    fn rejects_duplicate_blueprint_ids() {
        let mut catalog = Catalog::builtin();
        let dup = catalog.blueprints[0].clone();
        catalog.blueprints.push(dup);
        assert!(catalog.validate().unwrap_err().contains("duplicate blueprint"));
    }

    #[test]
    fn rejects_override_for_unknown_section() {
        let mut catalog = Catalog::builtin();
        catalog.templates[0].section_overrides.push(SectionOverride {
            id: "nonexistent".into(),
            label: Some("X".into()),
            description: None,
            placeholder: None,
        });
        assert!(catalog.validate().unwrap_err().contains("nonexistent"));
    }

    #[test]
    fn load_reads_file_and_applies_defaults() {
        let mut value = serde_json::to_value(Catalog::builtin()).unwrap();
        value.as_object_mut().unwrap().remove("defaultAudience");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, value.to_string()).unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.default_audience, DEFAULT_AUDIENCE);
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = Catalog::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.contains("failed to read catalog"));
        assert!(err.contains("here.json"));
    }

    #[test]
    fn starter_falls_back_to_description() {
        let catalog = Catalog::builtin();
        let text = catalog.starter_for("custom-thing", "Regional pricing nuance.");
        assert!(text.starts_with("Regional pricing nuance."));
        let builtin = catalog.starter_for("objective", "");
        assert_eq!(
            Some(builtin),
            catalog.blueprint("objective").and_then(|b| b.starter.clone())
        );
    }
}
