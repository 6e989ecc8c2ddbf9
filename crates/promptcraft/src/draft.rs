//! Caller-side draft state.
//!
//! A [`Draft`] is the snapshot a front end keeps between synthesis calls:
//! the selected template, the section list, and the options. Every mutation
//! here is the deterministic state transition the authoring UI performs;
//! the engine itself never mutates a draft.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{ASSUMPTIONS_CRITERION, Catalog, Template};
use crate::engine::seeder::{add_custom_section, options_for_template, seed};
use crate::model::{BuilderOptions, Improvement, OrderedSet, SectionState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub template_id: String,
    pub sections: Vec<SectionState>,
    pub options: BuilderOptions,
}

impl Draft {
    /// Seed a draft from `template_id`, or from the catalog's first template
    /// when `None`.
    pub fn new(catalog: &Catalog, template_id: Option<&str>) -> Result<Self, String> {
        let template = resolve(catalog, template_id)?;
        Ok(Self {
            template_id: template.id.clone(),
            sections: seed(&catalog.blueprints, template),
            options: options_for_template(catalog, template, None),
        })
    }

    /// The selected template, if the catalog still contains it.
    pub fn template<'a>(&self, catalog: &'a Catalog) -> Option<&'a Template> {
        catalog.template(&self.template_id)
    }

    /// Switch templates. Sections are reseeded (authored values are
    /// discarded); audience, creativity, temperature, guardrails, and success
    /// criteria carry over.
    pub fn select_template(&mut self, catalog: &Catalog, template_id: &str) -> Result<(), String> {
        let template = resolve(catalog, Some(template_id))?;
        self.options = options_for_template(catalog, template, Some(&self.options));
        self.sections = seed(&catalog.blueprints, template);
        self.template_id = template.id.clone();
        debug!("Selected template {}", self.template_id);
        Ok(())
    }

    /// Reseed sections and options from the current template as if newly
    /// selected.
    pub fn reset(&mut self, catalog: &Catalog) -> Result<(), String> {
        let template = resolve(catalog, Some(&self.template_id))?;
        self.sections = seed(&catalog.blueprints, template);
        self.options = options_for_template(catalog, template, None);
        Ok(())
    }

    pub fn section(&self, id: &str) -> Option<&SectionState> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Replace one section's value. Returns `false` for an unknown id.
    pub fn set_section_value(&mut self, id: &str, value: impl Into<String>) -> bool {
        match self.sections.iter_mut().find(|s| s.id == id) {
            Some(section) => {
                section.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Append a custom section whose id is the slug of `label`. Returns
    /// `false` without changes when the slug is empty or already taken.
    pub fn add_section(&mut self, label: &str, description: &str) -> bool {
        add_custom_section(&mut self.sections, label, description)
    }

    /// Append an improvement's snippet to its target section.
    ///
    /// Returns `true` when the section value changed. Applying the same
    /// improvement again is a no-op.
    pub fn apply_improvement(&mut self, improvement: &Improvement) -> bool {
        let Some(section) = self
            .sections
            .iter_mut()
            .find(|s| s.id == improvement.target_section_id)
        else {
            return false;
        };
        let updated = apply_snippet(&section.value, &improvement.snippet);
        if updated == section.value {
            return false;
        }
        section.value = updated;
        true
    }

    /// Flip a guardrail's selection. Returns whether it is now selected.
    pub fn toggle_guardrail(&mut self, guardrail: &str) -> bool {
        self.options.guardrails.toggle(guardrail)
    }

    /// Select a free-text guardrail. Blank input and duplicates are ignored.
    pub fn add_guardrail(&mut self, guardrail: &str) -> bool {
        insert_trimmed(&mut self.options.guardrails, guardrail)
    }

    /// Flip a success criterion's selection. Returns whether it is now selected.
    pub fn toggle_success_criterion(&mut self, criterion: &str) -> bool {
        self.options.success_criteria.toggle(criterion)
    }

    /// Select a free-text success criterion. Blank input and duplicates are
    /// ignored.
    pub fn add_success_criterion(&mut self, criterion: &str) -> bool {
        insert_trimmed(&mut self.options.success_criteria, criterion)
    }

    /// Guardrails offered for selection: presets, then the template's own,
    /// then custom selections.
    pub fn available_guardrails(&self, catalog: &Catalog) -> Vec<String> {
        let mut all: OrderedSet = catalog.preset_guardrails.iter().cloned().collect();
        if let Some(template) = self.template(catalog) {
            all.extend(template.guardrails.iter().cloned());
        }
        all.extend(self.options.guardrails.iter());
        all.into()
    }

    /// Success criteria offered for selection, ordered like
    /// [`available_guardrails`](Self::available_guardrails) and closed by
    /// [`ASSUMPTIONS_CRITERION`].
    pub fn available_success_criteria(&self, catalog: &Catalog) -> Vec<String> {
        let mut all: OrderedSet = catalog.preset_success_criteria.iter().cloned().collect();
        if let Some(template) = self.template(catalog) {
            all.extend(template.success_criteria.iter().cloned());
        }
        all.extend(self.options.success_criteria.iter());
        all.insert(ASSUMPTIONS_CRITERION);
        all.into()
    }
}

/// Append `snippet` to `value` after one blank line.
///
/// Returns `value` unchanged when the trimmed snippet is empty or already
/// appears in `value` verbatim. An empty value becomes the snippet itself.
pub fn apply_snippet(value: &str, snippet: &str) -> String {
    let snippet = snippet.trim();
    if snippet.is_empty() || value.contains(snippet) {
        return value.to_string();
    }
    let current = value.trim();
    if current.is_empty() {
        snippet.to_string()
    } else {
        format!("{current}\n\n{snippet}")
    }
}

fn resolve<'a>(catalog: &'a Catalog, template_id: Option<&str>) -> Result<&'a Template, String> {
    match template_id {
        Some(id) => catalog
            .template(id)
            .ok_or_else(|| format!("unknown template '{id}'")),
        None => catalog
            .default_template()
            .ok_or_else(|| "catalog has no templates".to_string()),
    }
}

fn insert_trimmed(set: &mut OrderedSet, item: &str) -> bool {
    let item = item.trim();
    !item.is_empty() && set.insert(item)
}
