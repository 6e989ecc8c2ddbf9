//! Section seeding, template option defaults, and custom section slugs.

use crate::catalog::{Catalog, SectionBlueprint, Template};
use crate::model::{BuilderOptions, OrderedSet, SectionState};

/// Description given to custom sections added without one.
pub const CUSTOM_SECTION_DESCRIPTION: &str = "Add domain-specific guidance or nuance.";
/// Placeholder given to custom sections.
pub const CUSTOM_SECTION_PLACEHOLDER: &str = "Describe the nuance the AI should consider.";

/// Build a fresh section list from the blueprints, applying the template's
/// per-section overrides. Values are always empty, so calling this again is
/// the reset operation.
pub fn seed(blueprints: &[SectionBlueprint], template: &Template) -> Vec<SectionState> {
    blueprints
        .iter()
        .map(|bp| {
            let over = template.override_for(&bp.id);
            let pick = |field: Option<&String>, default: &str| {
                field.cloned().unwrap_or_else(|| default.to_string())
            };
            SectionState {
                id: bp.id.clone(),
                label: pick(over.and_then(|o| o.label.as_ref()), &bp.label),
                description: pick(over.and_then(|o| o.description.as_ref()), &bp.description),
                placeholder: pick(over.and_then(|o| o.placeholder.as_ref()), &bp.placeholder),
                value: String::new(),
                required: Some(bp.required),
            }
        })
        .collect()
}

/// Options for a newly selected template.
///
/// Persona and tone always come from the template. The response format
/// prefers the template's, then the previous draft's, then the catalog
/// default. Audience, creativity, and temperature carry over from `previous`.
/// Guardrails are the template's followed by the previous selection (or the
/// first two presets when there is none). Success criteria carry over, or
/// default to presets #1, #3, and #4.
pub fn options_for_template(
    catalog: &Catalog,
    template: &Template,
    previous: Option<&BuilderOptions>,
) -> BuilderOptions {
    let defaults = BuilderOptions::default();

    let mut guardrails: OrderedSet = template.guardrails.iter().cloned().collect();
    match previous {
        Some(p) => guardrails.extend(p.guardrails.iter()),
        None => guardrails.extend(catalog.preset_guardrails.iter().take(2).cloned()),
    }

    let success_criteria = match previous {
        Some(p) => p.success_criteria.clone(),
        None => [0, 2, 3]
            .iter()
            .filter_map(|&i| catalog.preset_success_criteria.get(i))
            .cloned()
            .collect(),
    };

    BuilderOptions {
        target_audience: previous
            .map(|p| p.target_audience.clone())
            .unwrap_or_else(|| catalog.default_audience.clone()),
        response_format: template
            .output_format
            .clone()
            .or_else(|| previous.map(|p| p.response_format.clone()))
            .unwrap_or_else(|| catalog.default_response_format.clone()),
        creativity_level: previous.map_or(defaults.creativity_level, |p| p.creativity_level),
        temperature: previous.map_or(defaults.temperature, |p| p.temperature),
        tone: template.tone.clone(),
        persona: template.persona.clone(),
        guardrails,
        success_criteria,
    }
}

/// Derive a section id from a label: lowercase, runs of non-alphanumeric
/// characters collapsed to `-`, no leading or trailing `-`.
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut pending_sep = false;
    for ch in label.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(ch);
        } else {
            pending_sep = true;
        }
    }
    slug
}

/// Append a custom section. Returns `false` (leaving `sections` untouched)
/// when the label is blank, slugs to nothing, or collides with an existing id.
pub fn add_custom_section(
    sections: &mut Vec<SectionState>,
    label: &str,
    description: &str,
) -> bool {
    let label = label.trim();
    let id = slugify(label);
    if id.is_empty() || sections.iter().any(|s| s.id == id) {
        return false;
    }
    let description = match description.trim() {
        "" => CUSTOM_SECTION_DESCRIPTION,
        d => d,
    };
    sections.push(SectionState {
        id,
        label: label.to_string(),
        description: description.to_string(),
        placeholder: CUSTOM_SECTION_PLACEHOLDER.to_string(),
        value: String::new(),
        required: None,
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_follows_blueprint_order_with_empty_values() {
        let catalog = Catalog::builtin();
        let template = catalog.template("creative-concepting").unwrap();
        let sections = seed(&catalog.blueprints, template);

        let ids: Vec<&str> = sections.iter().map(|s| s.id.as_str()).collect();
        let expected: Vec<&str> = catalog.blueprints.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, expected);
        assert!(sections.iter().all(|s| s.value.is_empty()));
        for (section, bp) in sections.iter().zip(&catalog.blueprints) {
            assert_eq!(section.required, Some(bp.required));
            assert_eq!(section.label, bp.label);
        }
    }

    #[test]
    fn seed_applies_template_overrides() {
        let catalog = Catalog::builtin();
        let template = catalog.template("code-review").unwrap();
        let sections = seed(&catalog.blueprints, template);

        let inputs = sections.iter().find(|s| s.id == "inputs").unwrap();
        assert_eq!(inputs.label, "Code Under Review");
        assert_eq!(inputs.placeholder, "Paste the diff or the relevant files.");

        let objective = sections.iter().find(|s| s.id == "objective").unwrap();
        assert_eq!(objective.label, "Objective");
    }

    #[test]
    fn options_without_previous_use_presets_and_defaults() {
        let catalog = Catalog::builtin();
        let template = catalog.template("marketing-brief").unwrap();
        let options = options_for_template(&catalog, template, None);

        assert_eq!(options.persona, template.persona);
        assert_eq!(options.tone, template.tone);
        assert_eq!(options.target_audience, catalog.default_audience);
        assert_eq!(options.response_format, catalog.default_response_format);
        assert_eq!(options.creativity_level, 6);
        // Template guardrails first, then the first two presets, deduplicated.
        assert_eq!(options.guardrails.as_slice()[0], template.guardrails[0]);
        assert!(options.guardrails.contains(&catalog.preset_guardrails[1]));
        assert_eq!(options.guardrails.len(), 3);
        assert_eq!(
            options.success_criteria.as_slice(),
            &[
                catalog.preset_success_criteria[0].clone(),
                catalog.preset_success_criteria[2].clone(),
                catalog.preset_success_criteria[3].clone(),
            ]
        );
    }

    #[test]
    fn options_with_previous_carry_user_settings() {
        let catalog = Catalog::builtin();
        let first = catalog.template("marketing-brief").unwrap();
        let second = catalog.template("code-review").unwrap();

        let mut previous = options_for_template(&catalog, first, None);
        previous.target_audience = "Platform team".into();
        previous.creativity_level = 2;
        previous.guardrails = ["Custom rule"].into_iter().collect();

        let options = options_for_template(&catalog, second, Some(&previous));
        assert_eq!(options.target_audience, "Platform team");
        assert_eq!(options.creativity_level, 2);
        assert_eq!(options.response_format, second.output_format.clone().unwrap());
        assert_eq!(options.guardrails.as_slice().last().unwrap(), "Custom rule");
        assert_eq!(options.guardrails.len(), second.guardrails.len() + 1);
        assert_eq!(options.success_criteria, previous.success_criteria);
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("  Brand Voice & Style!! "), "brand-voice-style");
        assert_eq!(slugify("KPIs -- Q3/Q4"), "kpis-q3-q4");
        assert_eq!(slugify("***"), "");
    }

    #[test]
    fn add_custom_section_rejects_collisions() {
        let catalog = Catalog::builtin();
        let mut sections = seed(&catalog.blueprints, &catalog.templates[0]);
        let before = sections.clone();

        assert!(!add_custom_section(&mut sections, "Objective", "dup"));
        assert!(!add_custom_section(&mut sections, "   ", "blank"));
        assert_eq!(sections, before);

        assert!(add_custom_section(&mut sections, "Brand Voice", ""));
        let added = sections.last().unwrap();
        assert_eq!(added.id, "brand-voice");
        assert_eq!(added.description, CUSTOM_SECTION_DESCRIPTION);
        assert!(!added.is_required());

        assert!(!add_custom_section(&mut sections, "brand voice", "again"));
        assert_eq!(sections.len(), before.len() + 1);
    }
}
