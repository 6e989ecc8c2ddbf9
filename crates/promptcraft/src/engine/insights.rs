//! Rule-based insights and auto-apply improvements.
//!
//! Rules run in a fixed order and each emits at most one insight per
//! subject. The final list is stably sorted by severity, so rule order
//! breaks ties.

use tracing::trace;

use crate::catalog::Catalog;
use crate::config::ScoringConfig;
use crate::engine::scoring::{duplicate_sections, specificity_score};
use crate::model::{
    BuilderOptions, Improvement, Insight, SectionState, Severity, total_word_count,
};

/// Snippet offered when a long draft lacks concrete signals.
pub const QUANTIFY_SNIPPET: &str =
    "Quantify the goal: name the metric, its current baseline, the target value, and the deadline.";

/// Section the guardrail improvement is appended to when present.
const GUARDRAIL_SECTION: &str = "constraints";

/// Run every rule over one draft.
///
/// Every returned improvement targets a section present in `sections`, and
/// improvement ids are unique within the call.
pub fn analyze(
    sections: &[SectionState],
    options: &BuilderOptions,
    catalog: &Catalog,
    config: &ScoringConfig,
) -> (Vec<Insight>, Vec<Improvement>) {
    let mut insights = Vec::new();
    let mut improvements = Vec::new();
    let word_count = total_word_count(sections);
    let band = config.word_band;

    // 1. Empty required sections.
    for section in sections.iter().filter(|s| s.is_required() && s.is_blank()) {
        let starter = catalog.starter_for(&section.id, &section.description);
        trace!(section = %section.id, "required section empty");
        insights.push(Insight {
            id: format!("missing-section-{}", section.id),
            severity: Severity::Critical,
            title: format!("{} is empty", section.label),
            detail: format!(
                "{} is required. Without it the model has to guess: {}",
                section.label,
                lowercase_first(&section.description)
            ),
            suggestion: Some(starter.clone()),
            target_section_id: Some(section.id.clone()),
        });
        improvements.push(Improvement {
            id: format!("starter-{}", section.id),
            target_section_id: section.id.clone(),
            title: format!("Insert starter for {}", section.label),
            snippet: starter,
        });
    }

    // 2. Too short overall.
    if word_count < band.min {
        trace!(word_count, min = band.min, "draft below word band");
        insights.push(Insight {
            id: "too-short".into(),
            severity: Severity::Warning,
            title: "Prompt is thin".into(),
            detail: format!(
                "The sections hold {word_count} words; aim for at least {} so the model has enough context.",
                band.min
            ),
            suggestion: None,
            target_section_id: None,
        });
    }

    // 3. Too few guardrails.
    if options.guardrails.len() < config.min_guardrails {
        trace!(count = options.guardrails.len(), "too few guardrails");
        insights.push(Insight {
            id: "few-guardrails".into(),
            severity: Severity::Warning,
            title: "Add guardrails".into(),
            detail: format!(
                "{} guardrail(s) selected; at least {} keep the response within safe bounds.",
                options.guardrails.len(),
                config.min_guardrails
            ),
            suggestion: None,
            target_section_id: None,
        });
        let target = sections
            .iter()
            .find(|s| s.id == GUARDRAIL_SECTION)
            .or_else(|| sections.last());
        // Presets already selected or already written into the target are skipped.
        let next = target.and_then(|target| {
            catalog
                .preset_guardrails
                .iter()
                .filter(|g| !options.guardrails.contains(g))
                .map(|g| format!("Guardrail: {g}"))
                .find(|snippet| !target.value.contains(snippet.as_str()))
                .map(|snippet| (target, snippet))
        });
        if let Some((target, snippet)) = next {
            improvements.push(Improvement {
                id: "add-guardrail".into(),
                target_section_id: target.id.clone(),
                title: "Append a guardrail".into(),
                snippet,
            });
        }
    }

    // 4. No success criteria.
    if options.success_criteria.is_empty() {
        trace!("no success criteria");
        insights.push(Insight {
            id: "no-success-criteria".into(),
            severity: Severity::Warning,
            title: "Define success criteria".into(),
            detail: "Without success criteria the model cannot judge when its answer is good enough."
                .into(),
            suggestion: None,
            target_section_id: None,
        });
    }

    // 5. Optional sections that were started but are too thin.
    for section in sections
        .iter()
        .filter(|s| !s.is_required() && !s.is_blank())
        .filter(|s| s.word_count() < config.elaboration_min_words)
    {
        trace!(section = %section.id, words = section.word_count(), "section needs elaboration");
        let snippet = elaboration_snippet(&section.description);
        insights.push(Insight {
            id: format!("elaborate-{}", section.id),
            severity: Severity::Info,
            title: format!("Expand {}", section.label),
            detail: format!(
                "{} has {} words; a few more specifics will sharpen the result.",
                section.label,
                section.word_count()
            ),
            suggestion: Some(snippet.clone()),
            target_section_id: Some(section.id.clone()),
        });
        improvements.push(Improvement {
            id: format!("elaborate-{}", section.id),
            target_section_id: section.id.clone(),
            title: format!("Elaborate on {}", section.label),
            snippet,
        });
    }

    // 6. Persona and tone.
    if options.persona.trim().is_empty() {
        insights.push(Insight {
            id: "missing-persona".into(),
            severity: Severity::Critical,
            title: "Persona is empty".into(),
            detail: "Tell the model who it is acting as so it can calibrate expertise and voice."
                .into(),
            suggestion: None,
            target_section_id: None,
        });
    }
    if options.tone.trim().is_empty() {
        insights.push(Insight {
            id: "missing-tone".into(),
            severity: Severity::Critical,
            title: "Tone is empty".into(),
            detail: "Describe the voice the response should use.".into(),
            suggestion: None,
            target_section_id: None,
        });
    }

    // 7. Near-verbatim repeats.
    for (earlier, later) in duplicate_sections(sections, config.duplicate_similarity) {
        let (first, repeat) = (&sections[earlier], &sections[later]);
        trace!(earlier = %first.id, later = %repeat.id, "duplicate sections");
        insights.push(Insight {
            id: format!("duplicate-{}", repeat.id),
            severity: Severity::Warning,
            title: format!("{} repeats {}", repeat.label, first.label),
            detail: format!(
                "{} says nearly the same thing as {}. Give each section distinct information.",
                repeat.label, first.label
            ),
            suggestion: None,
            target_section_id: Some(repeat.id.clone()),
        });
    }

    // 8. Too long overall.
    if word_count > band.max {
        insights.push(Insight {
            id: "too-long".into(),
            severity: Severity::Info,
            title: "Prompt is long".into(),
            detail: format!(
                "The sections hold {word_count} words; above {} the key instructions start to get diluted.",
                band.max
            ),
            suggestion: None,
            target_section_id: None,
        });
    }

    // 9. Enough words, too few concrete signals.
    if word_count >= band.min
        && specificity_score(sections, options, word_count, config) < config.low_specificity
    {
        trace!("low specificity");
        let target = sections
            .iter()
            .find(|s| s.is_required())
            .or_else(|| sections.first());
        insights.push(Insight {
            id: "low-specificity".into(),
            severity: Severity::Info,
            title: "Add concrete details".into(),
            detail: "Numbers, names, and measurable criteria make the request easier to act on."
                .into(),
            suggestion: Some(QUANTIFY_SNIPPET.into()),
            target_section_id: target.map(|s| s.id.clone()),
        });
        if let Some(target) = target {
            improvements.push(Improvement {
                id: "quantify-goal".into(),
                target_section_id: target.id.clone(),
                title: "Quantify the goal".into(),
                snippet: QUANTIFY_SNIPPET.into(),
            });
        }
    }

    insights.sort_by_key(|i| i.severity);
    (insights, improvements)
}

/// Elaboration language built from a section description.
pub fn elaboration_snippet(description: &str) -> String {
    let focus = description.trim().trim_end_matches('.');
    if focus.is_empty() {
        "Add concrete details: names, numbers, examples, and the edge cases that matter.".into()
    } else {
        format!(
            "Expand with specifics: {}. Include names, numbers, and examples.",
            lowercase_first(focus)
        )
    }
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::apply_snippet;
    use crate::engine::seeder::{options_for_template, seed};
    use std::collections::HashSet;

    fn draft(template_id: &str) -> (Catalog, Vec<SectionState>, BuilderOptions) {
        let catalog = Catalog::builtin();
        let template = catalog.template(template_id).unwrap().clone();
        let sections = seed(&catalog.blueprints, &template);
        let options = options_for_template(&catalog, &template, None);
        (catalog, sections, options)
    }

    fn filler(prefix: &str, n: usize) -> String {
        (0..n)
            .map(|i| format!("{prefix}{}", (b'a' + (i % 26) as u8) as char))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn empty_required_sections_are_critical_with_starter() {
        let (catalog, sections, options) = draft("marketing-brief");
        let (insights, improvements) =
            analyze(&sections, &options, &catalog, &ScoringConfig::default());

        for section in sections.iter().filter(|s| s.is_required()) {
            let insight = insights
                .iter()
                .find(|i| i.target_section_id.as_deref() == Some(section.id.as_str()))
                .unwrap();
            assert_eq!(insight.severity, Severity::Critical);
            let starter = insight.suggestion.as_ref().unwrap();
            assert!(
                improvements
                    .iter()
                    .any(|i| i.target_section_id == section.id && &i.snippet == starter)
            );
        }
        assert!(insights.iter().any(|i| i.id == "too-short"));
    }

    #[test]
    fn insights_sorted_by_severity_with_rule_order_ties() {
        let (catalog, sections, mut options) = draft("research-synthesis");
        options.persona.clear();
        options.success_criteria = Default::default();
        let (insights, _) = analyze(&sections, &options, &catalog, &ScoringConfig::default());

        let severities: Vec<Severity> = insights.iter().map(|i| i.severity).collect();
        let mut sorted = severities.clone();
        sorted.sort();
        assert_eq!(severities, sorted);

        // Section criticals come before persona because rule 1 precedes rule 6.
        let last_critical = insights
            .iter()
            .rposition(|i| i.severity == Severity::Critical)
            .unwrap();
        assert_eq!(insights[last_critical].id, "missing-persona");
        // Warnings keep rule order: length, then success criteria.
        let warnings: Vec<&str> = insights
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(warnings, vec!["too-short", "no-success-criteria"]);
    }

    #[test]
    fn few_guardrails_offers_unselected_preset_on_constraints() {
        let (catalog, sections, mut options) = draft("creative-concepting");
        options.guardrails = [catalog.preset_guardrails[0].clone()].into_iter().collect();
        let (insights, improvements) =
            analyze(&sections, &options, &catalog, &ScoringConfig::default());

        assert!(insights.iter().any(|i| i.id == "few-guardrails"));
        let add = improvements.iter().find(|i| i.id == "add-guardrail").unwrap();
        assert_eq!(add.target_section_id, "constraints");
        assert_eq!(add.snippet, format!("Guardrail: {}", catalog.preset_guardrails[1]));
    }

    #[test]
    fn applied_guardrail_is_not_offered_again() {
        let (catalog, mut sections, mut options) = draft("creative-concepting");
        options.guardrails = Default::default();
        let config = ScoringConfig::default();

        let (_, improvements) = analyze(&sections, &options, &catalog, &config);
        let first = improvements.iter().find(|i| i.id == "add-guardrail").unwrap().clone();
        let target = sections
            .iter_mut()
            .find(|s| s.id == first.target_section_id)
            .unwrap();
        target.value = apply_snippet(&target.value, &first.snippet);

        let (insights, improvements) = analyze(&sections, &options, &catalog, &config);
        assert!(insights.iter().any(|i| i.id == "few-guardrails"));
        let next = improvements.iter().find(|i| i.id == "add-guardrail").unwrap();
        assert_eq!(next.snippet, format!("Guardrail: {}", catalog.preset_guardrails[1]));
        assert_ne!(next.snippet, first.snippet);
    }

    #[test]
    fn guardrail_improvement_stops_when_every_preset_is_written() {
        let (catalog, mut sections, mut options) = draft("creative-concepting");
        options.guardrails = Default::default();
        let constraints = sections.iter_mut().find(|s| s.id == "constraints").unwrap();
        for guardrail in &catalog.preset_guardrails {
            let snippet = format!("Guardrail: {guardrail}");
            constraints.value = apply_snippet(&constraints.value, &snippet);
        }

        let (insights, improvements) =
            analyze(&sections, &options, &catalog, &ScoringConfig::default());
        assert!(insights.iter().any(|i| i.id == "few-guardrails"));
        assert!(improvements.iter().all(|i| i.id != "add-guardrail"));
    }

    #[test]
    fn empty_tone_is_critical_after_section_criticals() {
        let (catalog, sections, mut options) = draft("marketing-brief");
        options.tone.clear();
        let (insights, _) = analyze(&sections, &options, &catalog, &ScoringConfig::default());

        let tone = insights.iter().position(|i| i.id == "missing-tone").unwrap();
        assert_eq!(insights[tone].severity, Severity::Critical);
        assert!(insights[tone].target_section_id.is_none());
        let last_section_critical = insights
            .iter()
            .rposition(|i| i.id.starts_with("missing-section-"))
            .unwrap();
        assert!(last_section_critical < tone);
        assert!(insights.iter().all(|i| i.id != "missing-persona"));
    }

    #[test]
    fn whitespace_persona_and_tone_count_as_empty() {
        let (catalog, sections, mut options) = draft("code-review");
        options.persona = "  \t ".into();
        options.tone = "\n  ".into();
        let (insights, _) = analyze(&sections, &options, &catalog, &ScoringConfig::default());

        let criticals: Vec<&str> = insights
            .iter()
            .filter(|i| i.target_section_id.is_none() && i.severity == Severity::Critical)
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(criticals, vec!["missing-persona", "missing-tone"]);
    }

    #[test]
    fn guardrail_improvement_skipped_without_sections() {
        let catalog = Catalog::builtin();
        let options = BuilderOptions::default();
        let (insights, improvements) = analyze(&[], &options, &catalog, &ScoringConfig::default());
        assert!(insights.iter().any(|i| i.id == "few-guardrails"));
        assert!(improvements.is_empty());
    }

    #[test]
    fn short_optional_section_gets_elaboration_hint() {
        let (catalog, mut sections, options) = draft("code-review");
        let examples = sections.iter_mut().find(|s| s.id == "examples").unwrap();
        examples.value = "Follow the style guide.".into();
        let (insights, improvements) =
            analyze(&sections, &options, &catalog, &ScoringConfig::default());

        let insight = insights.iter().find(|i| i.id == "elaborate-examples").unwrap();
        assert_eq!(insight.severity, Severity::Info);
        let improvement = improvements.iter().find(|i| i.id == "elaborate-examples").unwrap();
        assert!(improvement.snippet.starts_with("Expand with specifics: style guides"));
    }

    #[test]
    fn duplicate_section_targets_later_copy() {
        let (catalog, mut sections, options) = draft("marketing-brief");
        let text = filler("topic", 20);
        sections[0].value = text.clone();
        sections[1].value = text;
        let (insights, _) = analyze(&sections, &options, &catalog, &ScoringConfig::default());
        let dup = insights.iter().find(|i| i.id.starts_with("duplicate-")).unwrap();
        assert_eq!(dup.target_section_id.as_deref(), Some(sections[1].id.as_str()));
        assert_eq!(dup.severity, Severity::Warning);
    }

    #[test]
    fn long_vague_draft_gets_info_hints() {
        let (catalog, mut sections, options) = draft("marketing-brief");
        for (i, section) in sections.iter_mut().enumerate() {
            section.value = filler(&format!("v{}x", (b'a' + i as u8) as char), 70);
        }
        let (insights, improvements) =
            analyze(&sections, &options, &catalog, &ScoringConfig::default());
        assert!(insights.iter().any(|i| i.id == "too-long"));
        assert!(insights.iter().any(|i| i.id == "low-specificity"));
        let quantify = improvements.iter().find(|i| i.id == "quantify-goal").unwrap();
        assert_eq!(quantify.target_section_id, "objective");
    }

    #[test]
    fn improvements_target_existing_sections_with_unique_ids() {
        let (catalog, mut sections, mut options) = draft("customer-support");
        options.guardrails = Default::default();
        sections[2].value = "short".into();
        let (_, improvements) = analyze(&sections, &options, &catalog, &ScoringConfig::default());

        let ids: HashSet<&str> = sections.iter().map(|s| s.id.as_str()).collect();
        assert!(improvements.iter().all(|i| ids.contains(i.target_section_id.as_str())));
        let unique: HashSet<&str> = improvements.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(unique.len(), improvements.len());
    }

    #[test]
    fn complete_draft_has_no_insights() {
        let (catalog, mut sections, options) = draft("code-review");
        for (i, section) in sections
            .iter_mut()
            .enumerate()
            .filter(|(_, s)| s.is_required())
        {
            section.value = format!(
                "Review PR 48{i} in Payments Service for Acme Bank: check 3 endpoints, 2 migrations, and 15% latency budget. {}",
                filler(&format!("c{}q", (b'a' + i as u8) as char), 30)
            );
        }
        let (insights, improvements) =
            analyze(&sections, &options, &catalog, &ScoringConfig::default());
        assert!(insights.is_empty(), "{insights:?}");
        assert!(improvements.is_empty());
    }
}
