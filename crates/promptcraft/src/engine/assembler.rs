//! Prompt text assembly.
//!
//! [`PromptBuilder`] joins blocks with a single blank line and drops empty
//! blocks, so optional parts of a draft never leave gaps in the output.
//! [`assemble`] renders a draft in the fixed order: persona, audience, and
//! tone lines, then each authored section, guardrails, success criteria, and
//! the response format.

use crate::model::{BuilderOptions, SectionState};

/// Builder for multi-block prompts.
///
/// Block content is whitespace-normalized: trimmed, trailing spaces removed
/// from each line, and runs of blank lines collapsed to one. Blocks that are
/// empty after normalization are skipped.
///
/// ```
/// use promptcraft::engine::assembler::PromptBuilder;
///
/// let prompt = PromptBuilder::new()
///     .line("Persona: Staff engineer")
///     .section("Objective", "  Review the diff.\n\n\n\nFocus on safety.  ")
///     .section("Examples", "   ")
///     .bullets("Guardrails", ["Stay in scope."])
///     .build();
///
/// assert_eq!(
///     prompt,
///     "Persona: Staff engineer\n\n## Objective\n\nReview the diff.\n\nFocus on safety.\n\n## Guardrails\n\n- Stay in scope."
/// );
/// ```
#[derive(Debug, Default)]
pub struct PromptBuilder {
    blocks: Vec<String>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `## heading` block. Skipped if `content` is blank.
    pub fn section(mut self, heading: &str, content: &str) -> Self {
        let content = normalize(content);
        if !content.is_empty() {
            self.blocks.push(format!("## {}\n\n{content}", heading.trim()));
        }
        self
    }

    /// Append a block without a heading. Skipped if blank.
    pub fn line(mut self, content: &str) -> Self {
        let content = normalize(content);
        if !content.is_empty() {
            self.blocks.push(content);
        }
        self
    }

    /// Append several lines as one block, dropping blank ones.
    pub fn lines<'a>(self, lines: impl IntoIterator<Item = &'a str>) -> Self {
        let joined: Vec<String> = lines
            .into_iter()
            .map(normalize)
            .filter(|l| !l.is_empty())
            .collect();
        self.line(&joined.join("\n"))
    }

    /// Append a `## heading` block of `- item` bullets in iteration order.
    /// Skipped if every item is blank.
    pub fn bullets<'a>(self, heading: &str, items: impl IntoIterator<Item = &'a str>) -> Self {
        let body: Vec<String> = items
            .into_iter()
            .map(str::trim)
            .filter(|i| !i.is_empty())
            .map(|i| format!("- {i}"))
            .collect();
        self.section(heading, &body.join("\n"))
    }

    /// Join all blocks with one blank line.
    pub fn build(self) -> String {
        self.blocks.join("\n\n")
    }
}

/// Trim `text`, strip trailing whitespace per line, and collapse runs of
/// blank lines into one.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = false;
    for line in text.trim().lines().map(str::trim_end) {
        if line.is_empty() {
            blank_run = true;
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
            if blank_run {
                out.push('\n');
            }
        }
        blank_run = false;
        out.push_str(line);
    }
    out
}

/// Render the prompt for one draft. Never fails; absent fields omit their block.
pub fn assemble(sections: &[SectionState], options: &BuilderOptions) -> String {
    let preamble = [
        labelled("Persona", &options.persona),
        labelled("Audience", &options.target_audience),
        labelled("Tone", &options.tone),
    ];

    let mut builder = PromptBuilder::new().lines(preamble.iter().flatten().map(String::as_str));
    for section in sections {
        builder = builder.section(&section.label, &section.value);
    }
    builder
        .bullets("Guardrails", options.guardrails.iter())
        .bullets("Success Criteria", options.success_criteria.iter())
        .section("Response Format", &options.response_format)
        .build()
}

fn labelled(label: &str, value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| format!("{label}: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(label: &str, value: &str) -> SectionState {
        SectionState {
            id: label.to_lowercase(),
            label: label.into(),
            description: String::new(),
            placeholder: String::new(),
            value: value.into(),
            required: Some(true),
        }
    }

    #[test]
    fn empty_builder_is_empty() {
        assert_eq!(PromptBuilder::new().build(), "");
        assert_eq!(assemble(&[], &BuilderOptions::default()), "");
    }

    #[test]
    fn normalize_collapses_blank_runs() {
        assert_eq!(normalize("  a  \n\n\n  \n b\nc \n"), "a\n\n b\nc");
        assert_eq!(normalize("\n\n  \n"), "");
    }

    #[test]
    fn renders_in_fixed_order() {
        let options = BuilderOptions {
            persona: "Staff engineer".into(),
            target_audience: "Platform team".into(),
            tone: "Direct".into(),
            response_format: "Numbered list.".into(),
            guardrails: ["Stay in scope.", "Cite sources."].into_iter().collect(),
            success_criteria: ["Under 300 words."].into_iter().collect(),
            ..Default::default()
        };
        let sections = vec![
            section("Objective", "Review the change."),
            section("Context", "   "),
            section("Constraints", "\n  No new deps.  \n"),
        ];

        let prompt = assemble(&sections, &options);
        assert_eq!(
            prompt,
            "Persona: Staff engineer\nAudience: Platform team\nTone: Direct\n\n\
             ## Objective\n\nReview the change.\n\n\
             ## Constraints\n\nNo new deps.\n\n\
             ## Guardrails\n\n- Stay in scope.\n- Cite sources.\n\n\
             ## Success Criteria\n\n- Under 300 words.\n\n\
             ## Response Format\n\nNumbered list."
        );
    }

    #[test]
    fn omits_blank_preamble_lines() {
        let options = BuilderOptions {
            tone: "Warm".into(),
            persona: "  ".into(),
            ..Default::default()
        };
        assert_eq!(assemble(&[], &options), "Tone: Warm");
    }

    #[test]
    fn never_contains_double_blank_lines() {
        let options = BuilderOptions {
            persona: "P".into(),
            response_format: "\n\nFormat\n\n\n\nhere\n".into(),
            ..Default::default()
        };
        let sections = vec![section("A", "x\n\n\n\ny"), section("B", "\n\n\nz\n\n")];
        let prompt = assemble(&sections, &options);
        assert!(!prompt.contains("\n\n\n"));
        assert!(!prompt.starts_with('\n'));
        assert!(!prompt.ends_with('\n'));
    }
}
