//! Compiled-in catalog contents.

use super::{
    Catalog, DEFAULT_AUDIENCE, DEFAULT_RESPONSE_FORMAT, SectionBlueprint, SectionOverride,
    Template,
};

const PRESET_GUARDRAILS: &[&str] = &[
    "Do not fabricate facts, figures, or sources; flag uncertainty explicitly.",
    "Ask clarifying questions before proceeding when requirements are ambiguous.",
    "Keep sensitive or personal data out of the response.",
    "Cite the source or reasoning behind every quantitative claim.",
    "Stay within the stated scope; list out-of-scope requests separately.",
    "Avoid legal, medical, or financial advice unless explicitly requested.",
    "Double-check the final answer against every constraint before responding.",
    "Use inclusive, bias-free language.",
];

const PRESET_SUCCESS_CRITERIA: &[&str] = &[
    "Every requirement in the objective is addressed explicitly.",
    "Recommendations include measurable targets or KPIs.",
    "Output follows the requested response format exactly.",
    "Assumptions and unresolved questions are listed at the end.",
    "Includes at least 3 concrete, actionable next steps.",
    "Response stays under 500 words unless more detail is requested.",
];

fn blueprint(
    id: &str,
    label: &str,
    description: &str,
    placeholder: &str,
    required: bool,
    starter: Option<&str>,
) -> SectionBlueprint {
    SectionBlueprint {
        id: id.into(),
        label: label.into(),
        description: description.into(),
        placeholder: placeholder.into(),
        required,
        starter: starter.map(Into::into),
    }
}

fn relabel(
    id: &str,
    label: Option<&str>,
    description: Option<&str>,
    placeholder: Option<&str>,
) -> SectionOverride {
    SectionOverride {
        id: id.into(),
        label: label.map(Into::into),
        description: description.map(Into::into),
        placeholder: placeholder.map(Into::into),
    }
}

fn presets(indices: &[usize], pool: &[&str]) -> Vec<String> {
    indices
        .iter()
        .filter_map(|&i| pool.get(i))
        .map(|s| s.to_string())
        .collect()
}

fn blueprints() -> Vec<SectionBlueprint> {
    vec![
        blueprint(
            "objective",
            "Objective",
            "The single outcome the model must deliver and why it matters.",
            "e.g. Draft a launch brief that convinces regional sales leads to adopt the new pricing tier.",
            true,
            Some("Produce a clear, actionable result that achieves the following outcome: [describe the outcome]. Success means [describe how you will judge it]."),
        ),
        blueprint(
            "context",
            "Context",
            "Background the model needs: situation, history, stakeholders, and what has been tried.",
            "e.g. We launched in Q2, adoption stalled at 18%, and the sales team lacks a narrative.",
            true,
            Some("Background: [current situation]. Key stakeholders: [who is involved]. What has been tried so far: [previous attempts and results]."),
        ),
        blueprint(
            "inputs",
            "Inputs & Resources",
            "Data, documents, or examples the model should draw on.",
            "Paste excerpts, metrics, links, or reference material.",
            false,
            None,
        ),
        blueprint(
            "constraints",
            "Constraints",
            "Hard limits on scope, length, style, compliance, or resources.",
            "e.g. Stay under 600 words, avoid discount language, comply with brand voice.",
            true,
            Some("Stay within these limits: [length or format limit], [compliance or policy rules], [topics to avoid]."),
        ),
        blueprint(
            "workflow",
            "Reasoning Workflow",
            "The steps the model should follow before producing its answer.",
            "e.g. 1) Summarize the inputs 2) Identify gaps 3) Propose options 4) Recommend one.",
            false,
            None,
        ),
        blueprint(
            "deliverables",
            "Deliverables",
            "Exactly what the response must contain and in what shape.",
            "e.g. A one-page brief with headline, three proof points, and a rollout checklist.",
            true,
            Some("Deliver: [primary artifact], including [required components], formatted as [structure]."),
        ),
        blueprint(
            "examples",
            "Examples",
            "Reference outputs that illustrate the expected quality bar.",
            "Share a strong example and note what makes it work.",
            false,
            None,
        ),
    ]
}

fn templates() -> Vec<Template> {
    vec![
        Template {
            id: "marketing-brief".into(),
            name: "Marketing Brief".into(),
            category: "Marketing".into(),
            description: "Position a product or launch for a specific segment with proof points and a clear call to action.".into(),
            persona: "Senior product marketing strategist with B2B SaaS launch experience".into(),
            tone: "Confident, persuasive, and data-informed".into(),
            guardrails: presets(&[0, 7], PRESET_GUARDRAILS),
            success_criteria: presets(&[1], PRESET_SUCCESS_CRITERIA),
            output_format: None,
            section_overrides: vec![
                relabel(
                    "objective",
                    Some("Campaign Objective"),
                    Some("The business result the campaign must drive and the audience it targets."),
                    None,
                ),
                relabel(
                    "inputs",
                    Some("Market Signals"),
                    None,
                    Some("Competitive notes, win/loss data, customer quotes, pricing."),
                ),
            ],
        },
        Template {
            id: "code-review".into(),
            name: "Code Review".into(),
            category: "Engineering".into(),
            description: "Review a change for correctness, security, and maintainability with actionable patches.".into(),
            persona: "Staff software engineer conducting a rigorous code review".into(),
            tone: "Direct, precise, and constructive".into(),
            guardrails: presets(&[0, 4, 6], PRESET_GUARDRAILS),
            success_criteria: presets(&[0, 2], PRESET_SUCCESS_CRITERIA),
            output_format: Some("Numbered findings grouped by severity (blocker, major, minor), each with a file/line reference and a suggested patch.".into()),
            section_overrides: vec![
                relabel(
                    "inputs",
                    Some("Code Under Review"),
                    Some("The diff or files to review, plus the language and framework versions."),
                    Some("Paste the diff or the relevant files."),
                ),
                relabel(
                    "examples",
                    Some("Team Conventions"),
                    Some("Style guides or prior review comments the reviewer should follow."),
                    None,
                ),
            ],
        },
        Template {
            id: "research-synthesis".into(),
            name: "Research Synthesis".into(),
            category: "Research".into(),
            description: "Condense sources into decision-ready findings with explicit confidence levels.".into(),
            persona: "Research analyst who turns primary sources into decision-ready insight".into(),
            tone: "Neutral, rigorous, and evidence-first".into(),
            guardrails: presets(&[0, 3], PRESET_GUARDRAILS),
            success_criteria: Vec::new(),
            output_format: Some("Executive summary, key findings with confidence levels, evidence table, and open questions.".into()),
            section_overrides: vec![relabel(
                "inputs",
                Some("Sources"),
                Some("Studies, interviews, datasets, or articles to synthesize."),
                None,
            )],
        },
        Template {
            id: "customer-support".into(),
            name: "Customer Support Reply".into(),
            category: "Operations".into(),
            description: "Resolve a customer issue with empathy, accurate steps, and a clear next action.".into(),
            persona: "Empathetic senior support specialist".into(),
            tone: "Warm, clear, and solution-oriented".into(),
            guardrails: presets(&[2, 5], PRESET_GUARDRAILS),
            success_criteria: presets(&[4], PRESET_SUCCESS_CRITERIA),
            output_format: Some("Short greeting, numbered resolution steps, and a closing line inviting follow-up.".into()),
            section_overrides: vec![relabel(
                "context",
                Some("Customer Situation"),
                Some("What the customer reported, their plan or account tier, and prior contacts."),
                None,
            )],
        },
        Template {
            id: "creative-concepting".into(),
            name: "Creative Concepting".into(),
            category: "Creative".into(),
            description: "Generate divergent campaign or product concepts and narrow them to the strongest few.".into(),
            persona: "Award-winning creative director who thrives on unexpected ideas".into(),
            tone: "Playful, bold, and imaginative".into(),
            guardrails: presets(&[7], PRESET_GUARDRAILS),
            success_criteria: Vec::new(),
            output_format: None,
            section_overrides: Vec::new(),
        },
    ]
}

pub(super) fn catalog() -> Catalog {
    Catalog {
        blueprints: blueprints(),
        templates: templates(),
        preset_guardrails: PRESET_GUARDRAILS.iter().map(|s| s.to_string()).collect(),
        preset_success_criteria: PRESET_SUCCESS_CRITERIA
            .iter()
            .map(|s| s.to_string())
            .collect(),
        default_audience: DEFAULT_AUDIENCE.to_string(),
        default_response_format: DEFAULT_RESPONSE_FORMAT.to_string(),
    }
}
