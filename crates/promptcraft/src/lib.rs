//! Deterministic prompt synthesis and scoring.
//!
//! `promptcraft` turns a structured prompt draft (sections such as objective,
//! context, and constraints, plus options such as persona, tone, guardrails,
//! and success criteria) into:
//!
//! - the assembled prompt text,
//! - a five-dimension quality score with an overall weighted average,
//! - severity-ranked insights about weaknesses in the draft,
//! - auto-apply text improvements aimed at individual sections,
//! - the draft's most frequent distinctive keywords.
//!
//! Everything is a pure function of the caller's snapshot: no I/O, no clock,
//! no randomness. The same draft always yields the same result, so the
//! engine can be re-run on every keystroke.
//!
//! # Getting started
//!
//! ```
//! use promptcraft::prelude::*;
//!
//! let synth = Synthesizer::new(Catalog::builtin(), ScoringConfig::default());
//! let mut draft = Draft::new(synth.catalog(), Some("code-review"))?;
//! draft.set_section_value("objective", "Review the retry logic in the payments client.");
//!
//! let result = synth.synthesize(&draft.sections, &draft.options);
//! assert!(result.prompt.contains("## Objective"));
//! assert!(result.has_critical()); // context, constraints, deliverables are still empty
//!
//! // Apply the first suggested improvement.
//! if let Some(improvement) = result.improvements.first() {
//!     draft.apply_improvement(improvement);
//! }
//! # Ok::<(), String>(())
//! ```
//!
//! # Where to find things
//!
//! - **Blueprints, templates, presets:** [`catalog::Catalog`], compiled in or
//!   loaded from JSON.
//! - **Scoring thresholds and weights:** [`config::ScoringConfig`].
//! - **Draft state transitions** (template switching, custom sections,
//!   applying improvements, guardrail selection): [`draft::Draft`].
//! - **The pipeline stages:** [`engine`] and its submodules; the single entry
//!   point is [`engine::Synthesizer::synthesize`].
//! - **Export documents:** [`export::PromptExport`].

pub mod catalog;
pub mod config;
pub mod draft;
pub mod engine;
pub mod export;
pub mod model;
pub mod prelude;

pub use catalog::Catalog;
pub use config::ScoringConfig;
pub use draft::Draft;
pub use engine::Synthesizer;
pub use model::{BuilderOptions, SectionState, SynthesisResult};

use schemars::JsonSchema;

/// Generate a JSON Schema for a type.
///
/// Used to validate catalog files before parsing and by the `schema`
/// subcommand to publish the wire formats.
///
/// ```
/// use promptcraft::json_schema_for;
/// use promptcraft::model::SectionState;
///
/// let schema = json_schema_for::<SectionState>();
/// assert_eq!(schema["type"], "object");
/// assert!(schema["required"].as_array().unwrap().contains(&"id".into()));
/// ```
pub fn json_schema_for<T: JsonSchema>() -> serde_json::Value {
    let schema = schemars::schema_for!(T);
    serde_json::to_value(schema)
        .unwrap_or_else(|_| serde_json::json!({"type": "object", "properties": {}}))
}
