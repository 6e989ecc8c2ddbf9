//! Caller-owned authoring state and engine output types.
//!
//! [`SectionState`] and [`BuilderOptions`] are owned by the caller and only
//! ever borrowed by the engine. Everything in [`result`] is freshly allocated
//! per synthesis call.

pub mod ordered_set;
pub mod result;

pub use ordered_set::OrderedSet;
pub use result::{Improvement, Insight, PromptMetrics, Severity, SynthesisResult};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lowest accepted creativity level.
pub const MIN_CREATIVITY: i32 = 1;
/// Highest accepted creativity level.
pub const MAX_CREATIVITY: i32 = 10;

/// One authored dimension of the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SectionState {
    /// Blueprint id, or a slug derived from the label for custom sections.
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub placeholder: String,
    /// Free text authored by the user.
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl SectionState {
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }

    /// True when the value holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.value)
    }
}

/// Generation settings that accompany the sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct BuilderOptions {
    pub target_audience: String,
    pub response_format: String,
    /// 1–10; out-of-range values are clamped when read by the engine.
    pub creativity_level: i32,
    /// 0.0–1.0; out-of-range values are clamped when read by the engine.
    pub temperature: f64,
    pub tone: String,
    pub persona: String,
    #[schemars(with = "Vec<String>")]
    pub guardrails: OrderedSet,
    #[schemars(with = "Vec<String>")]
    pub success_criteria: OrderedSet,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            target_audience: String::new(),
            response_format: String::new(),
            creativity_level: 6,
            temperature: 0.6,
            tone: String::new(),
            persona: String::new(),
            guardrails: OrderedSet::new(),
            success_criteria: OrderedSet::new(),
        }
    }
}

impl BuilderOptions {
    /// Creativity level clamped to `1..=10`.
    pub fn creativity(&self) -> i32 {
        self.creativity_level.clamp(MIN_CREATIVITY, MAX_CREATIVITY)
    }

    /// Temperature clamped to `0.0..=1.0`. NaN reads as `0.0`.
    pub fn temperature(&self) -> f64 {
        if self.temperature.is_nan() {
            0.0
        } else {
            self.temperature.clamp(0.0, 1.0)
        }
    }

    /// Copy with both numeric settings pulled into range.
    pub fn clamped(&self) -> Self {
        Self {
            creativity_level: self.creativity(),
            temperature: self.temperature(),
            ..self.clone()
        }
    }
}

/// Number of whitespace-delimited tokens in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Total whitespace-delimited tokens across all section values.
pub fn total_word_count(sections: &[SectionState]) -> usize {
    sections.iter().map(SectionState::word_count).sum()
}
