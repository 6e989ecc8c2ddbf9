//! Synthesis output: metrics, insights, improvements.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How urgently an insight should be addressed.
///
/// Variant order is the display order: `Critical < Warning < Info`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finding about a weakness in the current draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub id: String,
    pub severity: Severity,
    pub title: String,
    pub detail: String,
    /// Replacement or starter text the caller may offer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_section_id: Option<String>,
}

/// A text snippet the caller can append to one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Improvement {
    pub id: String,
    pub target_section_id: String,
    /// Short label for a UI control.
    pub title: String,
    pub snippet: String,
}

/// Per-dimension quality scores, each in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromptMetrics {
    pub clarity: f64,
    pub structure: f64,
    pub specificity: f64,
    pub guardrails: f64,
    pub creativity: f64,
    pub overall: f64,
    pub word_count: usize,
    pub estimated_tokens: usize,
}

impl PromptMetrics {
    /// `(label, score)` pairs for the five scored dimensions, in display order.
    pub fn dimensions(&self) -> [(&'static str, f64); 5] {
        [
            ("Clarity", self.clarity),
            ("Structure", self.structure),
            ("Specificity", self.specificity),
            ("Guardrails", self.guardrails),
            ("Creativity", self.creativity),
        ]
    }
}

/// Everything one synthesis call produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisResult {
    pub prompt: String,
    pub metrics: PromptMetrics,
    pub insights: Vec<Insight>,
    pub improvements: Vec<Improvement>,
    pub keywords: Vec<String>,
}

impl SynthesisResult {
    /// Improvements aimed at one section, in generation order.
    pub fn improvements_for<'a>(
        &'a self,
        section_id: &'a str,
    ) -> impl Iterator<Item = &'a Improvement> + 'a {
        self.improvements
            .iter()
            .filter(move |i| i.target_section_id == section_id)
    }

    pub fn has_critical(&self) -> bool {
        self.insights
            .iter()
            .any(|i| i.severity == Severity::Critical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_critical_first() {
        let mut severities = vec![Severity::Info, Severity::Critical, Severity::Warning];
        severities.sort();
        assert_eq!(
            severities,
            vec![Severity::Critical, Severity::Warning, Severity::Info]
        );
    }

    #[test]
    fn insight_serializes_camel_case_and_skips_empty_options() {
        let insight = Insight {
            id: "missing-objective".into(),
            severity: Severity::Critical,
            title: "Objective is empty".into(),
            detail: "Fill it in.".into(),
            suggestion: None,
            target_section_id: Some("objective".into()),
        };
        let json = serde_json::to_value(&insight).unwrap();
        assert_eq!(json["severity"], "critical");
        assert_eq!(json["targetSectionId"], "objective");
        assert!(json.get("suggestion").is_none());
    }
}
