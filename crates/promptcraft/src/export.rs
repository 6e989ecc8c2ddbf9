//! Exportable draft snapshot.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalog::Template;
use crate::model::{BuilderOptions, Insight, PromptMetrics, SectionState, SynthesisResult};

/// Id, label, and value of one section; the seeding metadata is not exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExportedSection {
    pub id: String,
    pub label: String,
    pub value: String,
}

impl From<&SectionState> for ExportedSection {
    fn from(section: &SectionState) -> Self {
        Self {
            id: section.id.clone(),
            label: section.label.clone(),
            value: section.value.clone(),
        }
    }
}

/// JSON document written by the export action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PromptExport {
    pub template: Template,
    pub sections: Vec<ExportedSection>,
    pub configuration: BuilderOptions,
    pub generated_prompt: String,
    pub insights: Vec<Insight>,
    pub metrics: PromptMetrics,
    /// RFC 3339 timestamp supplied by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
}

impl PromptExport {
    pub fn new(
        template: &Template,
        sections: &[SectionState],
        options: &BuilderOptions,
        result: &SynthesisResult,
    ) -> Self {
        Self {
            template: template.clone(),
            sections: sections.iter().map(ExportedSection::from).collect(),
            configuration: options.clone(),
            generated_prompt: result.prompt.clone(),
            insights: result.insights.clone(),
            metrics: result.metrics,
            exported_at: None,
        }
    }

    pub fn with_exported_at(mut self, timestamp: impl Into<String>) -> Self {
        self.exported_at = Some(timestamp.into());
        self
    }

    /// Suggested file name, derived from the template name.
    pub fn file_name(&self) -> String {
        export_file_name(&self.template.name)
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("failed to serialize export: {e}"))
    }
}

/// `"Marketing Brief"` → `"marketing-brief-prompt.json"`.
pub fn export_file_name(template_name: &str) -> String {
    let stem = template_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    format!("{stem}-prompt.json")
}
