//! REST API endpoint handlers.
//!
//! Each handler is a pure function of the request body and the shared
//! [`Synthesizer`]; nothing is stored between requests.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use promptcraft::export::PromptExport;
use promptcraft::{BuilderOptions, Catalog, Draft, SectionState, SynthesisResult, Synthesizer};
use serde::{Deserialize, Serialize};
use tracing::debug;

type ApiError = (StatusCode, String);

/// Shared application state passed to all handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub synth: Arc<Synthesizer>,
}

/// GET /api/catalog — Blueprints, templates, and preset vocabularies.
pub async fn get_catalog(State(app): State<AppState>) -> Json<Catalog> {
    Json(app.synth.catalog().clone())
}

/// Request body for POST /api/seed.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeedRequest {
    /// Template to seed from. Defaults to the catalog's first template, or
    /// to `previous`'s template when that is given.
    pub template_id: Option<String>,
    /// Current draft. Its audience, creativity, temperature, guardrails, and
    /// success criteria carry over to the new template.
    pub previous: Option<Draft>,
}

/// POST /api/seed — Fresh draft for a template.
///
/// With `previous` and `templateId`, switches templates. With `previous`
/// only, resets the draft. Returns 404 for an unknown template.
pub async fn post_seed(
    State(app): State<AppState>,
    Json(body): Json<SeedRequest>,
) -> Result<Json<Draft>, ApiError> {
    let catalog = app.synth.catalog();
    let draft = match (body.previous, body.template_id) {
        (Some(mut draft), Some(id)) => draft.select_template(catalog, &id).map(|()| draft),
        (Some(mut draft), None) => draft.reset(catalog).map(|()| draft),
        (None, id) => Draft::new(catalog, id.as_deref()),
    }
    .map_err(|e| (StatusCode::NOT_FOUND, e))?;
    debug!("Seeded draft from {}", draft.template_id);
    Ok(Json(draft))
}

/// Request body for POST /api/synthesize.
#[derive(Debug, Serialize, Deserialize)]
pub struct SynthesizeRequest {
    pub sections: Vec<SectionState>,
    #[serde(default)]
    pub options: BuilderOptions,
}

/// POST /api/synthesize — Prompt, metrics, insights, improvements, keywords.
pub async fn post_synthesize(
    State(app): State<AppState>,
    Json(body): Json<SynthesizeRequest>,
) -> Json<SynthesisResult> {
    Json(app.synth.synthesize(&body.sections, &body.options))
}

/// Request body for POST /api/apply.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub draft: Draft,
    pub improvement_id: String,
}

/// Response body for POST /api/apply.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApplyResponse {
    pub draft: Draft,
    /// False when the target section already contained the snippet.
    pub applied: bool,
    /// Synthesis of the updated draft.
    pub result: SynthesisResult,
}

/// POST /api/apply — Apply one of the draft's current improvements.
///
/// The improvement is looked up in a fresh synthesis of the submitted
/// draft. Returns 404 when no improvement has that id.
pub async fn post_apply(
    State(app): State<AppState>,
    Json(body): Json<ApplyRequest>,
) -> Result<Json<ApplyResponse>, ApiError> {
    let mut draft = body.draft;
    let current = app.synth.synthesize(&draft.sections, &draft.options);
    let improvement = current
        .improvements
        .iter()
        .find(|i| i.id == body.improvement_id)
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                format!("no improvement '{}'", body.improvement_id),
            )
        })?;
    let applied = draft.apply_improvement(improvement);
    let result = app.synth.synthesize(&draft.sections, &draft.options);
    Ok(Json(ApplyResponse {
        draft,
        applied,
        result,
    }))
}

/// Request body for POST /api/export.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub draft: Draft,
    /// Timestamp to stamp on the document, supplied by the client.
    #[serde(default)]
    pub exported_at: Option<String>,
}

/// POST /api/export — Export document for the draft.
///
/// Returns 404 when the draft's template is not in the catalog.
pub async fn post_export(
    State(app): State<AppState>,
    Json(body): Json<ExportRequest>,
) -> Result<Json<PromptExport>, ApiError> {
    let draft = body.draft;
    let template = draft.template(app.synth.catalog()).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            format!("unknown template '{}'", draft.template_id),
        )
    })?;
    let result = app.synth.synthesize(&draft.sections, &draft.options);
    let mut export = PromptExport::new(template, &draft.sections, &draft.options, &result);
    export.exported_at = body.exported_at;
    Ok(Json(export))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_request_fields_are_optional() {
        let req: SeedRequest = serde_json::from_str("{}").unwrap();
        assert!(req.template_id.is_none());
        assert!(req.previous.is_none());

        let req: SeedRequest = serde_json::from_str(r#"{"templateId":"code-review"}"#).unwrap();
        assert_eq!(req.template_id.as_deref(), Some("code-review"));
    }

    #[test]
    fn synthesize_request_defaults_options() {
        let json = r#"{"sections":[{"id":"objective","label":"Objective","value":"Ship it"}]}"#;
        let req: SynthesizeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.sections[0].value, "Ship it");
        assert_eq!(req.options.creativity_level, 6);
    }

    #[test]
    fn apply_request_uses_camel_case() {
        let draft = Draft::new(&Catalog::builtin(), None).unwrap();
        let value = serde_json::json!({"draft": draft, "improvementId": "starter-context"});
        let req: ApplyRequest = serde_json::from_value(value).unwrap();
        assert_eq!(req.improvement_id, "starter-context");
    }
}
