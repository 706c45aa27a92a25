//! `/affect/analyze`, `/affect/tone`, `/affect/critique`, `/augment`,
//! `/templates` (spec §4.6, §6).

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use gateway_core::clients::feeling::AffectRecord;

use crate::state::SharedState;
use crate::{analyze, critique, templates, tone};

#[derive(Deserialize)]
pub struct AnalyzeRequestBody {
    pub text: String,
}

pub async fn affect_analyze(State(_state): State<SharedState>, Json(req): Json<AnalyzeRequestBody>) -> Json<AffectRecord> {
    Json(analyze::analyze(&req.text))
}

#[derive(Deserialize)]
pub struct ToneRequestBody {
    pub affect: AffectRecord,
}

#[derive(Serialize)]
pub struct ToneResponseBody {
    pub tone_policies: Vec<String>,
    pub primary_tone: String,
    pub confidence: f64,
}

pub async fn affect_tone(State(_state): State<SharedState>, Json(req): Json<ToneRequestBody>) -> Json<ToneResponseBody> {
    let policies = tone::generate_policies(&req.affect);
    Json(ToneResponseBody { tone_policies: policies.tone_policies, primary_tone: policies.primary_tone, confidence: policies.confidence })
}

#[derive(Deserialize)]
pub struct CritiqueRequestBody {
    pub text: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

fn default_max_tokens() -> usize {
    100
}

#[derive(Serialize)]
pub struct CritiqueResponseBody {
    pub cleaned_text: String,
    pub original_tokens: usize,
    pub cleaned_tokens: usize,
    pub changes_made: Vec<String>,
}

pub async fn affect_critique(State(_state): State<SharedState>, Json(req): Json<CritiqueRequestBody>) -> Json<CritiqueResponseBody> {
    let result = critique::critique(&req.text, req.max_tokens);
    Json(CritiqueResponseBody {
        cleaned_text: result.cleaned_text,
        original_tokens: result.original_tokens,
        cleaned_tokens: result.cleaned_tokens,
        changes_made: result.changes_made,
    })
}

#[derive(Deserialize)]
pub struct AugmentRequestBody {
    pub system_prompt: String,
    #[serde(default = "default_template_id")]
    pub emotion_template_id: String,
}

fn default_template_id() -> String {
    "none".to_string()
}

#[derive(Serialize)]
pub struct AugmentResponseBody {
    pub system_prompt: String,
    pub template_id: String,
    pub template_label: String,
}

pub async fn augment(State(_state): State<SharedState>, Json(req): Json<AugmentRequestBody>) -> Json<AugmentResponseBody> {
    let (system_prompt, template) = templates::apply_emotion_suffix(&req.system_prompt, &req.emotion_template_id);
    Json(AugmentResponseBody { system_prompt, template_id: template.id.to_string(), template_label: template.label.to_string() })
}

#[derive(Serialize)]
pub struct TemplateSummary {
    pub id: String,
    pub label: String,
}

#[derive(Serialize)]
pub struct TemplatesResponseBody {
    pub templates: Vec<TemplateSummary>,
    pub count: usize,
}

pub async fn list_templates(State(_state): State<SharedState>) -> Json<TemplatesResponseBody> {
    let templates = templates::TEMPLATES.iter().map(|t| TemplateSummary { id: t.id.to_string(), label: t.label.to_string() }).collect::<Vec<_>>();
    let count = templates.len();
    Json(TemplatesResponseBody { templates, count })
}
