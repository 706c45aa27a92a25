//! `POST /classify` and `POST /route` (spec §4.2, §6).
//!
//! The gateway's `IntentClient` DTOs (`gateway_core::clients::intent`) carry
//! borrowed `Serialize`-only request shapes and `Deserialize`-only response
//! shapes, since that client only ever sends the one and receives the
//! other. This service sits on the opposite side of the wire, so it defines
//! its own owned mirror types here rather than fighting that asymmetry.

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use gateway_core::{Family, IntentRecord, ProviderPreference};

use crate::classify::classify_family;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct ClassifyRequestBody {
    pub text: String,
    #[serde(default)]
    pub last_intent: Option<String>,
}

#[derive(Serialize)]
pub struct ClassifyResponseBody {
    pub intent: Family,
    pub confidence: f64,
    pub needs_remote: bool,
    pub processing_time_ms: u64,
    pub reasoning: Option<String>,
}

#[derive(Deserialize)]
pub struct RouteRequestBody {
    pub user_text: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct RouteResponseBody {
    pub family: Family,
    pub emotion_template_id: String,
    pub provider: ProviderPreference,
    pub openrouter_model_priority: Vec<String>,
    pub tags: Vec<String>,
}

pub async fn classify(
    State(_state): State<SharedState>,
    Json(req): Json<ClassifyRequestBody>,
) -> Json<ClassifyResponseBody> {
    let start = Instant::now();
    let family = classify_family(&req.text);
    Json(ClassifyResponseBody {
        intent: family,
        confidence: 0.9,
        needs_remote: family.needs_remote(),
        processing_time_ms: start.elapsed().as_millis() as u64,
        reasoning: None,
    })
}

pub async fn route(State(state): State<SharedState>, Json(req): Json<RouteRequestBody>) -> Json<RouteResponseBody> {
    let family = classify_family(&req.user_text);
    let opted_out_of_no_emotion = req.tags.as_ref().map(|t| t.iter().any(|tag| tag == "no_emotion_opt_out")).unwrap_or(false);
    let tags = IntentRecord::implied_tags(family, opted_out_of_no_emotion);

    Json(RouteResponseBody {
        family,
        emotion_template_id: family.emotion_template_id().to_string(),
        provider: family.provider_preference(false),
        openrouter_model_priority: state.model_priority_for(&family.to_string()),
        tags: tags.into_iter().collect(),
    })
}
