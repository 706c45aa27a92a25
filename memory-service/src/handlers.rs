//! `GET /mem/retrieve`, `GET /mem/summary`, `POST /mem/candidates` (spec
//! §4.7, §6). Local owned DTOs mirror `gateway_core::clients::memory`'s
//! wire shapes; that client's response types are `Deserialize`-only (it
//! only ever receives them), so this service defines its own `Serialize`
//! counterparts here.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use gateway_core::pii::redact;
use gateway_core::{summarize_extractive, Episode, Trait, MIN_EPISODE_CONTENT_LEN, MIN_PERSIST_CONFIDENCE};

use crate::extract::extract_candidates;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct RetrieveQuery {
    pub user_id: String,
    #[serde(default)]
    pub intent: String,
    #[serde(default = "default_k")]
    pub k: u32,
}

fn default_k() -> u32 {
    5
}

#[derive(Serialize, Default)]
pub struct RetrieveResponseBody {
    pub traits: Vec<Trait>,
    pub episodes: Vec<Episode>,
}

pub async fn retrieve(State(state): State<SharedState>, Query(query): Query<RetrieveQuery>) -> Json<RetrieveResponseBody> {
    let traits = state.store.traits_for(&query.user_id).await.unwrap_or_else(|err| {
        warn!(%err, "traits_for failed");
        Vec::new()
    });
    let episodes = state.store.recent_episodes(&query.user_id, &query.intent, query.k).await.unwrap_or_else(|err| {
        warn!(%err, "recent_episodes failed");
        Vec::new()
    });
    Json(RetrieveResponseBody { traits, episodes })
}

#[derive(Deserialize)]
pub struct SummaryQuery {
    pub user_id: String,
}

#[derive(Serialize, Default)]
pub struct SummaryResponseBody {
    pub summary: String,
}

pub async fn summary(State(state): State<SharedState>, Query(query): Query<SummaryQuery>) -> Json<SummaryResponseBody> {
    let episodes = state.store.recent_episodes(&query.user_id, "", 10).await.unwrap_or_else(|err| {
        warn!(%err, "recent_episodes for summary failed");
        Vec::new()
    });
    if episodes.is_empty() {
        return Json(SummaryResponseBody::default());
    }
    let joined = episodes.iter().map(|e| e.summary.as_str()).collect::<Vec<_>>().join(" ");
    Json(SummaryResponseBody { summary: summarize_extractive(&joined) })
}

#[derive(Deserialize)]
pub struct CandidateRequestBody {
    pub user_id: String,
    pub text: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub confidence: f64,
}

/// Wire shape per spec.md §8 scenario 6: `{success, traits_extracted,
/// episode_created, pii_filtered}`.
#[derive(Serialize)]
pub struct CandidateResponseBody {
    pub success: bool,
    pub traits_extracted: u32,
    pub episode_created: bool,
    pub pii_filtered: bool,
}

pub async fn candidates(State(state): State<SharedState>, Json(req): Json<CandidateRequestBody>) -> Json<CandidateResponseBody> {
    let (redacted_text, pii_classes) = redact(&req.text);
    let pii_filtered = !pii_classes.is_empty();

    let mut traits_extracted = 0u32;
    for candidate in extract_candidates(&redacted_text) {
        if candidate.confidence < MIN_PERSIST_CONFIDENCE {
            continue;
        }
        if let Err(err) = state.store.upsert_trait(&req.user_id, candidate.key, &candidate.value, candidate.confidence).await {
            warn!(%err, key = candidate.key, "trait upsert failed");
            continue;
        }
        traits_extracted += 1;
    }

    let mut episode_created = false;
    if req.confidence >= MIN_PERSIST_CONFIDENCE && redacted_text.len() >= MIN_EPISODE_CONTENT_LEN {
        let episode = Episode {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: req.user_id.clone(),
            content: redacted_text.clone(),
            summary: summarize_extractive(&redacted_text),
            confidence: req.confidence,
            tags: req.tags.clone(),
            created_at: chrono::Utc::now().timestamp(),
        };
        match state.store.insert_episode(episode).await {
            Ok(()) => episode_created = true,
            Err(err) => warn!(%err, "episode insert failed"),
        }
    }

    Json(CandidateResponseBody { success: true, traits_extracted, episode_created, pii_filtered })
}
