//! `/drive/get`, `/drive/update`, `/drive/policy` (spec §4.8, §6).

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::warn;

use gateway_core::{categorize, derive_focus, style_hints, DriveDelta, DriveVector, DrivePolicy};

use crate::engine;
use crate::state::SharedState;
use crate::store::now_unix;

#[derive(Deserialize)]
pub struct UserQuery {
    pub user_id: String,
}

/// Loads the stored vector, applies decay + bounded random walk for the
/// elapsed time since the last read, persists the result, and returns it
/// (spec §4.8: "On every read").
pub async fn get(State(state): State<SharedState>, Query(query): Query<UserQuery>) -> Json<DriveVector> {
    let (stored, last_timestamp) = match state.store.load(&query.user_id).await {
        Ok(found) => found,
        Err(err) => {
            warn!(%err, "drive store load failed, using baseline");
            (DriveVector::baseline(), now_unix())
        }
    };

    let now = now_unix();
    let delta_t = (now - last_timestamp).max(0) as f64;
    let updated = engine::apply_read(stored, delta_t);

    if let Err(err) = state.store.save(&query.user_id, updated, now).await {
        warn!(%err, "drive store save failed");
    }

    Json(updated)
}

#[derive(Deserialize)]
pub struct UpdateRequestBody {
    pub delta: DriveDelta,
    #[serde(default)]
    pub reason: String,
}

pub async fn update(State(state): State<SharedState>, Query(query): Query<UserQuery>, Json(req): Json<UpdateRequestBody>) -> Json<DriveVector> {
    let (stored, _last_timestamp) = match state.store.load(&query.user_id).await {
        Ok(found) => found,
        Err(err) => {
            warn!(%err, "drive store load failed, using baseline");
            (DriveVector::baseline(), now_unix())
        }
    };

    let updated = engine::apply_update(stored, &req.delta);
    let now = now_unix();
    if let Err(err) = state.store.save(&query.user_id, updated, now).await {
        warn!(%err, "drive store save failed");
    }

    tracing::info!(user_id = %query.user_id, reason = %req.reason, "drive state updated");
    Json(updated)
}

pub async fn policy(State(state): State<SharedState>, Query(query): Query<UserQuery>) -> Json<DrivePolicy> {
    let (vector, _last_timestamp) = match state.store.load(&query.user_id).await {
        Ok(found) => found,
        Err(err) => {
            warn!(%err, "drive store load failed, using baseline");
            (DriveVector::baseline(), now_unix())
        }
    };

    Json(DrivePolicy {
        energy_level: categorize(vector.energy),
        social_style: categorize(vector.sociability),
        curiosity_level: categorize(vector.curiosity),
        empathy_approach: categorize(vector.empathy_reserve),
        novelty_preference: categorize(vector.novelty_seek),
        focus: derive_focus(&vector),
        style_hints: style_hints(&vector),
    })
}
