//! `GET /v1/models` (spec §6: `{object:"list", data:[{id, object:"model"}]}`).

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::SharedState;

#[derive(Serialize)]
pub struct ModelEntry {
    pub id: String,
    pub object: &'static str,
}

#[derive(Serialize)]
pub struct ModelsResponse {
    pub object: &'static str,
    pub data: Vec<ModelEntry>,
}

pub async fn list_models(State(state): State<SharedState>) -> Json<ModelsResponse> {
    let slugs = [
        &state.models.default_local,
        &state.models.vision,
        &state.models.explicit,
        &state.models.coder,
        &state.models.toolcall,
    ];
    let mut seen = std::collections::HashSet::new();
    let data = slugs
        .into_iter()
        .filter(|slug| seen.insert((*slug).clone()))
        .map(|slug| ModelEntry { id: slug.clone(), object: "model" })
        .collect();

    Json(ModelsResponse { object: "list", data })
}
