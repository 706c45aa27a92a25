//! `POST /tasks/enqueue` and `GET /tasks/dlq` (spec §6 "Task queue").

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gateway_core::{DeadLetter, Task};

use crate::handlers::{error_response, ErrorBody};
use crate::state::SharedState;
use gateway_core::ErrorKind;

#[derive(Deserialize)]
pub struct EnqueueRequest {
    #[serde(default)]
    pub payload: HashMap<String, serde_json::Value>,
}

#[derive(Serialize)]
pub struct EnqueueResponse {
    pub task_id: String,
}

fn now_unix() -> i64 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs() as i64
}

pub async fn enqueue(
    State(state): State<SharedState>,
    Json(body): Json<EnqueueRequest>,
) -> Json<EnqueueResponse> {
    let task_id = Uuid::new_v4().to_string();
    let task = Task::new(task_id.clone(), body.payload, now_unix());
    state.task_queue.enqueue(task);
    Json(EnqueueResponse { task_id })
}

#[derive(Deserialize)]
pub struct DlqQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct DlqResponse {
    pub entries: Vec<DeadLetter>,
}

pub async fn dlq(
    State(state): State<SharedState>,
    Query(query): Query<DlqQuery>,
) -> Result<Json<DlqResponse>, (StatusCode, Json<ErrorBody>)> {
    let limit = query.limit.unwrap_or(50);
    if limit == 0 {
        return Err(error_response(ErrorKind::InvalidRequest("limit must be > 0".into())));
    }
    Ok(Json(DlqResponse { entries: state.task_queue.dlq(limit) }))
}
