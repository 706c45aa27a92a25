//! Route table wiring every inbound endpoint from spec §6 to its handler.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{chat, health, models, tasks, tools};
use crate::state::SharedState;

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/v1/chat/completions", post(chat::chat_completions))
        .route("/v1/chat/completions/stream", post(chat::chat_completions_stream))
        .route("/v1/models", get(models::list_models))
        .route("/v1/tools", get(tools::list_tools))
        .route("/health", get(health::health))
        .route("/metrics", get(health::metrics))
        .route("/tasks/enqueue", post(tasks::enqueue))
        .route("/tasks/dlq", get(tasks::dlq))
        .with_state(state)
}
