use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::SharedState;

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/affect/analyze", post(handlers::affect_analyze))
        .route("/affect/tone", post(handlers::affect_tone))
        .route("/affect/critique", post(handlers::affect_critique))
        .route("/augment", post(handlers::augment))
        .route("/templates", get(handlers::list_templates))
        .layer(middleware::from_fn(gateway_core::hmac_sign::verify_request))
        .with_state(state)
}
