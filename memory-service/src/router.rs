use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::SharedState;

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/mem/retrieve", get(handlers::retrieve))
        .route("/mem/summary", get(handlers::summary))
        .route("/mem/candidates", post(handlers::candidates))
        .layer(middleware::from_fn(gateway_core::hmac_sign::verify_request))
        .with_state(state)
}
