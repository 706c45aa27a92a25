use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::SharedState;

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/drive/get", get(handlers::get))
        .route("/drive/update", post(handlers::update))
        .route("/drive/policy", post(handlers::policy))
        .layer(middleware::from_fn(gateway_core::hmac_sign::verify_request))
        .with_state(state)
}
