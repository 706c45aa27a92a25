use axum::middleware;
use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::SharedState;

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/policy/apply", post(handlers::policy_apply))
        .route("/policy/validate", post(handlers::policy_validate))
        .layer(middleware::from_fn(gateway_core::hmac_sign::verify_request))
        .with_state(state)
}
