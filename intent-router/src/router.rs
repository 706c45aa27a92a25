use axum::middleware;
use axum::routing::post;
use axum::Router;

use crate::handlers::{classify, route};
use crate::state::SharedState;

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/classify", post(classify))
        .route("/route", post(route))
        .layer(middleware::from_fn(gateway_core::hmac_sign::verify_request))
        .with_state(state)
}
