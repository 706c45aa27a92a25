use std::sync::Arc;

use feeling_engine::{build_router, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(err) = gateway_config::load_and_apply("gateway", None) {
        tracing::warn!(error = %err, "config load_and_apply failed, continuing with process env");
    }

    let state = Arc::new(AppState);

    let addr = std::env::var("FEELING_ENGINE_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8103".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap_or_else(|err| panic!("bind {addr}: {err}"));
    tracing::info!(%addr, "feeling-engine listening");

    axum::serve(listener, build_router(state)).await.unwrap_or_else(|err| panic!("server error: {err}"));
}
