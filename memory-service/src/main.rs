use std::sync::Arc;

use memory_service::{build_router, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(err) = gateway_config::load_and_apply("gateway", None) {
        tracing::warn!(error = %err, "config load_and_apply failed, continuing with process env");
    }

    let db_path = std::env::var("MEMORY_SERVICE_DB_PATH").unwrap_or_else(|_| "memory-service.db".to_string());
    let state = Arc::new(AppState::new(&db_path).unwrap_or_else(|err| panic!("open memory store at {db_path}: {err}")));

    let addr = std::env::var("MEMORY_SERVICE_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8102".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap_or_else(|err| panic!("bind {addr}: {err}"));
    tracing::info!(%addr, "memory-service listening");

    axum::serve(listener, build_router(state)).await.unwrap_or_else(|err| panic!("server error: {err}"));
}
