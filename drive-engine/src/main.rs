use std::sync::Arc;

use drive_engine::{build_router, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(err) = gateway_config::load_and_apply("gateway", None) {
        tracing::warn!(error = %err, "config load_and_apply failed, continuing with process env");
    }

    let db_path = std::env::var("DRIVE_ENGINE_DB_PATH").unwrap_or_else(|_| "drive-engine.db".to_string());
    let state = Arc::new(AppState::new(&db_path).unwrap_or_else(|err| panic!("open drive store at {db_path}: {err}")));

    let addr = std::env::var("DRIVE_ENGINE_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8104".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap_or_else(|err| panic!("bind {addr}: {err}"));
    tracing::info!(%addr, "drive-engine listening");

    axum::serve(listener, build_router(state)).await.unwrap_or_else(|err| panic!("server error: {err}"));
}
