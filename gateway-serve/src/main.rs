//! Gateway Orchestrator binary: loads configuration, wires [`AppState`], and
//! serves the axum router (spec §6).

use std::path::PathBuf;
use std::sync::Arc;

use gateway_config::{ServiceMap, Settings};
use gateway_serve::{build_router, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(err) = gateway_config::load_and_apply("gateway", None) {
        tracing::warn!(error = %err, "config load_and_apply failed, continuing with process env");
    }

    let services_path = std::env::var("SERVICES_JSON")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("services.json"));
    let services = ServiceMap::load(&services_path)
        .unwrap_or_else(|err| panic!("failed to load {}: {err}", services_path.display()));

    let settings = Settings::from_env();
    let state = Arc::new(AppState::new(settings, &services));

    if state.settings.tuning.task_worker_enabled {
        tracing::info!("task worker enabled, spawning queue drain loop");
        tokio::spawn(gateway_serve::worker::run(state.clone()));
    }

    let addr = std::env::var("GATEWAY_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap_or_else(|err| panic!("bind {addr}: {err}"));
    tracing::info!(%addr, "gateway-serve listening");

    let router = build_router(state);
    axum::serve(listener, router).await.unwrap_or_else(|err| panic!("server error: {err}"));
}
