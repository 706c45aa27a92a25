use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::Request;
use gateway_config::{ServiceMap, Settings};
use gateway_serve::{build_router, AppState};
use tower::ServiceExt;

const SERVICE_NAMES: &[&str] = &[
    "intent-router",
    "memory-service",
    "feeling-engine",
    "drive-engine",
    "tool-hub",
    "policy-guardrails",
    "telemetry",
    "model-provider-local",
    "model-provider-remote",
];

fn test_router() -> axum::Router {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("services.json");
    let body: serde_json::Map<String, serde_json::Value> = SERVICE_NAMES
        .iter()
        .map(|name| (name.to_string(), serde_json::Value::String("http://127.0.0.1:1".to_string())))
        .collect();
    std::fs::write(&path, serde_json::to_string(&body).unwrap()).unwrap();

    let services = ServiceMap::load(&path).unwrap();
    let settings = Settings::from_env();
    let state = Arc::new(AppState::new(settings, &services));
    build_router(state)
}

#[tokio::test]
async fn health_reports_ok_status() {
    let router = test_router();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(parsed["status"], "ok");
    assert_eq!(parsed["metrics"]["requests_total"], 0);
}

#[tokio::test]
async fn models_lists_configured_slugs_deduped() {
    let router = test_router();
    let request = Request::builder().uri("/v1/models").body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(parsed["object"], "list");
    assert!(!parsed["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn chat_completions_rejects_empty_messages() {
    let router = test_router();
    let body = serde_json::json!({"messages": []});
    let request = Request::builder()
        .method("POST")
        .uri("/v1/chat/completions")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
}
