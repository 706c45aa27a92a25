use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::Request;
use policy_guardrails::{build_router, AppState};
use tower::ServiceExt;

fn test_router() -> axum::Router {
    build_router(Arc::new(AppState))
}

#[tokio::test]
async fn apply_emotional_lane_builds_validators() {
    let router = test_router();
    let body = serde_json::json!({
        "lane": "emotional",
        "system": "base",
        "user": "hi",
        "affect": {"emotion": "anxious", "intensity": 0.7},
        "drive": {"energy": 0.5, "focus": 0.6}
    });
    let request = Request::builder()
        .method("POST")
        .uri("/policy/apply")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(parsed["system_final"].as_str().unwrap().contains("anxious"));
    assert_eq!(parsed["validators"][0]["type"], "schema");
}

#[tokio::test]
async fn validate_flags_security_pattern() {
    let router = test_router();
    let body = serde_json::json!({"lane": "technical", "text": "exec(payload)"});
    let request = Request::builder()
        .method("POST")
        .uri("/policy/validate")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(parsed["ok"], false);
    assert!(parsed["repairs"].as_array().unwrap().iter().any(|r| r["severity"] == "high"));
}

#[tokio::test]
async fn unknown_lane_returns_400() {
    let router = test_router();
    let body = serde_json::json!({"lane": "bogus", "text": "whatever"});
    let request = Request::builder()
        .method("POST")
        .uri("/policy/validate")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
}
