use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::Request;
use feeling_engine::{build_router, AppState};
use tower::ServiceExt;

fn test_router() -> axum::Router {
    build_router(Arc::new(AppState))
}

#[tokio::test]
async fn augment_with_stakes_appends_suffix() {
    let router = test_router();
    let body = serde_json::json!({"system_prompt": "You are X.", "emotion_template_id": "stakes"});
    let request = Request::builder()
        .method("POST")
        .uri("/augment")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(parsed["template_id"], "stakes");
    assert!(parsed["system_prompt"].as_str().unwrap().starts_with("You are X.\n\n"));
}

#[tokio::test]
async fn augment_with_none_is_identity() {
    let router = test_router();
    let body = serde_json::json!({"system_prompt": "You are X.", "emotion_template_id": "none"});
    let request = Request::builder()
        .method("POST")
        .uri("/augment")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(parsed["system_prompt"], "You are X.");
}

#[tokio::test]
async fn analyze_then_tone_round_trip() {
    let router = test_router();
    let body = serde_json::json!({"text": "I'm terrified and need help immediately"});
    let request = Request::builder()
        .method("POST")
        .uri("/affect/analyze")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let affect: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(affect["urgency"], "high");

    let tone_body = serde_json::json!({"affect": affect});
    let request = Request::builder()
        .method("POST")
        .uri("/affect/tone")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&tone_body).unwrap()))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(parsed["tone_policies"].as_array().unwrap().iter().any(|p| p.as_str().unwrap().contains("direct")));
}
