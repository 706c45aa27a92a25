use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::Request;
use memory_service::{build_router, AppState};
use tower::ServiceExt;

fn test_router() -> (axum::Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("memory.db");
    let state = Arc::new(AppState::new(&db).unwrap());
    (build_router(state), dir)
}

#[tokio::test]
async fn candidates_then_retrieve_round_trip() {
    let (router, _dir) = test_router();

    let body = serde_json::json!({
        "user_id": "u1",
        "text": "My name is Priya and I live in Lisbon these days, this is plenty of content.",
        "tags": ["GENERAL_PRECISION"],
        "confidence": 0.9
    });
    let request = Request::builder()
        .method("POST")
        .uri("/mem/candidates")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(parsed["success"], true);
    assert!(parsed["traits_extracted"].as_u64().unwrap() >= 2);
    assert_eq!(parsed["episode_created"], true);
    assert_eq!(parsed["pii_filtered"], false);

    let request = Request::builder().method("GET").uri("/mem/retrieve?user_id=u1&intent=GENERAL_PRECISION&k=5").body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(parsed["traits"].as_array().unwrap().iter().any(|t| t["key"] == "name"));
    assert_eq!(parsed["episodes"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn low_confidence_text_persists_nothing() {
    let (router, _dir) = test_router();

    let body = serde_json::json!({
        "user_id": "u2",
        "text": "I like hiking and I dislike mornings",
        "tags": [],
        "confidence": 0.5
    });
    let request = Request::builder()
        .method("POST")
        .uri("/mem/candidates")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(parsed["success"], true);
    assert_eq!(parsed["traits_extracted"], 0);
    assert_eq!(parsed["episode_created"], false);
    assert_eq!(parsed["pii_filtered"], false);
}
