use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::Request;
use drive_engine::{build_router, AppState};
use tower::ServiceExt;

fn test_router() -> (axum::Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("drive.db");
    let state = Arc::new(AppState::new(&db).unwrap());
    (build_router(state), dir)
}

#[tokio::test]
async fn get_returns_baseline_for_new_user() {
    let (router, _dir) = test_router();
    let request = Request::builder().method("GET").uri("/drive/get?user_id=u1").body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!((parsed["energy"].as_f64().unwrap() - 0.5).abs() < 0.05);
}

#[tokio::test]
async fn update_then_policy_reflects_energy_boost() {
    let (router, _dir) = test_router();

    let body = serde_json::json!({"delta": {"energy": 0.4}, "reason": "test boost"});
    let request = Request::builder()
        .method("POST")
        .uri("/drive/update?user_id=u1")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(parsed["energy"].as_f64().unwrap() >= 0.89);

    let request = Request::builder()
        .method("POST")
        .uri("/drive/policy?user_id=u1")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&serde_json::json!({})).unwrap()))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(parsed["energy_level"], "very_high");
}
