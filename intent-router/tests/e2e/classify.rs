use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use gateway_config::Settings;
use intent_router::{build_router, AppState};

fn test_router() -> axum::Router {
    let state = Arc::new(AppState::new(&Settings::from_env()));
    build_router(state)
}

#[tokio::test]
async fn classify_routes_coding_text_to_tech() {
    let router = test_router();
    let body = Body::from(serde_json::to_vec(&json!({ "text": "please debug this python function" })).unwrap());
    let request = Request::builder().method("POST").uri("/classify").header("content-type", "application/json").body(body).unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["intent"], "TECH");
    assert_eq!(value["needs_remote"], true);
}

#[tokio::test]
async fn route_tags_psychotherapy_text() {
    let router = test_router();
    let body = Body::from(serde_json::to_vec(&json!({ "user_text": "I feel anxious and can't stop panicking" })).unwrap());
    let request = Request::builder().method("POST").uri("/route").header("content-type", "application/json").body(body).unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["family"], "PSYCHOTHERAPY");
    assert!(value["tags"].as_array().unwrap().iter().any(|t| t == "psychotherapy"));
}
