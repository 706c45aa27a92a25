//! Request handlers, one module per route group (spec §6).

pub mod chat;
pub mod health;
pub mod models;
pub mod tasks;
pub mod tools;

use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use gateway_core::ErrorKind;

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub kind: &'static str,
    pub message: String,
}

/// Reads `X-Request-Id` if present, else generates one (spec §5 "Correlation").
pub fn request_id_from_headers(headers: &HeaderMap) -> String {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

pub fn user_id_from_headers(headers: &HeaderMap) -> Option<String> {
    headers.get("x-user-id").and_then(|v| v.to_str().ok()).filter(|s| !s.is_empty()).map(str::to_string)
}

fn kind_name(kind: &ErrorKind) -> &'static str {
    match kind {
        ErrorKind::InvalidRequest(_) => "invalid_request",
        ErrorKind::Unauthorized => "unauthorized",
        ErrorKind::RateLimited => "rate_limited",
        ErrorKind::Timeout => "timeout",
        ErrorKind::UpstreamFailure(_) => "upstream_failure",
        ErrorKind::NoProviderAvailable => "no_provider_available",
        ErrorKind::InternalError(_) => "internal_error",
    }
}

/// Converts an [`ErrorKind`] into its HTTP status + JSON error body (spec §7).
pub fn error_response(kind: ErrorKind) -> (StatusCode, Json<ErrorBody>) {
    let status = StatusCode::from_u16(kind.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let message = kind.to_string();
    let body = Json(ErrorBody { error: ErrorDetail { kind: kind_name(&kind), message } });
    (status, body)
}
