//! `/policy/apply`, `/policy/validate` (spec §4.5, §6).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use gateway_core::clients::policy::{Repair, Validator};
use gateway_core::ErrorKind;

use crate::state::SharedState;
use crate::{apply, validate};

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub kind: &'static str,
    pub message: String,
}

fn invalid_request(message: impl Into<String>) -> (StatusCode, Json<ErrorBody>) {
    let kind = ErrorKind::InvalidRequest(message.into());
    let status = StatusCode::from_u16(kind.status_code()).unwrap_or(StatusCode::BAD_REQUEST);
    let message = kind.to_string();
    (status, Json(ErrorBody { error: ErrorDetail { kind: "invalid_request", message } }))
}

#[derive(Deserialize)]
pub struct AffectInputBody {
    pub emotion: String,
    pub intensity: f64,
}

#[derive(Deserialize)]
pub struct DriveInputBody {
    pub energy: f64,
    pub focus: f64,
}

#[derive(Deserialize)]
pub struct ApplyRequestBody {
    pub lane: String,
    #[serde(default)]
    pub system: String,
    #[serde(default)]
    pub user: String,
    pub affect: AffectInputBody,
    pub drive: DriveInputBody,
}

#[derive(Serialize)]
pub struct ApplyResponseBody {
    pub system_final: String,
    pub validators: Vec<Validator>,
}

pub async fn policy_apply(
    State(_state): State<SharedState>,
    Json(req): Json<ApplyRequestBody>,
) -> Result<Json<ApplyResponseBody>, (StatusCode, Json<ErrorBody>)> {
    let outcome = apply::apply(&req.lane, &req.affect.emotion, req.affect.intensity, req.drive.energy, req.drive.focus)
        .ok_or_else(|| invalid_request(format!("unknown lane: {}", req.lane)))?;
    Ok(Json(ApplyResponseBody { system_final: outcome.system_final, validators: outcome.validators }))
}

#[derive(Deserialize)]
pub struct ValidateRequestBody {
    pub lane: String,
    pub text: String,
}

#[derive(Serialize)]
pub struct ValidateResponseBody {
    pub ok: bool,
    pub repairs: Vec<Repair>,
}

pub async fn policy_validate(
    State(_state): State<SharedState>,
    Json(req): Json<ValidateRequestBody>,
) -> Result<Json<ValidateResponseBody>, (StatusCode, Json<ErrorBody>)> {
    let outcome = validate::validate(&req.lane, &req.text).ok_or_else(|| invalid_request(format!("unknown lane: {}", req.lane)))?;
    Ok(Json(ValidateResponseBody { ok: outcome.ok, repairs: outcome.repairs }))
}
