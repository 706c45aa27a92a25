//! Client for Policy Guardrails (spec §4.5, §6).

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::http_client::ServiceClient;

#[derive(Clone, Serialize)]
pub struct AffectInput<'a> {
    pub emotion: &'a str,
    pub intensity: f64,
}

#[derive(Clone, Serialize)]
pub struct DriveInput {
    pub energy: f64,
    pub focus: f64,
}

#[derive(Clone, Serialize)]
pub struct ApplyRequest<'a> {
    pub lane: &'a str,
    pub system: &'a str,
    pub user: &'a str,
    pub affect: AffectInput<'a>,
    pub drive: DriveInput,
}

/// One validator stashed in `PipelineContext` for the Post stage (spec §4.5:
/// "one schema validator + one pattern validator per filter regex").
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Validator {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub schema: Option<serde_json::Value>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Deserialize)]
pub struct ApplyResponse {
    pub system_final: String,
    #[serde(default)]
    pub validators: Vec<Validator>,
}

#[derive(Clone, Serialize)]
pub struct ValidateRequest<'a> {
    pub lane: &'a str,
    pub text: &'a str,
}

/// One structured repair suggestion (spec §4.5).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Repair {
    #[serde(rename = "type")]
    pub kind: String,
    pub issue: String,
    pub repair: String,
    pub severity: String,
}

#[derive(Clone, Deserialize)]
pub struct ValidateResponse {
    pub ok: bool,
    #[serde(default)]
    pub repairs: Vec<Repair>,
    #[serde(default)]
    pub repaired: Option<String>,
}

pub struct PolicyClient {
    inner: ServiceClient,
}

impl PolicyClient {
    pub fn new(inner: ServiceClient) -> Self {
        Self { inner }
    }

    pub async fn apply(&self, request_id: &str, request: &ApplyRequest<'_>) -> Result<ApplyResponse, ServiceError> {
        self.inner.post_json("/policy/apply", request_id, request).await
    }

    pub async fn validate(&self, request_id: &str, lane: &str, text: &str) -> Result<ValidateResponse, ServiceError> {
        self.inner.post_json("/policy/validate", request_id, &ValidateRequest { lane, text }).await
    }
}
