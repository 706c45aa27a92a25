//! Client for the Feeling Engine (spec §4.6, §6).

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::http_client::ServiceClient;

#[derive(Clone, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub text: &'a str,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct AffectRecord {
    #[serde(default)]
    pub sentiment: String,
    #[serde(default)]
    pub emotions: Vec<String>,
    #[serde(default)]
    pub dialog_act: String,
    #[serde(default)]
    pub urgency: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub processing_time_ms: u64,
}

#[derive(Clone, Serialize)]
pub struct ToneRequest<'a> {
    pub affect: &'a AffectRecord,
}

#[derive(Clone, Deserialize, Default)]
pub struct ToneResponse {
    #[serde(default)]
    pub tone_policies: Vec<String>,
    #[serde(default)]
    pub primary_tone: String,
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Clone, Serialize)]
pub struct AugmentRequest<'a> {
    pub system_prompt: &'a str,
    pub emotion_template_id: &'a str,
}

#[derive(Clone, Deserialize)]
pub struct AugmentResponse {
    pub system_prompt: String,
}

#[derive(Clone, Serialize)]
pub struct CritiqueRequest<'a> {
    pub text: &'a str,
    pub max_tokens: usize,
}

#[derive(Clone, Deserialize, Default)]
pub struct CritiqueResponse {
    #[serde(default)]
    pub cleaned_text: String,
    #[serde(default)]
    pub original_tokens: usize,
    #[serde(default)]
    pub cleaned_tokens: usize,
    #[serde(default)]
    pub changes_made: Vec<String>,
}

pub struct FeelingClient {
    inner: ServiceClient,
}

impl FeelingClient {
    pub fn new(inner: ServiceClient) -> Self {
        Self { inner }
    }

    pub async fn analyze(&self, request_id: &str, text: &str) -> Result<AffectRecord, ServiceError> {
        self.inner.post_json("/affect/analyze", request_id, &AnalyzeRequest { text }).await
    }

    pub async fn tone(&self, request_id: &str, affect: &AffectRecord) -> Result<ToneResponse, ServiceError> {
        self.inner.post_json("/affect/tone", request_id, &ToneRequest { affect }).await
    }

    /// Appends the emotion template's suffix to `system_prompt` (spec §4.6:
    /// "appends the template's suffix, may be empty for `none`, separated by
    /// a blank line").
    pub async fn augment(
        &self,
        request_id: &str,
        system_prompt: &str,
        emotion_template_id: &str,
    ) -> Result<AugmentResponse, ServiceError> {
        self.inner
            .post_json("/augment", request_id, &AugmentRequest { system_prompt, emotion_template_id })
            .await
    }

    /// Cleans filler words and trims `text` to `max_tokens` (spec §4.6
    /// `critique`). Callers replace the draft with `cleaned_text` only when
    /// it is non-empty.
    pub async fn critique(&self, request_id: &str, text: &str, max_tokens: usize) -> Result<CritiqueResponse, ServiceError> {
        self.inner.post_json("/affect/critique", request_id, &CritiqueRequest { text, max_tokens }).await
    }
}
