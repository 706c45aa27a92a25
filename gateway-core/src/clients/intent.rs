//! Client for the Intent Router service (spec §4.2, §6).

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ServiceError;
use crate::http_client::ServiceClient;
use crate::intent::{Family, IntentRecord, ProviderPreference};

#[derive(Clone, Serialize)]
pub struct ClassifyRequest<'a> {
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_intent: Option<&'a str>,
}

#[derive(Clone, Deserialize)]
pub struct ClassifyResponse {
    pub intent: Family,
    pub confidence: f64,
    pub needs_remote: bool,
    pub processing_time_ms: u64,
    #[serde(default)]
    pub reasoning: Option<String>,
}

#[derive(Clone, Serialize)]
pub struct RouteRequest<'a> {
    pub user_text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<&'a [String]>,
}

#[derive(Clone, Deserialize)]
pub struct RouteResponse {
    pub family: Family,
    pub emotion_template_id: String,
    pub provider: ProviderPreference,
    pub openrouter_model_priority: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Default per-call timeout for Intent Router calls (spec §4.1 step 1: "timeout ≤ 2s").
pub const CLASSIFY_TIMEOUT: Duration = Duration::from_secs(2);

pub struct IntentClient {
    inner: ServiceClient,
}

impl IntentClient {
    pub fn new(inner: ServiceClient) -> Self {
        Self { inner }
    }

    pub async fn classify(&self, request_id: &str, text: &str) -> Result<ClassifyResponse, ServiceError> {
        self.inner
            .post_json("/classify", request_id, &ClassifyRequest { text, last_intent: None })
            .await
    }

    pub async fn route(&self, request_id: &str, user_text: &str, tags: Option<&[String]>) -> Result<RouteResponse, ServiceError> {
        self.inner.post_json("/route", request_id, &RouteRequest { user_text, tags }).await
    }
}

impl From<ClassifyResponse> for IntentRecord {
    /// Coarse fallback conversion used when only `/classify` ran (the richer
    /// `/route` response is preferred and used directly where available).
    fn from(r: ClassifyResponse) -> Self {
        let provider_preference = r.intent.provider_preference(r.needs_remote);
        IntentRecord {
            family: r.intent,
            needs_remote: r.needs_remote,
            emotion_template_id: r.intent.emotion_template_id().to_string(),
            provider_preference,
            suggested_model_priority: Vec::new(),
            tags: IntentRecord::implied_tags(r.intent, false),
        }
    }
}
