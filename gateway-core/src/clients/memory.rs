//! Client for the Memory Service (spec §4.7, §6).

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::http_client::ServiceClient;
use crate::memory::{Episode, Trait};

#[derive(Clone, Deserialize, Default)]
pub struct MemoryRetrieveResponse {
    #[serde(default)]
    pub traits: Vec<Trait>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

#[derive(Clone, Deserialize, Default)]
pub struct MemorySummaryResponse {
    #[serde(default)]
    pub summary: String,
}

#[derive(Clone, Serialize)]
pub struct MemoryCandidateRequest<'a> {
    pub user_id: &'a str,
    pub text: &'a str,
    pub tags: &'a [String],
    pub confidence: f64,
}

/// Wire shape per spec.md §8 scenario 6: `{success, traits_extracted,
/// episode_created, pii_filtered}`.
#[derive(Clone, Deserialize)]
pub struct MemoryCandidateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub traits_extracted: u32,
    #[serde(default)]
    pub episode_created: bool,
    #[serde(default)]
    pub pii_filtered: bool,
}

pub struct MemoryClient {
    inner: ServiceClient,
}

impl MemoryClient {
    pub fn new(inner: ServiceClient) -> Self {
        Self { inner }
    }

    /// `GET /mem/retrieve?user_id&intent&k` (spec §6). On any failure the
    /// Pre stage falls back to an empty snapshot per spec §4.1 step 4 — the
    /// caller is responsible for treating an `Err` as a null-safe default.
    pub async fn retrieve(
        &self,
        request_id: &str,
        user_id: &str,
        intent: &str,
        k: u32,
    ) -> Result<MemoryRetrieveResponse, ServiceError> {
        let path = format!("/mem/retrieve?user_id={user_id}&intent={intent}&k={k}");
        self.inner.get_json(&path, request_id).await
    }

    pub async fn summary(&self, request_id: &str, user_id: &str) -> Result<MemorySummaryResponse, ServiceError> {
        let path = format!("/mem/summary?user_id={user_id}");
        self.inner.get_json(&path, request_id).await
    }

    /// `POST /mem/candidates` (spec §4.1 Post step 1): fire-and-forget from
    /// the caller's perspective, but the HTTP call itself still observes its
    /// own timeout and error classification.
    pub async fn submit_candidate(
        &self,
        request_id: &str,
        user_id: &str,
        text: &str,
        tags: &[String],
        confidence: f64,
    ) -> Result<MemoryCandidateResponse, ServiceError> {
        self.inner
            .post_json(
                "/mem/candidates",
                request_id,
                &MemoryCandidateRequest { user_id, text, tags, confidence },
            )
            .await
    }
}
