//! Client for Telemetry/Cache (spec §2, §6). The sink itself is out of
//! scope; this is the HTTP contract the gateway and satellite services call.

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::http_client::ServiceClient;

#[derive(Clone, Serialize)]
pub struct LogRequest<'a> {
    pub event: &'a str,
    pub payload: &'a serde_json::Value,
}

#[derive(Clone, Deserialize)]
pub struct LogResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub event_id: String,
    #[serde(default)]
    pub redacted_fields: Vec<String>,
}

#[derive(Clone, Deserialize)]
pub struct CacheGetResponse {
    pub data: Option<serde_json::Value>,
}

#[derive(Clone, Serialize)]
pub struct CacheSetRequest<'a> {
    pub key: &'a str,
    pub data: &'a serde_json::Value,
    pub ttl: u64,
}

pub struct TelemetryClient {
    inner: ServiceClient,
}

impl TelemetryClient {
    pub fn new(inner: ServiceClient) -> Self {
        Self { inner }
    }

    /// Emits one structured event. Failures here are never surfaced to the
    /// caller's request path — telemetry is best-effort (spec §4.1: "each
    /// branch failure produces a null-safe default... no branch failure
    /// aborts the request").
    pub async fn log(&self, request_id: &str, event: &str, payload: &serde_json::Value) -> Result<LogResponse, ServiceError> {
        self.inner.post_json("/log", request_id, &LogRequest { event, payload }).await
    }

    pub async fn cache_get(&self, request_id: &str, key: &str) -> Result<CacheGetResponse, ServiceError> {
        let path = format!("/cache/get?key={key}");
        self.inner.get_json(&path, request_id).await
    }

    pub async fn cache_set(
        &self,
        request_id: &str,
        key: &str,
        data: &serde_json::Value,
        ttl: u64,
    ) -> Result<(), ServiceError> {
        let _: serde_json::Value = self
            .inner
            .post_json("/cache/set", request_id, &CacheSetRequest { key, data, ttl })
            .await?;
        Ok(())
    }
}
