//! Client for the Tool Hub (spec §4.4 "Tool Hub `exec(name, arguments)`", §6).

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::http_client::ServiceClient;

/// One OpenAI-schema-style function definition as returned by `GET /tools`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub parameters: serde_json::Value,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ToolListResponse {
    #[serde(default)]
    pub tools: Vec<ToolSpec>,
}

#[derive(Clone, Serialize)]
pub struct ToolExecRequest<'a> {
    pub name: &'a str,
    pub arguments: &'a serde_json::Value,
}

#[derive(Clone, Deserialize)]
pub struct ToolExecResponse {
    pub success: bool,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

pub struct ToolsClient {
    inner: ServiceClient,
}

impl ToolsClient {
    pub fn new(inner: ServiceClient) -> Self {
        Self { inner }
    }

    /// `GET /tools`. On failure the Mid stage proceeds with an empty tool
    /// schema (spec §4.1 Mid: "on failure, tools = []").
    pub async fn list(&self, request_id: &str) -> Result<ToolListResponse, ServiceError> {
        self.inner.get_json("/tools", request_id).await
    }

    pub async fn exec(
        &self,
        request_id: &str,
        name: &str,
        arguments: &serde_json::Value,
    ) -> Result<ToolExecResponse, ServiceError> {
        self.inner.post_json("/tools/exec", request_id, &ToolExecRequest { name, arguments }).await
    }
}
