//! Client for an OpenAI-compatible model provider (spec §4.3, §6): one
//! client instance per provider (local or remote), chosen by the Routing
//! Policy and retried per its priority list.

use eventsource_stream::Eventsource;
use futures::StreamExt;
use tokio_stream::wrappers::ReceiverStream;

use crate::error::ServiceError;
use crate::http_client::ServiceClient;
use crate::openai_sse::{ChatCompletionChunk, ChatCompletionRequest, ChatCompletionResponse};

pub struct ProviderClient {
    inner: ServiceClient,
    api_key: Option<String>,
}

impl ProviderClient {
    pub fn new(inner: ServiceClient, api_key: Option<String>) -> Self {
        Self { inner, api_key }
    }

    pub async fn complete(&self, request_id: &str, request: &ChatCompletionRequest) -> Result<ChatCompletionResponse, ServiceError> {
        self.inner.post_json("/chat/completions", request_id, request).await
    }

    /// Streams a completion, returning a channel of parsed `data: <json>`
    /// chunks in arrival order (spec §5: "streaming deltas are emitted... in
    /// the order received from the provider; no reordering").
    pub async fn stream(
        &self,
        request_id: &str,
        request: &ChatCompletionRequest,
    ) -> Result<ReceiverStream<ChatCompletionChunk>, ServiceError> {
        let url = format!("{}/chat/completions", self.inner.base_url());
        let mut req = self
            .inner
            .raw()
            .post(&url)
            .header("Content-Type", "application/json")
            .header("X-Request-Id", request_id);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req
            .json(request)
            .send()
            .await
            .map_err(|source| classify(&self.inner, source))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                service: self.inner.service_name().to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let (tx, rx) = tokio::sync::mpsc::channel(64);
        let service_name = self.inner.service_name();
        let mut byte_stream = response.bytes_stream().eventsource();

        tokio::spawn(async move {
            while let Some(event) = byte_stream.next().await {
                let Ok(event) = event else { break };
                if event.data == "[DONE]" {
                    break;
                }
                match serde_json::from_str::<ChatCompletionChunk>(&event.data) {
                    Ok(chunk) => {
                        if tx.send(chunk).await.is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        tracing::warn!(service = service_name, %err, "failed to decode provider stream chunk");
                    }
                }
            }
        });

        Ok(ReceiverStream::new(rx))
    }
}

fn classify(client: &ServiceClient, source: reqwest::Error) -> ServiceError {
    if source.is_timeout() {
        ServiceError::Timeout {
            service: client.service_name().to_string(),
            timeout_ms: 0,
        }
    } else {
        ServiceError::Transport {
            service: client.service_name().to_string(),
            source,
        }
    }
}
