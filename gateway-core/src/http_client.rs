//! Thin reqwest wrapper shared by every service client in `clients/`:
//! applies the per-call timeout, propagates `X-Request-Id` for tracing
//! correlation, and optionally signs the body per spec §5.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::ServiceError;
use crate::hmac_sign;

/// Shared client handle for one downstream service (spec §4.1's "microservice
/// client" pattern): base URL, timeout, and an optional shared-secret for
/// HMAC signing of internal calls.
#[derive(Clone)]
pub struct ServiceClient {
    http: Client,
    base_url: String,
    service_name: &'static str,
    shared_secret: Option<String>,
}

impl ServiceClient {
    pub fn new(service_name: &'static str, base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client with valid TLS config");
        Self {
            http,
            base_url: base_url.into(),
            service_name,
            shared_secret: None,
        }
    }

    pub fn with_shared_secret(mut self, secret: impl Into<String>) -> Self {
        self.shared_secret = Some(secret.into());
        self
    }

    /// Raw reqwest client, for callers that need a request shape `post_json`
    /// doesn't cover (e.g. the provider client's SSE streaming requests).
    pub fn raw(&self) -> &Client {
        &self.http
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn service_name(&self) -> &'static str {
        self.service_name
    }

    /// POSTs `body` as JSON to `path` (joined onto the base URL), attaching
    /// `X-Request-Id` and, when a shared secret is configured, `X-Signature`.
    /// Deserializes the response body as `R` on success.
    pub async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        request_id: &str,
        body: &B,
    ) -> Result<R, ServiceError> {
        let url = format!("{}{}", self.base_url, path);
        let payload = serde_json::to_vec(body).map_err(|source| ServiceError::Decode {
            service: self.service_name.to_string(),
            source,
        })?;

        let mut req = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .header("X-Request-Id", request_id)
            .body(payload.clone());

        if let Some(secret) = &self.shared_secret {
            match hmac_sign::sign(secret, &payload) {
                Ok(sig) => req = req.header(hmac_sign::SIGNATURE_HEADER, sig),
                Err(_) => warn!(service = self.service_name, "failed to sign outbound request"),
            }
        }

        debug!(service = self.service_name, %url, %request_id, "dispatching request");

        let response = req
            .send()
            .await
            .map_err(|source| classify_transport_error(self.service_name, source))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                service: self.service_name.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<R>()
            .await
            .map_err(|source| classify_transport_error(self.service_name, source))
    }

    pub async fn get_json<R: DeserializeOwned>(&self, path: &str, request_id: &str) -> Result<R, ServiceError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .header("X-Request-Id", request_id)
            .send()
            .await
            .map_err(|source| classify_transport_error(self.service_name, source))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                service: self.service_name.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<R>()
            .await
            .map_err(|source| classify_transport_error(self.service_name, source))
    }
}

fn classify_transport_error(service: &'static str, source: reqwest::Error) -> ServiceError {
    if source.is_timeout() {
        ServiceError::Timeout {
            service: service.to_string(),
            timeout_ms: 0,
        }
    } else {
        ServiceError::Transport {
            service: service.to_string(),
            source,
        }
    }
}
