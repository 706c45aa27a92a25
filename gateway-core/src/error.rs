//! Error kinds surfaced at the gateway boundary (spec §7) plus the lower-level
//! errors that HTTP client calls and in-gateway components produce.

use thiserror::Error;

/// Error kind returned to the caller of `ProcessChat`. Maps 1:1 to the HTTP
/// status table in spec §7.
#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("rate limited")]
    RateLimited,
    #[error("pipeline timeout exceeded")]
    Timeout,
    #[error("upstream failure: {0}")]
    UpstreamFailure(String),
    #[error("no provider available")]
    NoProviderAvailable,
    #[error("internal error: {0}")]
    InternalError(String),
}

impl ErrorKind {
    /// HTTP status code for this error kind, per spec §7's table.
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::InvalidRequest(_) => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::RateLimited => 429,
            ErrorKind::Timeout => 504,
            ErrorKind::UpstreamFailure(_) => 502,
            ErrorKind::NoProviderAvailable => 503,
            ErrorKind::InternalError(_) => 500,
        }
    }
}

/// Error from an outbound call to a peer service (intent, memory, feeling,
/// drive, policy, tools, telemetry, or a model provider).
///
/// Enrichment-branch callers (Pre stage) recover from every variant locally;
/// only the provider/model-provider call path propagates this upward.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request to {service} timed out after {timeout_ms}ms")]
    Timeout { service: String, timeout_ms: u64 },
    #[error("request to {service} failed: {source}")]
    Transport {
        service: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{service} returned status {status}: {body}")]
    Status {
        service: String,
        status: u16,
        body: String,
    },
    #[error("failed to decode response from {service}: {source}")]
    Decode {
        service: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ServiceError {
    /// True when the underlying status is in the retryable set from spec §4.3:
    /// {402, 408, 409, 429, 500, 502, 503, 504} or a network/transport error.
    pub fn is_retryable(&self) -> bool {
        match self {
            ServiceError::Timeout { .. } | ServiceError::Transport { .. } => true,
            ServiceError::Status { status, .. } => matches!(
                status,
                402 | 408 | 409 | 429 | 500 | 502 | 503 | 504
            ),
            ServiceError::Decode { .. } => false,
        }
    }
}

/// Errors raised while executing one tool-call loop iteration.
#[derive(Debug, Error)]
pub enum ToolLoopError {
    #[error("model provider call failed: {0}")]
    Provider(#[from] ServiceError),
}
