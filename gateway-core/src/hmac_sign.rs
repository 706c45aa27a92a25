//! Inter-service request signing (spec §5 "HMAC auth for inter-service").
//!
//! Every internal JSON POST between the gateway orchestrator and its
//! satellite services carries an `X-SUITE-SIG` header:
//! `hex(HMAC-SHA256(shared_secret, canonical_json_body))`. The receiving
//! service recomputes the digest over the raw body bytes it received and
//! rejects the call with `Unauthorized` on mismatch. GETs are unsigned.

use axum::body::Body;
use axum::extract::Request;
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Name of the header carrying the hex-encoded signature.
pub const SIGNATURE_HEADER: &str = "X-SUITE-SIG";

#[derive(thiserror::Error, Debug)]
pub enum SigningError {
    #[error("shared secret has invalid length for HMAC key")]
    InvalidKey,
}

/// Signs `body` with `shared_secret`, returning the lowercase hex digest.
pub fn sign(shared_secret: &str, body: &[u8]) -> Result<String, SigningError> {
    let mut mac = HmacSha256::new_from_slice(shared_secret.as_bytes()).map_err(|_| SigningError::InvalidKey)?;
    mac.update(body);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Verifies that `signature` (hex) is the correct HMAC-SHA256 digest of
/// `body` under `shared_secret`. Uses `Mac::verify_slice`, which compares in
/// constant time.
pub fn verify(shared_secret: &str, body: &[u8], signature: &str) -> bool {
    let Ok(mut mac) = HmacSha256::new_from_slice(shared_secret.as_bytes()) else {
        return false;
    };
    let Ok(expected) = hex::decode(signature) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

/// Axum middleware for satellite services: verifies `X-SUITE-SIG` on every
/// POST body against `SUITE_SHARED_SECRET` (spec §5 "receivers reject on
/// mismatch"). GETs pass through unsigned. Signing is disabled entirely
/// (request passes through unchecked) when the secret env var is unset or
/// empty, matching the sender's own opt-in behavior.
pub async fn verify_request(req: Request, next: Next) -> Result<Response, StatusCode> {
    if req.method() != Method::POST {
        return Ok(next.run(req).await);
    }

    let secret = match std::env::var("SUITE_SHARED_SECRET") {
        Ok(s) if !s.is_empty() => s,
        _ => return Ok(next.run(req).await),
    };

    let signature = req
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let (parts, body) = req.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.map_err(|_| StatusCode::BAD_REQUEST)?;

    if !verify(&secret, &bytes, &signature) {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let req = Request::from_parts(parts, Body::from(bytes));
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_then_verify_round_trips() {
        let secret = "suite-shared-secret";
        let body = br#"{"hello":"world"}"#;
        let sig = sign(secret, body).unwrap();
        assert!(verify(secret, body, &sig));
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let body = b"payload";
        let sig = sign("secret-a", body).unwrap();
        assert!(!verify("secret-b", body, &sig));
    }

    #[test]
    fn verify_rejects_tampered_body() {
        let secret = "secret";
        let sig = sign(secret, b"original").unwrap();
        assert!(!verify(secret, b"tampered", &sig));
    }

    #[test]
    fn verify_rejects_malformed_signature() {
        assert!(!verify("secret", b"body", "not-hex!!"));
    }
}
