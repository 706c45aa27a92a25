//! Token-bucket rate limiter, per-user keyed by `X-User-Id` or `"global"`
//! (spec §4.1 "Rate limiting").

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

/// Atomic refill+consume against an in-process bucket map (spec §5:
/// "Rate-limit bucket: atomic script against shared store; no separate
/// locking" — here the shared store is a mutex-guarded map in one process).
pub struct RateLimiter {
    buckets: Mutex<HashMap<String, Bucket>>,
    rate_per_min: f64,
    burst: f64,
    bucket_ttl: Duration,
}

impl RateLimiter {
    pub fn new(rate_per_min: u32, burst: u32) -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            rate_per_min: rate_per_min as f64,
            burst: burst as f64,
            bucket_ttl: Duration::from_secs(120),
        }
    }

    /// Returns true iff a token was available and consumed.
    pub fn try_acquire(&self, key: &str) -> bool {
        let mut buckets = self.buckets.lock().expect("rate limiter mutex poisoned");
        let now = Instant::now();

        buckets.retain(|_, b| now.duration_since(b.last_refill) < self.bucket_ttl);

        let bucket = buckets.entry(key.to_string()).or_insert_with(|| Bucket { tokens: self.burst, last_refill: now });

        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        let refill = elapsed * (self.rate_per_min / 60.0);
        bucket.tokens = (bucket.tokens + refill).min(self.burst);
        bucket.last_refill = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

/// Resolves the rate-limit key from the request: `X-User-Id` header value,
/// or `"global"` when absent (spec §4.1).
pub fn rate_limit_key(user_id_header: Option<&str>) -> String {
    user_id_header.filter(|s| !s.is_empty()).unwrap_or("global").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_tokens_exhaust_then_refill() {
        let limiter = RateLimiter::new(60, 2);
        assert!(limiter.try_acquire("u1"));
        assert!(limiter.try_acquire("u1"));
        assert!(!limiter.try_acquire("u1"));
    }

    #[test]
    fn distinct_keys_have_independent_buckets() {
        let limiter = RateLimiter::new(60, 1);
        assert!(limiter.try_acquire("a"));
        assert!(limiter.try_acquire("b"));
    }

    #[test]
    fn missing_header_uses_global_key() {
        assert_eq!(rate_limit_key(None), "global");
        assert_eq!(rate_limit_key(Some("")), "global");
        assert_eq!(rate_limit_key(Some("u42")), "u42");
    }
}
