//! Typed view over the environment-variable-driven configuration named in
//! spec §6: provider credentials/model slugs, tuning knobs, and secrets.

use std::collections::HashMap;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub api_key: Option<String>,
    pub api_base: String,
    pub model_default: String,
    pub model_toolcall: String,
    pub model_vision: String,
    pub model_explicit: String,
    pub model_coder: String,
    /// Per-family remote-model priority lists (spec §6), keyed by family
    /// name (`TECH`, `LEGAL`, `PSYCHOTHERAPY`, ...), read from
    /// `MODEL_PRIORITY_<FAMILY>` as a comma-separated slug list.
    pub model_priority_by_family: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct TuningSettings {
    pub rate_limit_per_min: u32,
    pub rate_limit_burst: u32,
    pub pipeline_timeout: Duration,
    pub task_max_retries: u32,
    pub task_max_depth: u32,
    pub task_visibility_timeout: Duration,
    /// `max_tokens` passed to the critique call on the final draft (spec
    /// §4.1 Mid stage, §4.6 `critique`).
    pub critique_max_tokens: u32,
    /// Whether the background task-queue worker runs at all (spec §6
    /// `TASK_WORKER_ENABLED`). Off by default: most deployments enqueue jobs
    /// without wanting this process to also drain them.
    pub task_worker_enabled: bool,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub provider: ProviderSettings,
    pub tuning: TuningSettings,
    /// Shared secret for `X-SUITE-SIG` HMAC auth (spec §5). `None` disables signing.
    pub suite_shared_secret: Option<String>,
}

fn env_str(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn env_u32(key: &str, default: u32) -> u32 {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_bool(key: &str, default: bool) -> bool {
    env::var(key).ok().map(|v| v.eq_ignore_ascii_case("true")).unwrap_or(default)
}

const FAMILIES: &[&str] = &["PSYCHOTHERAPY", "REGULATED", "LEGAL", "TECH", "GENERAL_PRECISION", "OPEN_ENDED"];

fn load_model_priority_by_family() -> HashMap<String, Vec<String>> {
    FAMILIES
        .iter()
        .filter_map(|family| {
            let value = env::var(format!("MODEL_PRIORITY_{family}")).ok()?;
            let slugs: Vec<String> = value.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect();
            if slugs.is_empty() {
                None
            } else {
                Some((family.to_string(), slugs))
            }
        })
        .collect()
}

impl Settings {
    /// Reads every documented env var (spec §6), falling back to sane
    /// defaults so a fresh checkout runs against local/mock services.
    pub fn from_env() -> Self {
        Settings {
            provider: ProviderSettings {
                api_key: env_opt("OPENROUTER_API_KEY"),
                api_base: env_str("OPENROUTER_API_BASE", "https://openrouter.ai/api/v1"),
                model_default: env_str("OPENROUTER_MODEL_DEFAULT", "local/default"),
                model_toolcall: env_str("OPENROUTER_MODEL_TOOLCALL", "openrouter/toolcall-default"),
                model_vision: env_str("OPENROUTER_MODEL_VISION", "openrouter/vision-default"),
                model_explicit: env_str("OPENROUTER_MODEL_EXPLICIT", "openrouter/explicit-default"),
                model_coder: env_str("OPENROUTER_MODEL_CODER", "openrouter/coder-default"),
                model_priority_by_family: load_model_priority_by_family(),
            },
            tuning: TuningSettings {
                rate_limit_per_min: env_u32("RATE_LIMIT_PER_MIN", 60),
                rate_limit_burst: env_u32("RATE_LIMIT_BURST", 10),
                pipeline_timeout: Duration::from_secs(env_u32("PIPELINE_TIMEOUT_SECONDS", 0) as u64),
                task_max_retries: env_u32("TASK_MAX_RETRIES", 3),
                task_max_depth: env_u32("TASK_MAX_DEPTH", 5),
                task_visibility_timeout: Duration::from_secs(env_u32("TASK_VISIBILITY_TIMEOUT", 30) as u64),
                critique_max_tokens: env_u32("CRITIQUE_MAX_TOKENS", 512),
                task_worker_enabled: env_bool("TASK_WORKER_ENABLED", false),
            },
            suite_shared_secret: env_opt("SUITE_SHARED_SECRET"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_env_unset() {
        env::remove_var("RATE_LIMIT_PER_MIN");
        let settings = Settings::from_env();
        assert_eq!(settings.tuning.rate_limit_per_min, 60);
    }

    #[test]
    fn pipeline_timeout_zero_means_disabled() {
        env::remove_var("PIPELINE_TIMEOUT_SECONDS");
        let settings = Settings::from_env();
        assert_eq!(settings.tuning.pipeline_timeout, Duration::from_secs(0));
    }
}
