//! Process-wide dependency struct (spec §9 "Global mutable state": "model
//! them as an explicit dependency struct passed at request-handler
//! construction rather than ambient singletons").

use std::sync::Arc;
use std::time::Duration;

use gateway_config::{ServiceMap, Settings};
use gateway_core::clients::{
    DriveClient, FeelingClient, IntentClient, MemoryClient, PolicyClient, ProviderClient, TelemetryClient, ToolsClient,
};
use gateway_core::http_client::ServiceClient;
use gateway_core::routing::ModelSlugs;

use crate::metrics::Metrics;
use crate::rate_limit::RateLimiter;
use crate::task_queue::TaskQueue;

/// Per-external-call timeout defaults (spec §5): 30s GET, 60s POST, 120s
/// for the tool-loop-bearing provider call.
const GET_TIMEOUT: Duration = Duration::from_secs(30);
const POST_TIMEOUT: Duration = Duration::from_secs(60);
const PROVIDER_TIMEOUT: Duration = Duration::from_secs(120);

pub struct AppState {
    pub settings: Settings,
    pub intent: IntentClient,
    pub memory: MemoryClient,
    pub feeling: FeelingClient,
    pub drive: DriveClient,
    pub tools: ToolsClient,
    pub policy: PolicyClient,
    pub telemetry: TelemetryClient,
    pub provider_local: ProviderClient,
    pub provider_remote: ProviderClient,
    pub models: ModelSlugs,
    pub rate_limiter: RateLimiter,
    pub task_queue: TaskQueue,
    pub metrics: Metrics,
}

fn client(name: &'static str, services: &ServiceMap, timeout: Duration, secret: Option<&str>) -> ServiceClient {
    let base_url = services.base_url(name).unwrap_or_else(|_| panic!("services.json missing entry for {name}"));
    let mut c = ServiceClient::new(name, base_url, timeout);
    if let Some(secret) = secret {
        c = c.with_shared_secret(secret);
    }
    c
}

impl AppState {
    pub fn new(settings: Settings, services: &ServiceMap) -> Self {
        let secret = settings.suite_shared_secret.as_deref();

        let intent = IntentClient::new(client("intent-router", services, gateway_core::clients::intent::CLASSIFY_TIMEOUT, secret));
        let memory = MemoryClient::new(client("memory-service", services, GET_TIMEOUT, secret));
        let feeling = FeelingClient::new(client("feeling-engine", services, POST_TIMEOUT, secret));
        let drive = DriveClient::new(client("drive-engine", services, POST_TIMEOUT, secret));
        let tools = ToolsClient::new(client("tool-hub", services, POST_TIMEOUT, secret));
        let policy = PolicyClient::new(client("policy-guardrails", services, Duration::from_secs(1), secret));
        let telemetry = TelemetryClient::new(client("telemetry", services, POST_TIMEOUT, secret));

        let provider_local =
            ProviderClient::new(client("model-provider-local", services, PROVIDER_TIMEOUT, None), None);
        let provider_remote = ProviderClient::new(
            client("model-provider-remote", services, PROVIDER_TIMEOUT, None),
            settings.provider.api_key.clone(),
        );

        let models = ModelSlugs {
            default_local: settings.provider.model_default.clone(),
            vision: settings.provider.model_vision.clone(),
            explicit: settings.provider.model_explicit.clone(),
            coder: settings.provider.model_coder.clone(),
            toolcall: settings.provider.model_toolcall.clone(),
        };

        let rate_limiter = RateLimiter::new(settings.tuning.rate_limit_per_min, settings.tuning.rate_limit_burst);
        let task_queue =
            TaskQueue::new(settings.tuning.task_max_retries, settings.tuning.task_max_depth, settings.tuning.task_visibility_timeout);

        Self {
            settings,
            intent,
            memory,
            feeling,
            drive,
            tools,
            policy,
            telemetry,
            provider_local,
            provider_remote,
            models,
            rate_limiter,
            task_queue,
            metrics: Metrics::new(),
        }
    }
}

pub type SharedState = Arc<AppState>;
