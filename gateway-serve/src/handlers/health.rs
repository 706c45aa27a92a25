//! `GET /health` and `GET /metrics` (spec §6).

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::SharedState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub metrics: MetricsSummary,
    pub rate_limit: RateLimitSummary,
    pub timeout: TimeoutSummary,
    pub task_worker: TaskWorkerSummary,
}

#[derive(Serialize)]
pub struct MetricsSummary {
    pub requests_total: u64,
}

#[derive(Serialize)]
pub struct RateLimitSummary {
    pub per_min: u32,
    pub burst: u32,
}

#[derive(Serialize)]
pub struct TimeoutSummary {
    pub pipeline_timeout_seconds: u64,
    pub timeouts_total: u64,
}

#[derive(Serialize)]
pub struct TaskWorkerSummary {
    pub enabled: bool,
    pub queue_depth: usize,
    pub dlq_depth: usize,
}

pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        metrics: MetricsSummary { requests_total: state.metrics.requests_total() },
        rate_limit: RateLimitSummary { per_min: state.settings.tuning.rate_limit_per_min, burst: state.settings.tuning.rate_limit_burst },
        timeout: TimeoutSummary {
            pipeline_timeout_seconds: state.settings.tuning.pipeline_timeout.as_secs(),
            timeouts_total: state.metrics.timeouts_total(),
        },
        task_worker: TaskWorkerSummary {
            enabled: state.settings.tuning.task_worker_enabled,
            queue_depth: state.task_queue.depth(),
            dlq_depth: state.task_queue.dlq(usize::MAX).len(),
        },
    })
}

pub async fn metrics(State(state): State<SharedState>) -> String {
    state.metrics.render()
}
