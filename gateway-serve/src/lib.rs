//! Gateway Orchestrator library: the Pre/Mid/Post pipeline, rate limiting,
//! task queue, metrics, and the axum HTTP surface (spec §4.1, §6).

pub mod handlers;
pub mod metrics;
pub mod pipeline;
pub mod rate_limit;
pub mod router;
pub mod state;
pub mod task_queue;
pub mod worker;

pub use router::build_router;
pub use state::{AppState, SharedState};
