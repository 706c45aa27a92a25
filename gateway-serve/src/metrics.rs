//! Best-effort in-memory counters exposed at `GET /metrics` in Prometheus
//! text-exposition format (spec §5: "In-memory counters (metrics):
//! best-effort increments; not intended to survive restart.").
//!
//! No crate in this workspace's lineage pulls in a metrics/Prometheus
//! client, so these are hand-rolled atomics plus manual text formatting
//! rather than a borrowed dependency (see DESIGN.md).

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default)]
pub struct Metrics {
    requests_total: AtomicU64,
    rate_limited_total: AtomicU64,
    timeouts_total: AtomicU64,
    provider_failures_total: AtomicU64,
    tool_calls_total: AtomicU64,
    tasks_dead_lettered_total: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_requests(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_rate_limited(&self) {
        self.rate_limited_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_timeouts(&self) {
        self.timeouts_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_provider_failures(&self) {
        self.provider_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_tool_calls(&self, n: u32) {
        self.tool_calls_total.fetch_add(n as u64, Ordering::Relaxed);
    }

    pub fn inc_tasks_dead_lettered(&self) {
        self.tasks_dead_lettered_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests_total(&self) -> u64 {
        self.requests_total.load(Ordering::Relaxed)
    }

    pub fn timeouts_total(&self) -> u64 {
        self.timeouts_total.load(Ordering::Relaxed)
    }

    /// Renders every counter as `# TYPE ... counter` + `name value` lines,
    /// the minimal valid Prometheus text-exposition format.
    pub fn render(&self) -> String {
        let lines = [
            ("gateway_requests_total", self.requests_total.load(Ordering::Relaxed)),
            ("gateway_rate_limited_total", self.rate_limited_total.load(Ordering::Relaxed)),
            ("gateway_timeouts_total", self.timeouts_total.load(Ordering::Relaxed)),
            ("gateway_provider_failures_total", self.provider_failures_total.load(Ordering::Relaxed)),
            ("gateway_tool_calls_total", self.tool_calls_total.load(Ordering::Relaxed)),
            ("gateway_tasks_dead_lettered_total", self.tasks_dead_lettered_total.load(Ordering::Relaxed)),
        ];
        let mut out = String::new();
        for (name, value) in lines {
            out.push_str(&format!("# TYPE {name} counter\n{name} {value}\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_includes_incremented_counters() {
        let m = Metrics::new();
        m.inc_requests();
        m.inc_requests();
        m.inc_timeouts();
        let text = m.render();
        assert!(text.contains("gateway_requests_total 2"));
        assert!(text.contains("gateway_timeouts_total 1"));
    }
}
