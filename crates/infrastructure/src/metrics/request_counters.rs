use dnsprofiler_application::ports::RequestCounter;
use std::sync::atomic::{AtomicU64, Ordering};

/// Cumulative internal/external request counters.
///
/// Created once at startup and shared between the dispatcher and the
/// metrics endpoint. Never reset.
#[derive(Debug, Default)]
pub struct RequestCounters {
    internal_total: AtomicU64,
    external_total: AtomicU64,
}

impl RequestCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn internal_total(&self) -> u64 {
        self.internal_total.load(Ordering::Relaxed)
    }

    pub fn external_total(&self) -> u64 {
        self.external_total.load(Ordering::Relaxed)
    }

    /// Serialize to Prometheus text exposition format.
    pub fn to_prometheus_text(&self) -> String {
        let internal = self.internal_total();
        let external = self.external_total();

        format!(
            "# HELP dnsprofiler_requests_external_total The count of external requests.\n\
             # TYPE dnsprofiler_requests_external_total counter\n\
             dnsprofiler_requests_external_total {external}\n\
             # HELP dnsprofiler_requests_internal_total The count of internal requests.\n\
             # TYPE dnsprofiler_requests_internal_total counter\n\
             dnsprofiler_requests_internal_total {internal}\n"
        )
    }
}

impl RequestCounter for RequestCounters {
    fn increment_internal_counter(&self) {
        self.internal_total.fetch_add(1, Ordering::Relaxed);
    }

    fn increment_external_counter(&self) {
        self.external_total.fetch_add(1, Ordering::Relaxed);
    }
}
