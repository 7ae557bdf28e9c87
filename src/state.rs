use crate::config::AppConfig;
use crate::pricing::PricingClient;
use crate::session::Session;
use portable_atomic::{AtomicU64, Ordering};
use std::sync::Arc;

// ── Request counters (lock-free) ──

pub struct PerfCounters {
    pub validations_run: AtomicU64,
    pub submissions: AtomicU64,
    pub submissions_failed: AtomicU64,
    pub rejected_busy: AtomicU64,
}

impl PerfCounters {
    pub fn new() -> Self {
        Self {
            validations_run: AtomicU64::new(0),
            submissions: AtomicU64::new(0),
            submissions_failed: AtomicU64::new(0),
            rejected_busy: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for PerfCounters {
    fn default() -> Self {
        Self::new()
    }
}

// ── Application shared state ──

pub struct AppState {
    pub config: AppConfig,
    pub session: Session,
    pub counters: PerfCounters,
}

impl AppState {
    pub fn new(config: AppConfig) -> Arc<Self> {
        let client = PricingClient::new(&config.pricing_service_url);
        Arc::new(Self {
            config,
            session: Session::new(client),
            counters: PerfCounters::new(),
        })
    }
}
