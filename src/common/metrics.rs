use std::sync::atomic::{AtomicU64, Ordering};

/// Per-synchronizer counters. Errors in a cycle never stop the loop, so these
/// are the only place a quiet feed and a failing feed look different.
#[derive(Debug, Default)]
pub struct SyncMetrics {
    cycles: AtomicU64,
    transport_errors: AtomicU64,
    decode_errors: AtomicU64,
    samples_applied: AtomicU64,
    samples_ignored: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub cycles: u64,
    pub transport_errors: u64,
    pub decode_errors: u64,
    pub samples_applied: u64,
    pub samples_ignored: u64,
}

impl SyncMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cycle(&self) {
        self.cycles.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_transport_error(&self) {
        self.transport_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_decode_error(&self) {
        self.decode_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_applied(&self, count: u64) {
        self.samples_applied.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_ignored(&self, count: u64) {
        self.samples_ignored.fetch_add(count, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            cycles: self.cycles.load(Ordering::Relaxed),
            transport_errors: self.transport_errors.load(Ordering::Relaxed),
            decode_errors: self.decode_errors.load(Ordering::Relaxed),
            samples_applied: self.samples_applied.load(Ordering::Relaxed),
            samples_ignored: self.samples_ignored.load(Ordering::Relaxed),
        }
    }
}
