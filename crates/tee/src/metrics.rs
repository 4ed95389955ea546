//! Per-decorator counters

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for a single tee decorator
#[derive(Debug, Default)]
pub struct TeeMetrics {
    /// Successful dumps
    dump_count: AtomicU64,
    /// Dumps that failed and aborted the host operation
    failure_count: AtomicU64,
    /// Primary operations handed to the wrapped component
    delegation_count: AtomicU64,
}

impl TeeMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dump_count(&self) -> u64 {
        self.dump_count.load(Ordering::Relaxed)
    }

    pub fn inc_dump_count(&self) {
        self.dump_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    pub fn inc_failure_count(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn delegation_count(&self) -> u64 {
        self.delegation_count.load(Ordering::Relaxed)
    }

    pub fn inc_delegation_count(&self) {
        self.delegation_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            dump_count: self.dump_count(),
            failure_count: self.failure_count(),
            delegation_count: self.delegation_count(),
        }
    }
}

/// Point-in-time copy of `TeeMetrics`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub dump_count: u64,
    pub failure_count: u64,
    pub delegation_count: u64,
}
