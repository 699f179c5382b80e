//! Statistics tracking for the event bus
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters, updated from whichever thread is dispatching.
#[derive(Debug, Default)]
pub struct BusStats {
    fires: AtomicU64,
    listener_invocations: AtomicU64,
    listener_faults: AtomicU64,
    suppressed_reports: AtomicU64,
    cancelled_verdicts: AtomicU64,
}

impl BusStats {
    pub(crate) fn record_fire(&self, invocations: u64, faults: u64, cancelled: bool) {
        self.fires.fetch_add(1, Ordering::Relaxed);
        self.listener_invocations
            .fetch_add(invocations, Ordering::Relaxed);
        self.listener_faults.fetch_add(faults, Ordering::Relaxed);
        if cancelled {
            self.cancelled_verdicts.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_suppressed_report(&self) {
        self.suppressed_reports.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> BusStatsSnapshot {
        BusStatsSnapshot {
            fires: self.fires.load(Ordering::Relaxed),
            listener_invocations: self.listener_invocations.load(Ordering::Relaxed),
            listener_faults: self.listener_faults.load(Ordering::Relaxed),
            suppressed_reports: self.suppressed_reports.load(Ordering::Relaxed),
            cancelled_verdicts: self.cancelled_verdicts.load(Ordering::Relaxed),
        }
    }
}

/// Copy of the bus counters at one point in time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusStatsSnapshot {
    /// Total number of `fire` calls
    pub fires: u64,
    /// Listener bodies run, faulting or not
    pub listener_invocations: u64,
    /// Listener bodies that returned an error or panicked
    pub listener_faults: u64,
    /// Faults counted but not forwarded to the reporter
    pub suppressed_reports: u64,
    /// Fires that ended with a cancelled verdict
    pub cancelled_verdicts: u64,
}
