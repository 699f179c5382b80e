//! Event bus / dispatcher
//!
//! [`EventBus::fire`] runs synchronously on the calling thread: it snapshots
//! the listeners for the event, invokes each in registration order with the
//! payload and a shared [`Verdict`], and returns the verdict. A listener that
//! errors or panics is reported and skipped; it never stops delivery to the
//! remaining listeners and never reaches the host call site.

use crate::config::BusConfig;
use crate::error::{panic_message, BusError, ListenerError};
use crate::event::EventName;
use crate::fault::{FaultReporter, ListenerFault, TracingFaultReporter};
use crate::listener::{Listener, ListenerHandle, ListenerId};
use crate::payload::Payload;
use crate::registry::{ListenerRegistry, RegisteredListener};
use crate::stats::{BusStats, BusStatsSnapshot};
use crate::verdict::Verdict;
use compact_str::CompactString;
use dashmap::DashMap;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error, trace, warn};

/// Registry plus dispatcher. One instance per scripting-layer lifecycle;
/// share it with `Arc`.
pub struct EventBus {
    registry: ListenerRegistry,
    config: BusConfig,
    reporter: Arc<dyn FaultReporter>,
    stats: BusStats,
    fault_counts: DashMap<ListenerId, u32>,
}

impl EventBus {
    /// Creates a bus that reports listener faults through `tracing`.
    pub fn new(config: BusConfig) -> Self {
        Self::with_reporter(config, Arc::new(TracingFaultReporter))
    }

    pub fn with_reporter(config: BusConfig, reporter: Arc<dyn FaultReporter>) -> Self {
        Self {
            registry: ListenerRegistry::new(),
            config,
            reporter,
            stats: BusStats::default(),
            fault_counts: DashMap::new(),
        }
    }

    pub fn register(&self, event: EventName, listener: Arc<dyn Listener>) -> ListenerHandle {
        self.registry.register(event, listener)
    }

    /// Removes a listener; unknown or already removed handles are ignored.
    pub fn unregister(&self, handle: ListenerHandle) -> bool {
        self.fault_counts.remove(&handle.id);
        self.registry.unregister(handle)
    }

    /// Removes every listed handle. Returns how many were still registered.
    pub fn unregister_all<I>(&self, handles: I) -> usize
    where
        I: IntoIterator<Item = ListenerHandle>,
    {
        handles
            .into_iter()
            .filter(|handle| self.unregister(*handle))
            .count()
    }

    /// Removes every listener. Returns how many were registered.
    pub fn clear(&self) -> usize {
        self.fault_counts.clear();
        let removed = self.registry.clear();
        debug!(removed, "🧹 Cleared all listeners");
        removed
    }

    pub fn registry(&self) -> &ListenerRegistry {
        &self.registry
    }

    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    pub fn stats(&self) -> BusStatsSnapshot {
        self.stats.snapshot()
    }

    /// Number of listeners with a fault count on record.
    pub fn faulted_listeners(&self) -> usize {
        self.fault_counts.len()
    }

    /// Dispatches `payload` to every listener of `event` and returns the
    /// aggregated verdict.
    pub fn fire(&self, event: EventName, payload: &Payload) -> Verdict {
        let mut verdict = Verdict::new(event);

        if payload.event_name() != event {
            warn!(
                "⚠️ Dispatch dropped: {}",
                BusError::PayloadMismatch {
                    fired: event,
                    payload: payload.event_name(),
                }
            );
            return verdict;
        }

        let listeners = self.registry.snapshot(event);
        if listeners.is_empty() {
            if self.config.log_unlistened_events {
                debug!(event = %event, "No listeners for event");
            }
            self.stats.record_fire(0, 0, false);
            return verdict;
        }

        let mut faults = 0u64;
        for entry in listeners.iter() {
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                entry.listener.on_event(payload, &mut verdict)
            }));

            let error = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e,
                Err(panic_info) => ListenerError::Panicked(panic_message(&*panic_info)),
            };
            faults += 1;
            self.report_fault(event, entry, error);
        }

        // A listener removed while this dispatch ran must not keep a count.
        if faults > 0 {
            for entry in listeners.iter() {
                let handle = ListenerHandle { event, id: entry.id };
                if !self.registry.contains(handle) {
                    self.fault_counts.remove(&entry.id);
                }
            }
        }

        trace!(
            event = %event,
            listeners = listeners.len(),
            faults,
            cancelled = verdict.is_cancelled(),
            "📤 Dispatched event"
        );
        self.stats
            .record_fire(listeners.len() as u64, faults, verdict.is_cancelled());
        verdict
    }

    fn report_fault(&self, event: EventName, entry: &RegisteredListener, error: ListenerError) {
        let occurrence = {
            let mut count = self.fault_counts.entry(entry.id).or_insert(0);
            *count = count.saturating_add(1);
            *count
        };

        if let Some(limit) = self.config.max_fault_reports_per_listener {
            if occurrence > limit {
                if occurrence == limit.saturating_add(1) {
                    warn!(
                        event = %event,
                        listener = entry.listener.name(),
                        "🔇 Listener keeps failing, further faults will only be counted"
                    );
                }
                self.stats.record_suppressed_report();
                return;
            }
        }

        let fault = ListenerFault {
            event,
            listener: entry.id,
            listener_name: CompactString::new(entry.listener.name()),
            error,
            occurrence,
        };

        if catch_unwind(AssertUnwindSafe(|| self.reporter.report(&fault))).is_err() {
            error!(event = %event, "❌ Fault reporter panicked while reporting {}", fault.error);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(BusConfig::default())
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .field("stats", &self.stats.snapshot())
            .finish()
    }
}
