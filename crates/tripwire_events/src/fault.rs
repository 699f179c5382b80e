//! Listener fault reporting

use crate::error::ListenerError;
use crate::event::EventName;
use crate::listener::ListenerId;
use compact_str::CompactString;
use tracing::error;

/// A fault raised by one listener during one dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct ListenerFault {
    pub event: EventName,
    pub listener: ListenerId,
    pub listener_name: CompactString,
    pub error: ListenerError,
    /// How many faults this listener has raised so far, including this one
    pub occurrence: u32,
}

/// Diagnostics collaborator that receives listener faults.
///
/// Called synchronously on the dispatching thread, so implementations must
/// return quickly and must not call back into the bus.
pub trait FaultReporter: Send + Sync {
    fn report(&self, fault: &ListenerFault);
}

/// Reports faults to the `tracing` pipeline.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingFaultReporter;

impl FaultReporter for TracingFaultReporter {
    fn report(&self, fault: &ListenerFault) {
        error!(
            event = %fault.event,
            listener = %fault.listener_name,
            id = %fault.listener,
            occurrence = fault.occurrence,
            "❌ Listener failed: {}",
            fault.error
        );
    }
}
