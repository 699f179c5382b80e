//! Error types for the event bus

use crate::event::EventName;

/// Errors a listener body can report back to the bus.
///
/// Any of these is treated as a listener fault: the bus reports it and moves
/// on to the next listener.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ListenerError {
    /// The scripting runtime raised an error while running the listener
    #[error("Script error: {0}")]
    Script(String),

    /// The listener refused the payload it was handed
    #[error("Listener rejected payload: {0}")]
    Rejected(String),

    /// The listener panicked
    #[error("Listener panicked: {0}")]
    Panicked(String),

    /// Bus misuse from inside a listener
    #[error(transparent)]
    Bus(#[from] BusError),

    /// Anything else
    #[error("Listener failed: {0}")]
    Other(String),
}

/// Misuse of the bus contract that is surfaced to the caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BusError {
    /// A payload was fired under an event name it does not belong to
    #[error("Payload for {payload} fired as {fired}")]
    PayloadMismatch { fired: EventName, payload: EventName },

    /// A listener tried to set a replacement value on an event that has none
    #[error("Event {0} does not accept a replacement value")]
    ReplacementUnsupported(EventName),

    /// A script-facing event name could not be parsed
    #[error("Unknown event name: {0}")]
    UnknownEvent(String),
}

/// A host accessor failed while a payload field was being read.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Field '{field}' unavailable: {reason}")]
pub struct FieldFault {
    pub field: &'static str,
    pub reason: String,
}

impl FieldFault {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Turns a caught panic payload into a readable message.
pub(crate) fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
