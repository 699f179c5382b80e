//! Adapter contract shared by every interception point
//!
//! A call site is the bundle of host locals captured where the host was
//! intercepted. [`intercept`] builds its payload, fires the matching event on
//! the calling thread, and turns the verdict into a [`HostAction`].

use serde::{Deserialize, Serialize};
use tracing::trace;
use tripwire_events::{EventBus, EventName, Payload, Value, Verdict};

/// What the host should do with the intercepted call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum HostAction {
    /// Run the host's default behaviour unmodified
    Proceed,
    /// Skip the wrapped operation
    Suppress,
    /// Skip the wrapped operation and return this value in its place
    Return(Value),
}

impl HostAction {
    pub fn is_suppressed(&self) -> bool {
        !matches!(self, HostAction::Proceed)
    }
}

/// Result of one interception, for the host glue and for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interception {
    pub event: EventName,
    /// `false` when the call site's precondition filtered the call out
    pub dispatched: bool,
    pub action: HostAction,
}

/// Host locals captured at one interception point.
pub trait CallSite {
    /// Event this call site fires.
    const EVENT: EventName;

    /// Builds the payload, or `None` when the call does not qualify.
    ///
    /// Preconditions are checked before any payload field is read.
    fn payload(&self) -> Option<Payload>;

    /// Maps the final verdict onto the host call.
    fn enact(&self, verdict: Verdict) -> HostAction {
        suppress_if_cancelled(&verdict)
    }
}

/// Fires `site`'s event on the current thread and returns the host action.
pub fn intercept<S: CallSite>(bus: &EventBus, site: &S) -> Interception {
    let Some(payload) = site.payload() else {
        trace!(event = %S::EVENT, "Call site filtered, not dispatching");
        return Interception {
            event: S::EVENT,
            dispatched: false,
            action: HostAction::Proceed,
        };
    };

    let verdict = bus.fire(S::EVENT, &payload);
    Interception {
        event: S::EVENT,
        dispatched: true,
        action: site.enact(verdict),
    }
}

pub(crate) fn suppress_if_cancelled(verdict: &Verdict) -> HostAction {
    if verdict.is_cancelled() {
        HostAction::Suppress
    } else {
        HostAction::Proceed
    }
}

/// For call sites the host cannot skip: a cancel is noted and ignored.
pub(crate) fn always_proceed(verdict: &Verdict) -> HostAction {
    if verdict.is_cancelled() {
        trace!(event = %verdict.event(), "Event is not cancellable, ignoring cancel");
    }
    HostAction::Proceed
}
