//! Per-dispatch verdict

use crate::error::BusError;
use crate::event::EventName;
use serde::{Deserialize, Serialize};

/// Outcome of the host's sound play call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayResult {
    Started,
    StartedSilently,
    #[default]
    NotStarted,
}

/// Replacement values listeners can hand back to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    SoundPlayResult(PlayResult),
}

/// Mutable state threaded through one dispatch.
///
/// Cancellation is one-way: there is no API to clear the flag once set, so
/// later listeners can observe it but never revert it.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    event: EventName,
    cancelled: bool,
    replacement: Option<Value>,
}

impl Verdict {
    /// Fresh verdict: not cancelled, no replacement.
    pub fn new(event: EventName) -> Self {
        Self {
            event,
            cancelled: false,
            replacement: None,
        }
    }

    pub fn event(&self) -> EventName {
        self.event
    }

    /// Requests that the host skip its default behaviour.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Sets the value the host should use in place of its own. A later
    /// listener overwrites an earlier one.
    pub fn set_replacement(&mut self, value: Value) -> Result<(), BusError> {
        if !self.event.accepts_replacement() {
            return Err(BusError::ReplacementUnsupported(self.event));
        }
        self.replacement = Some(value);
        Ok(())
    }

    pub fn replacement(&self) -> Option<&Value> {
        self.replacement.as_ref()
    }

    pub fn take_replacement(&mut self) -> Option<Value> {
        self.replacement.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_verdict_is_pure_default() {
        let verdict = Verdict::new(EventName::PacketSent);
        assert!(!verdict.is_cancelled());
        assert_eq!(verdict.replacement(), None);
        assert_eq!(verdict.event(), EventName::PacketSent);
    }

    #[test]
    fn cancel_is_sticky() {
        let mut verdict = Verdict::new(EventName::SoundPlay);
        verdict.cancel();
        verdict.cancel();
        assert!(verdict.is_cancelled());
    }

    #[test]
    fn replacement_only_where_accepted() {
        let mut sound = Verdict::new(EventName::SoundPlay);
        sound
            .set_replacement(Value::SoundPlayResult(PlayResult::StartedSilently))
            .unwrap();
        assert_eq!(
            sound.replacement(),
            Some(&Value::SoundPlayResult(PlayResult::StartedSilently))
        );

        let mut packet = Verdict::new(EventName::PacketReceived);
        assert_eq!(
            packet.set_replacement(Value::Bool(true)),
            Err(BusError::ReplacementUnsupported(EventName::PacketReceived))
        );
        assert_eq!(packet.replacement(), None);
    }
}
