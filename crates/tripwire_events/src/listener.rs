//! Listener capability objects and registration handles

use crate::error::ListenerError;
use crate::event::EventName;
use crate::payload::Payload;
use crate::verdict::Verdict;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Callable bound to one event name.
///
/// Listeners read the payload and may cancel the verdict or set a
/// replacement. Returning an error (or panicking) counts as a fault; the bus
/// keeps whatever the listener set on the verdict before failing.
pub trait Listener: Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    fn on_event(&self, payload: &Payload, verdict: &mut Verdict) -> Result<(), ListenerError>;
}

/// Process-unique listener id, increasing in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

impl ListenerId {
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Token returned by registration; the only way to remove a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerHandle {
    pub event: EventName,
    pub id: ListenerId,
}

impl fmt::Display for ListenerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.event, self.id)
    }
}

/// Listener backed by a Rust closure.
pub struct FnListener<F>
where
    F: Fn(&Payload, &mut Verdict) -> Result<(), ListenerError> + Send + Sync,
{
    name: CompactString,
    handler: F,
}

impl<F> FnListener<F>
where
    F: Fn(&Payload, &mut Verdict) -> Result<(), ListenerError> + Send + Sync,
{
    pub fn new(name: impl Into<CompactString>, handler: F) -> Self {
        Self {
            name: name.into(),
            handler,
        }
    }
}

impl<F> fmt::Debug for FnListener<F>
where
    F: Fn(&Payload, &mut Verdict) -> Result<(), ListenerError> + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnListener").field("name", &self.name).finish()
    }
}

impl<F> Listener for FnListener<F>
where
    F: Fn(&Payload, &mut Verdict) -> Result<(), ListenerError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn on_event(&self, payload: &Payload, verdict: &mut Verdict) -> Result<(), ListenerError> {
        (self.handler)(payload, verdict)
    }
}

/// Tag identifying a function owned by the scripting runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScriptFunctionRef {
    /// Script module that registered the function
    pub module: CompactString,
    /// Runtime-assigned function id
    pub function: u64,
    /// Number of arguments the function declares, if known
    pub arity: Option<u8>,
}

impl fmt::Display for ScriptFunctionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::fn{}", self.module, self.function)
    }
}

/// Seam to the external scripting runtime that owns listener bodies.
pub trait ScriptInvoker: Send + Sync {
    fn invoke(
        &self,
        function: &ScriptFunctionRef,
        payload: &Payload,
        verdict: &mut Verdict,
    ) -> Result<(), ListenerError>;
}

/// Listener whose body lives in the scripting runtime: a function tag plus
/// the runtime context needed to call it.
pub struct ScriptListener {
    function: ScriptFunctionRef,
    label: String,
    runtime: Arc<dyn ScriptInvoker>,
}

impl ScriptListener {
    pub fn new(function: ScriptFunctionRef, runtime: Arc<dyn ScriptInvoker>) -> Self {
        let label = function.to_string();
        Self {
            function,
            label,
            runtime,
        }
    }

    pub fn function(&self) -> &ScriptFunctionRef {
        &self.function
    }
}

impl fmt::Debug for ScriptListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptListener")
            .field("function", &self.function)
            .finish()
    }
}

impl Listener for ScriptListener {
    fn name(&self) -> &str {
        &self.label
    }

    fn on_event(&self, payload: &Payload, verdict: &mut Verdict) -> Result<(), ListenerError> {
        self.runtime.invoke(&self.function, payload, verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::WorldRenderPayload;
    use std::sync::Mutex;

    struct RecordingRuntime {
        calls: Mutex<Vec<(ScriptFunctionRef, EventName)>>,
    }

    impl ScriptInvoker for RecordingRuntime {
        fn invoke(
            &self,
            function: &ScriptFunctionRef,
            payload: &Payload,
            _verdict: &mut Verdict,
        ) -> Result<(), ListenerError> {
            self.calls
                .lock()
                .unwrap()
                .push((function.clone(), payload.event_name()));
            Ok(())
        }
    }

    #[test]
    fn ids_increase() {
        let a = ListenerId::next();
        let b = ListenerId::next();
        assert!(b > a);
    }

    #[test]
    fn script_listener_forwards_its_tag() {
        let runtime = Arc::new(RecordingRuntime {
            calls: Mutex::new(Vec::new()),
        });
        let function = ScriptFunctionRef {
            module: "waypoints".into(),
            function: 7,
            arity: Some(1),
        };
        let listener = ScriptListener::new(function.clone(), runtime.clone());
        assert_eq!(listener.name(), "waypoints::fn7");

        let payload = Payload::WorldRenderStart(WorldRenderPayload { partial_ticks: 0.5 });
        let mut verdict = Verdict::new(EventName::WorldRenderStart);
        listener.on_event(&payload, &mut verdict).unwrap();

        let calls = runtime.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[(function, EventName::WorldRenderStart)]);
    }
}
