//! Script session lifecycle
//!
//! A [`ScriptSession`] lives for one load cycle of the scripting layer. It
//! holds the event bus, tracks which script module registered which listener,
//! and removes those listeners on teardown so a reload starts clean.

use compact_str::CompactString;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info};
use tripwire_events::{
    BusConfig, BusError, EventBus, EventName, FaultReporter, Listener, ListenerHandle,
    ScriptFunctionRef, ScriptInvoker, ScriptListener,
};

pub struct ScriptSession {
    bus: Arc<EventBus>,
    modules: DashMap<CompactString, Vec<ListenerHandle>>,
}

impl ScriptSession {
    pub fn new(config: BusConfig) -> Self {
        Self::with_bus(Arc::new(EventBus::new(config)))
    }

    pub fn with_reporter(config: BusConfig, reporter: Arc<dyn FaultReporter>) -> Self {
        Self::with_bus(Arc::new(EventBus::with_reporter(config, reporter)))
    }

    /// Wraps an existing bus. Teardown only removes listeners registered
    /// through this session; anything registered on `bus` directly stays.
    pub fn with_bus(bus: Arc<EventBus>) -> Self {
        info!("🚀 Script session started");
        Self {
            bus,
            modules: DashMap::new(),
        }
    }

    /// Bus to hand to the host adapters.
    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    /// Registers `listener` on behalf of `module`.
    pub fn register(
        &self,
        module: &str,
        event: EventName,
        listener: Arc<dyn Listener>,
    ) -> ListenerHandle {
        let handle = self.bus.register(event, listener);
        self.modules
            .entry(CompactString::new(module))
            .or_default()
            .push(handle);
        handle
    }

    /// Registers a script function under its script-facing event name.
    pub fn register_script(
        &self,
        event_name: &str,
        function: ScriptFunctionRef,
        runtime: Arc<dyn ScriptInvoker>,
    ) -> Result<ListenerHandle, BusError> {
        let event: EventName = event_name.parse()?;
        let module = function.module.clone();
        let listener = Arc::new(ScriptListener::new(function, runtime));
        Ok(self.register(&module, event, listener))
    }

    /// Removes one listener. Unknown handles are ignored.
    pub fn unregister(&self, handle: ListenerHandle) -> bool {
        for mut module in self.modules.iter_mut() {
            module.retain(|h| *h != handle);
        }
        self.bus.unregister(handle)
    }

    /// Removes every listener `module` registered. Returns how many were live.
    pub fn unload_module(&self, module: &str) -> usize {
        let Some((_, handles)) = self.modules.remove(module) else {
            return 0;
        };
        let removed = self.bus.unregister_all(handles);
        debug!(module, removed, "📦 Unloaded script module");
        removed
    }

    /// Modules with at least one registration, sorted.
    pub fn loaded_modules(&self) -> Vec<CompactString> {
        let mut modules: Vec<_> = self
            .modules
            .iter()
            .filter(|entry| !entry.value().is_empty())
            .map(|entry| entry.key().clone())
            .collect();
        modules.sort();
        modules
    }

    /// Removes every listener registered through this session. Returns how
    /// many were still registered.
    pub fn teardown(&self) -> usize {
        let handles: Vec<_> = self
            .modules
            .iter()
            .flat_map(|module| module.value().clone())
            .collect();
        self.modules.clear();
        let removed = self.bus.unregister_all(handles);
        if removed > 0 {
            info!(removed, "🛑 Script session torn down");
        }
        removed
    }
}

impl Drop for ScriptSession {
    fn drop(&mut self) {
        self.teardown();
    }
}
