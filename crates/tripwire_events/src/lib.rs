//! # Tripwire Event Bus
//!
//! Turns intercepted host call sites into a small, stable set of named events
//! that script listeners can observe and veto.
//!
//! ## Architecture
//!
//! - **[`EventName`]**: closed set of interception points, stable across host versions
//! - **[`Payload`]**: plain data describing one occurrence of an event
//! - **[`Verdict`]**: per-dispatch outcome (cancel flag plus optional replacement)
//! - **[`ListenerRegistry`]**: event name to ordered listener snapshots
//! - **[`EventBus`]**: synchronous dispatcher with per-listener fault isolation
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use tripwire_events::*;
//!
//! let bus = EventBus::new(BusConfig::default());
//!
//! bus.register(
//!     EventName::RawMouseScroll,
//!     Arc::new(FnListener::new("block_scroll", |payload, verdict| {
//!         if let Payload::MouseScroll(scroll) = payload {
//!             if scroll.delta > 0.0 {
//!                 verdict.cancel();
//!             }
//!         }
//!         Ok(())
//!     })),
//! );
//!
//! let payload = Payload::MouseScroll(MouseScrollPayload { x: 0.0, y: 0.0, delta: 1.5 });
//! let verdict = bus.fire(EventName::RawMouseScroll, &payload);
//! assert!(verdict.is_cancelled());
//! ```

pub mod bus;
pub mod config;
pub mod error;
pub mod event;
pub mod fault;
pub mod field;
pub mod listener;
pub mod payload;
pub mod registry;
pub mod stats;
pub mod verdict;


pub use bus::EventBus;
pub use config::BusConfig;
pub use error::{BusError, FieldFault, ListenerError};
pub use event::EventName;
pub use fault::{FaultReporter, ListenerFault, TracingFaultReporter};
pub use field::{read_or, read_or_default};
pub use listener::{
    FnListener, Listener, ListenerHandle, ListenerId, ScriptFunctionRef, ScriptInvoker,
    ScriptListener,
};
pub use payload::{
    BlockEntityRef, BlockOutlinePayload, BlockPos, EntityRef, GuiMouseClickPayload,
    GuiMouseDragPayload, MouseDragPayload, MouseInputPayload, MouseScrollPayload, PacketPayload,
    PacketRef, Payload, RenderBlockEntityPayload, RenderEntityPayload, ScreenRef, SoundCategory,
    SoundPayload, Transform, Vec3, WorldRenderPayload,
};
pub use registry::{ListenerRegistry, RegisteredListener, Snapshot};
pub use stats::{BusStats, BusStatsSnapshot};
pub use verdict::{PlayResult, Value, Verdict};

/// Version of the event contract exposed to the scripting layer.
pub const TRIPWIRE_EVENTS_VERSION: &str = env!("CARGO_PKG_VERSION");
