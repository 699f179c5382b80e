//! # Tripwire Host Adapters
//!
//! One adapter per interception point. Each captures the host locals at its
//! call site, builds the event payload, fires it on the calling thread and
//! maps the verdict back to a [`HostAction`].
//!
//! Call sites whose shape differs between host versions come in a `legacy`
//! and a `modern` variant. Both are always compiled; [`active`] re-exports the
//! variant for the host this build targets (`legacy-host` feature).
//!
//! ```rust
//! use tripwire_adapters::{intercept, HostAction, NetworkSide, PacketReceiveSite};
//! use tripwire_adapters::record::RecordedPacket;
//! use tripwire_events::EventBus;
//!
//! let bus = EventBus::default();
//! let packet = RecordedPacket { kind: "KeepAliveS2CPacket".into(), handle: 1 };
//! let site = PacketReceiveSite { side: NetworkSide::Clientbound, packet: &packet };
//! assert_eq!(intercept(&bus, &site).action, HostAction::Proceed);
//! ```

pub mod adapter;
pub mod config;
pub mod host;
pub mod mouse;
pub mod packet;
pub mod record;
pub mod render;
pub mod sound;
pub mod world;

mod tests;

pub use adapter::{intercept, CallSite, HostAction, Interception};
pub use config::AdapterConfig;
pub use host::{
    BlockEntityRenderState, EntityRenderState, HostBlockEntity, HostEntity, HostInput,
    HostPacket, HostScreen, HostSound, HostTickCounter, HostWorld, NetworkSide,
};
pub use mouse::{MouseButtonCall, MouseTracker, RawMouseScrollSite, GLFW_PRESS, GLFW_RELEASE};
pub use packet::{PacketReceiveSite, PacketSendSite};
pub use world::{BlockOutlineSite, WorldRenderLastSite};

/// Call sites for the older host API.
#[cfg(feature = "legacy-host")]
pub mod active {
    pub use crate::mouse::legacy::{GuiMouseClickSite, GuiMouseDragSite, MouseButtonSite};
    pub use crate::render::legacy::{BlockEntityRenderSite, EntityRenderSite};
    pub use crate::sound::legacy::SoundPlaySite;
    pub use crate::world::legacy::WorldRenderStartSite;

    pub const HOST_VARIANT: &str = "legacy";
}

/// Call sites for the current host API.
#[cfg(not(feature = "legacy-host"))]
pub mod active {
    pub use crate::mouse::modern::{
        GuiMouseClickSite, GuiMouseDragSite, MouseButtonSite, MouseClick, MouseInput,
    };
    pub use crate::render::modern::{BlockEntityRenderSite, EntityRenderSite};
    pub use crate::sound::modern::SoundPlaySite;
    pub use crate::world::modern::WorldRenderStartSite;

    pub const HOST_VARIANT: &str = "modern";
}
