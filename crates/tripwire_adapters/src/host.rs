//! Opaque host objects as seen from the adapters
//!
//! These traits cover only the accessors the adapters read. The host glue
//! implements them over the real engine objects; [`crate::record`] implements
//! them over captured plain data.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use tripwire_events::{
    BlockEntityRef, BlockPos, EntityRef, FieldFault, PacketRef, ScreenRef, SoundCategory, Vec3,
};

/// Direction of the connection a packet travels on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkSide {
    /// Server to client
    Clientbound,
    /// Client to server
    Serverbound,
}

pub trait HostPacket {
    fn kind(&self) -> &str;
    /// Identity of the packet object, stable for the duration of the call.
    fn identity(&self) -> u64;
}

pub trait HostWorld {
    fn is_client(&self) -> bool;
}

pub trait HostEntity {
    fn id(&self) -> i32;
    fn kind(&self) -> &str;
    /// World the entity is attached to, if any.
    fn world(&self) -> Option<&dyn HostWorld>;
}

pub trait HostBlockEntity {
    fn pos(&self) -> BlockPos;
    fn kind(&self) -> &str;
    fn world(&self) -> Option<&dyn HostWorld>;
}

pub trait HostScreen {
    fn kind(&self) -> &str;
}

/// A sound about to be played.
///
/// Volume and pitch are resolved lazily by the host and can fail for some
/// sound instances.
pub trait HostSound {
    fn position(&self) -> Vec3;
    fn id(&self) -> &str;
    fn category(&self) -> SoundCategory;
    fn volume(&self) -> Result<f32, FieldFault>;
    fn pitch(&self) -> Result<f32, FieldFault>;
}

/// Frame timing source of the current host.
pub trait HostTickCounter {
    fn dynamic_delta_ticks(&self) -> f32;
}

impl HostTickCounter for f32 {
    fn dynamic_delta_ticks(&self) -> f32 {
        *self
    }
}

/// Client-wide input state.
pub trait HostInput {
    fn world_loaded(&self) -> bool;
    /// Cursor position in scaled window coordinates.
    fn cursor(&self) -> (f64, f64);
}

/// Extracted render state handed to entity renderers by the current host.
pub trait EntityRenderState {
    /// Backing entity, when the state exposes it.
    fn entity(&self) -> Option<&dyn HostEntity>;
}

/// Extracted render state handed to block entity renderers by the current host.
pub trait BlockEntityRenderState {
    fn block_entity(&self) -> Option<&dyn HostBlockEntity>;
}

pub(crate) fn packet_ref(packet: &dyn HostPacket) -> PacketRef {
    PacketRef {
        kind: CompactString::new(packet.kind()),
        handle: packet.identity(),
    }
}

pub(crate) fn entity_ref(entity: &dyn HostEntity) -> EntityRef {
    EntityRef {
        id: entity.id(),
        kind: CompactString::new(entity.kind()),
    }
}

pub(crate) fn block_entity_ref(block_entity: &dyn HostBlockEntity) -> BlockEntityRef {
    BlockEntityRef {
        pos: block_entity.pos(),
        kind: CompactString::new(block_entity.kind()),
    }
}

pub(crate) fn screen_ref(screen: &dyn HostScreen) -> ScreenRef {
    ScreenRef {
        kind: CompactString::new(screen.kind()),
    }
}

/// Whether an entity or block entity belongs to a loaded client-side world.
pub(crate) fn in_client_world(world: Option<&dyn HostWorld>) -> bool {
    world.is_some_and(|world| world.is_client())
}
