//! Payload records
//!
//! Plain, host-version independent data describing one occurrence of an
//! event. Adapters build a fresh payload per dispatch; listeners borrow it
//! read-only for the duration of the call.

use crate::event::EventName;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Double precision position in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Integer block coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Column-major 4x4 render transform captured from the host's matrix stack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub matrix: [f32; 16],
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        matrix: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Translation component.
    pub fn translation(&self) -> Vec3 {
        Vec3::new(
            self.matrix[12] as f64,
            self.matrix[13] as f64,
            self.matrix[14] as f64,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Opaque reference to a host entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    /// Host-side entity id
    pub id: i32,
    /// Host entity type identifier (e.g. `minecraft:zombie`)
    pub kind: CompactString,
}

/// Opaque reference to a host block entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockEntityRef {
    pub pos: BlockPos,
    pub kind: CompactString,
}

/// Opaque reference to a host packet instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PacketRef {
    /// Host packet type name
    pub kind: CompactString,
    /// Identity of the packet object for the lifetime of the call
    pub handle: u64,
}

/// Opaque reference to the screen a GUI event targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenRef {
    pub kind: CompactString,
}

/// Mixer category a sound plays under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCategory {
    #[default]
    Master,
    Music,
    Record,
    Weather,
    Block,
    Hostile,
    Neutral,
    Player,
    Ambient,
    Voice,
    Ui,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacketPayload {
    pub packet: PacketRef,
}

/// Payload fields for the entity render events are provisional until the
/// scripting layer's contract for the newer host settles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderEntityPayload {
    pub entity: EntityRef,
    pub partial_ticks: f32,
    pub transform: Transform,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderBlockEntityPayload {
    pub block_entity: BlockEntityRef,
    pub partial_ticks: f32,
    pub transform: Transform,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuiMouseDragPayload {
    pub dx: f64,
    pub dy: f64,
    pub x: f64,
    pub y: f64,
    pub button: i32,
    pub screen: ScreenRef,
}

/// Press or release delivered to an open screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuiMouseClickPayload {
    pub x: f64,
    pub y: f64,
    pub button: i32,
    pub pressed: bool,
    pub screen: ScreenRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MouseInputPayload {
    pub x: f64,
    pub y: f64,
    pub button: i32,
    pub pressed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MouseScrollPayload {
    pub x: f64,
    pub y: f64,
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MouseDragPayload {
    pub dx: f64,
    pub dy: f64,
    pub x: f64,
    pub y: f64,
    pub button: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldRenderPayload {
    pub partial_ticks: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockOutlinePayload {
    pub pos: BlockPos,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundPayload {
    pub position: Vec3,
    pub id: CompactString,
    pub volume: f32,
    pub pitch: f32,
    pub category: SoundCategory,
}

/// One occurrence of an event, tagged by the event it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum Payload {
    PacketReceived(PacketPayload),
    PacketSent(PacketPayload),
    RenderEntity(RenderEntityPayload),
    RenderBlockEntity(RenderBlockEntityPayload),
    GuiMouseDrag(GuiMouseDragPayload),
    GuiMouseClick(GuiMouseClickPayload),
    MouseInput(MouseInputPayload),
    MouseScroll(MouseScrollPayload),
    MouseDrag(MouseDragPayload),
    WorldRenderStart(WorldRenderPayload),
    WorldRenderLast,
    BlockOutline(BlockOutlinePayload),
    Sound(SoundPayload),
}

impl Payload {
    /// The event this payload describes.
    pub fn event_name(&self) -> EventName {
        match self {
            Payload::PacketReceived(_) => EventName::PacketReceived,
            Payload::PacketSent(_) => EventName::PacketSent,
            Payload::RenderEntity(_) => EventName::RenderEntity,
            Payload::RenderBlockEntity(_) => EventName::RenderBlockEntity,
            Payload::GuiMouseDrag(_) => EventName::GuiMouseDrag,
            Payload::GuiMouseClick(_) => EventName::GuiMouseClick,
            Payload::MouseInput(_) => EventName::RawMouseInput,
            Payload::MouseScroll(_) => EventName::RawMouseScroll,
            Payload::MouseDrag(_) => EventName::MouseDragged,
            Payload::WorldRenderStart(_) => EventName::WorldRenderStart,
            Payload::WorldRenderLast => EventName::WorldRenderLast,
            Payload::BlockOutline(_) => EventName::BlockOutlineRender,
            Payload::Sound(_) => EventName::SoundPlay,
        }
    }
}
