//! Plain-data host objects captured from a running host
//!
//! Used to replay recorded call sites through the adapters without the host
//! present.

use crate::host::{
    BlockEntityRenderState, EntityRenderState, HostBlockEntity, HostEntity, HostInput,
    HostPacket, HostScreen, HostSound, HostWorld,
};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use tripwire_events::{BlockPos, FieldFault, SoundCategory, Vec3};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedPacket {
    pub kind: CompactString,
    #[serde(default)]
    pub handle: u64,
}

impl HostPacket for RecordedPacket {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn identity(&self) -> u64 {
        self.handle
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedWorld {
    pub client: bool,
}

impl HostWorld for RecordedWorld {
    fn is_client(&self) -> bool {
        self.client
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedEntity {
    pub id: i32,
    pub kind: CompactString,
    #[serde(default)]
    pub world: Option<RecordedWorld>,
}

impl HostEntity for RecordedEntity {
    fn id(&self) -> i32 {
        self.id
    }

    fn kind(&self) -> &str {
        &self.kind
    }

    fn world(&self) -> Option<&dyn HostWorld> {
        self.world.as_ref().map(|world| world as &dyn HostWorld)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedBlockEntity {
    pub pos: BlockPos,
    pub kind: CompactString,
    #[serde(default)]
    pub world: Option<RecordedWorld>,
}

impl HostBlockEntity for RecordedBlockEntity {
    fn pos(&self) -> BlockPos {
        self.pos
    }

    fn kind(&self) -> &str {
        &self.kind
    }

    fn world(&self) -> Option<&dyn HostWorld> {
        self.world.as_ref().map(|world| world as &dyn HostWorld)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedScreen {
    pub kind: CompactString,
}

impl HostScreen for RecordedScreen {
    fn kind(&self) -> &str {
        &self.kind
    }
}

/// A captured sound. A missing volume or pitch means the host accessor
/// failed when the sound was recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedSound {
    pub position: Vec3,
    pub id: CompactString,
    #[serde(default)]
    pub category: SoundCategory,
    #[serde(default)]
    pub volume: Option<f32>,
    #[serde(default)]
    pub pitch: Option<f32>,
}

impl HostSound for RecordedSound {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn category(&self) -> SoundCategory {
        self.category
    }

    fn volume(&self) -> Result<f32, FieldFault> {
        self.volume
            .ok_or_else(|| FieldFault::new("volume", "sound has no resolved volume"))
    }

    fn pitch(&self) -> Result<f32, FieldFault> {
        self.pitch
            .ok_or_else(|| FieldFault::new("pitch", "sound has no resolved pitch"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordedInput {
    pub world_loaded: bool,
    pub cursor: (f64, f64),
}

impl HostInput for RecordedInput {
    fn world_loaded(&self) -> bool {
        self.world_loaded
    }

    fn cursor(&self) -> (f64, f64) {
        self.cursor
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordedEntityRenderState {
    #[serde(default)]
    pub entity: Option<RecordedEntity>,
}

impl EntityRenderState for RecordedEntityRenderState {
    fn entity(&self) -> Option<&dyn HostEntity> {
        self.entity.as_ref().map(|entity| entity as &dyn HostEntity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordedBlockEntityRenderState {
    #[serde(default)]
    pub block_entity: Option<RecordedBlockEntity>,
}

impl BlockEntityRenderState for RecordedBlockEntityRenderState {
    fn block_entity(&self) -> Option<&dyn HostBlockEntity> {
        self.block_entity
            .as_ref()
            .map(|block_entity| block_entity as &dyn HostBlockEntity)
    }
}
