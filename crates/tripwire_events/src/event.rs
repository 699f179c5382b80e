//! Stable event names
//!
//! Each name identifies one category of intercepted host occurrence. The set
//! is closed and does not change when the host's internal call sites do.

use crate::error::BusError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed enumeration of interception points exposed to scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventName {
    /// Inbound (client-bound) packet about to be handled
    PacketReceived,
    /// Outbound packet about to be sent
    PacketSent,
    /// Entity about to be rendered
    RenderEntity,
    /// Block entity about to be rendered
    RenderBlockEntity,
    /// Mouse drag forwarded to an open screen
    GuiMouseDrag,
    /// Mouse button press or release on an open screen
    GuiMouseClick,
    /// Mouse button press/release reaching the game window
    RawMouseInput,
    /// Mouse wheel movement reaching the game window
    RawMouseScroll,
    /// Held button moved between two render ticks
    MouseDragged,
    /// World rendering begins for a frame
    WorldRenderStart,
    /// World rendering finished for a frame
    WorldRenderLast,
    /// Target block outline about to be drawn
    BlockOutlineRender,
    /// Sound about to start playing
    SoundPlay,
}

impl EventName {
    /// Every event name, in declaration order.
    pub const ALL: [EventName; 13] = [
        EventName::PacketReceived,
        EventName::PacketSent,
        EventName::RenderEntity,
        EventName::RenderBlockEntity,
        EventName::GuiMouseDrag,
        EventName::GuiMouseClick,
        EventName::RawMouseInput,
        EventName::RawMouseScroll,
        EventName::MouseDragged,
        EventName::WorldRenderStart,
        EventName::WorldRenderLast,
        EventName::BlockOutlineRender,
        EventName::SoundPlay,
    ];

    /// Script-facing name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::PacketReceived => "packet_received",
            EventName::PacketSent => "packet_sent",
            EventName::RenderEntity => "render_entity",
            EventName::RenderBlockEntity => "render_block_entity",
            EventName::GuiMouseDrag => "gui_mouse_drag",
            EventName::GuiMouseClick => "gui_mouse_click",
            EventName::RawMouseInput => "raw_mouse_input",
            EventName::RawMouseScroll => "raw_mouse_scroll",
            EventName::MouseDragged => "mouse_dragged",
            EventName::WorldRenderStart => "world_render_start",
            EventName::WorldRenderLast => "world_render_last",
            EventName::BlockOutlineRender => "block_outline_render",
            EventName::SoundPlay => "sound_play",
        }
    }

    /// Whether the host call site can be suppressed by a cancelled verdict.
    pub fn is_cancellable(&self) -> bool {
        !matches!(
            self,
            EventName::RawMouseInput
                | EventName::RawMouseScroll
                | EventName::MouseDragged
                | EventName::WorldRenderStart
                | EventName::WorldRenderLast
        )
    }

    /// Whether a listener-supplied replacement value is honoured.
    pub fn accepts_replacement(&self) -> bool {
        matches!(self, EventName::SoundPlay)
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventName {
    type Err = BusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| BusError::UnknownEvent(s.to_string()))
    }
}
