//! World render phase and block outline adapters

use crate::adapter::{always_proceed, CallSite, HostAction};
use tripwire_events::{BlockOutlinePayload, BlockPos, EventName, Payload, Verdict, WorldRenderPayload};

fn render_start_payload(partial_ticks: f32) -> Option<Payload> {
    Some(Payload::WorldRenderStart(WorldRenderPayload { partial_ticks }))
}

pub mod legacy {
    use super::*;

    /// Start of world rendering; the older host passes the frame delta directly.
    pub struct WorldRenderStartSite {
        pub tick_delta: f32,
    }

    impl CallSite for WorldRenderStartSite {
        const EVENT: EventName = EventName::WorldRenderStart;

        fn payload(&self) -> Option<Payload> {
            render_start_payload(self.tick_delta)
        }

        fn enact(&self, verdict: Verdict) -> HostAction {
            always_proceed(&verdict)
        }
    }
}

pub mod modern {
    use super::*;
    use crate::host::HostTickCounter;

    pub struct WorldRenderStartSite<'a> {
        pub tick_counter: &'a dyn HostTickCounter,
    }

    impl CallSite for WorldRenderStartSite<'_> {
        const EVENT: EventName = EventName::WorldRenderStart;

        fn payload(&self) -> Option<Payload> {
            render_start_payload(self.tick_counter.dynamic_delta_ticks())
        }

        fn enact(&self, verdict: Verdict) -> HostAction {
            always_proceed(&verdict)
        }
    }
}

/// End of world rendering for the frame.
pub struct WorldRenderLastSite;

impl CallSite for WorldRenderLastSite {
    const EVENT: EventName = EventName::WorldRenderLast;

    fn payload(&self) -> Option<Payload> {
        Some(Payload::WorldRenderLast)
    }

    fn enact(&self, verdict: Verdict) -> HostAction {
        always_proceed(&verdict)
    }
}

/// Outline about to be drawn around the targeted block.
pub struct BlockOutlineSite {
    pub pos: BlockPos,
}

impl CallSite for BlockOutlineSite {
    const EVENT: EventName = EventName::BlockOutlineRender;

    fn payload(&self) -> Option<Payload> {
        Some(Payload::BlockOutline(BlockOutlinePayload { pos: self.pos }))
    }
}
