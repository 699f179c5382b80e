//! Entity and block entity render adapters
//!
//! The older host passes the entity itself to the render dispatcher. The
//! current host renders from an extracted render state and takes frame
//! timing from the tick counter, so the entity may not be reachable at all.
//! In that case the call proceeds without dispatch.

use crate::host::{block_entity_ref, entity_ref, in_client_world, HostBlockEntity, HostEntity};
use tripwire_events::{Payload, RenderBlockEntityPayload, RenderEntityPayload, Transform};

fn entity_payload(
    entity: &dyn HostEntity,
    partial_ticks: f32,
    transform: Transform,
) -> Option<Payload> {
    // Entities outside a client world are preview or GUI models.
    if !in_client_world(entity.world()) {
        return None;
    }
    Some(Payload::RenderEntity(RenderEntityPayload {
        entity: entity_ref(entity),
        partial_ticks,
        transform,
    }))
}

fn block_entity_payload(
    block_entity: &dyn HostBlockEntity,
    partial_ticks: f32,
    transform: Transform,
) -> Option<Payload> {
    if !in_client_world(block_entity.world()) {
        return None;
    }
    Some(Payload::RenderBlockEntity(RenderBlockEntityPayload {
        block_entity: block_entity_ref(block_entity),
        partial_ticks,
        transform,
    }))
}

pub mod legacy {
    use super::{block_entity_payload, entity_payload};
    use crate::adapter::CallSite;
    use crate::host::{HostBlockEntity, HostEntity};
    use tripwire_events::{EventName, Payload, Transform};

    pub struct EntityRenderSite<'a> {
        pub entity: &'a dyn HostEntity,
        pub tick_delta: f32,
        /// Top of the matrix stack passed to the dispatcher
        pub matrices: Transform,
    }

    impl CallSite for EntityRenderSite<'_> {
        const EVENT: EventName = EventName::RenderEntity;

        fn payload(&self) -> Option<Payload> {
            entity_payload(self.entity, self.tick_delta, self.matrices)
        }
    }

    pub struct BlockEntityRenderSite<'a> {
        pub block_entity: &'a dyn HostBlockEntity,
        pub tick_delta: f32,
        pub matrices: Transform,
    }

    impl CallSite for BlockEntityRenderSite<'_> {
        const EVENT: EventName = EventName::RenderBlockEntity;

        fn payload(&self) -> Option<Payload> {
            block_entity_payload(self.block_entity, self.tick_delta, self.matrices)
        }
    }
}

pub mod modern {
    use super::{block_entity_payload, entity_payload};
    use crate::adapter::CallSite;
    use crate::host::{BlockEntityRenderState, EntityRenderState, HostTickCounter};
    use tripwire_events::{EventName, Payload, Transform};

    pub struct EntityRenderSite<'a> {
        pub state: &'a dyn EntityRenderState,
        pub tick_counter: &'a dyn HostTickCounter,
        pub matrices: Transform,
    }

    impl CallSite for EntityRenderSite<'_> {
        const EVENT: EventName = EventName::RenderEntity;

        fn payload(&self) -> Option<Payload> {
            let entity = self.state.entity()?;
            entity_payload(
                entity,
                self.tick_counter.dynamic_delta_ticks(),
                self.matrices,
            )
        }
    }

    pub struct BlockEntityRenderSite<'a> {
        pub state: &'a dyn BlockEntityRenderState,
        pub tick_counter: &'a dyn HostTickCounter,
        pub matrices: Transform,
    }

    impl CallSite for BlockEntityRenderSite<'_> {
        const EVENT: EventName = EventName::RenderBlockEntity;

        fn payload(&self) -> Option<Payload> {
            let block_entity = self.state.block_entity()?;
            block_entity_payload(
                block_entity,
                self.tick_counter.dynamic_delta_ticks(),
                self.matrices,
            )
        }
    }
}
