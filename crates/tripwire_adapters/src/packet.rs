//! Connection packet adapters
//!
//! The packet call sites have the same shape on every supported host
//! version, so there is a single variant of each.

use crate::adapter::CallSite;
use crate::host::{packet_ref, HostPacket, NetworkSide};
use tripwire_events::{EventName, PacketPayload, Payload};

/// Packet about to be handed to the connection's packet listener.
pub struct PacketReceiveSite<'a> {
    /// Side of the connection doing the reading
    pub side: NetworkSide,
    pub packet: &'a dyn HostPacket,
}

impl CallSite for PacketReceiveSite<'_> {
    const EVENT: EventName = EventName::PacketReceived;

    fn payload(&self) -> Option<Payload> {
        // Only traffic arriving at the client is script-visible.
        if self.side != NetworkSide::Clientbound {
            return None;
        }
        Some(Payload::PacketReceived(PacketPayload {
            packet: packet_ref(self.packet),
        }))
    }
}

/// Packet about to be written to the connection. Every send fires.
pub struct PacketSendSite<'a> {
    pub packet: &'a dyn HostPacket,
}

impl CallSite for PacketSendSite<'_> {
    const EVENT: EventName = EventName::PacketSent;

    fn payload(&self) -> Option<Payload> {
        Some(Payload::PacketSent(PacketPayload {
            packet: packet_ref(self.packet),
        }))
    }
}
