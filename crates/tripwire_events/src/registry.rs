//! Listener registry
//!
//! Maps each event name to an immutable, reference-counted slice of
//! listeners. Registration and removal build a new slice and swap it in while
//! holding only that event's shard lock; a dispatch clones the current `Arc`
//! and iterates it without any lock held. In-flight dispatches therefore keep
//! the slice they started with, and new dispatches see every completed update.

use crate::event::EventName;
use crate::listener::{Listener, ListenerHandle, ListenerId};
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// One registry entry.
#[derive(Clone)]
pub struct RegisteredListener {
    pub id: ListenerId,
    pub listener: Arc<dyn Listener>,
}

impl fmt::Debug for RegisteredListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredListener")
            .field("id", &self.id)
            .field("name", &self.listener.name())
            .finish()
    }
}

/// Point-in-time view of one event's listeners, in registration order.
pub type Snapshot = Arc<[RegisteredListener]>;

fn empty_snapshot() -> Snapshot {
    Arc::from(Vec::new())
}

/// Owner of the event-name to listener-sequence mapping.
#[derive(Default)]
pub struct ListenerRegistry {
    entries: DashMap<EventName, Snapshot>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a listener to the end of the event's sequence.
    pub fn register(&self, event: EventName, listener: Arc<dyn Listener>) -> ListenerHandle {
        let mut slot = self.entries.entry(event).or_insert_with(empty_snapshot);

        // Id is taken under the shard lock so ids stay ordered like positions.
        let id = ListenerId::next();
        let mut next = Vec::with_capacity(slot.len() + 1);
        next.extend(slot.iter().cloned());
        next.push(RegisteredListener {
            id,
            listener: listener.clone(),
        });
        *slot = Arc::from(next);
        let count = slot.len();
        drop(slot);

        debug!(
            event = %event,
            listener = listener.name(),
            id = %id,
            count,
            "📝 Registered listener"
        );
        ListenerHandle { event, id }
    }

    /// Removes a listener. Returns `false` if the handle was already removed.
    pub fn unregister(&self, handle: ListenerHandle) -> bool {
        let mut removed = false;

        if let Some(mut slot) = self.entries.get_mut(&handle.event) {
            if slot.iter().any(|entry| entry.id == handle.id) {
                let next: Vec<_> = slot
                    .iter()
                    .filter(|entry| entry.id != handle.id)
                    .cloned()
                    .collect();
                *slot = Arc::from(next);
                removed = true;
            }
        }

        if removed {
            self.entries
                .remove_if(&handle.event, |_, listeners| listeners.is_empty());
            debug!(handle = %handle, "🗑️ Unregistered listener");
        } else {
            trace!(handle = %handle, "Unregister ignored, handle not registered");
        }
        removed
    }

    /// Removes every listed handle, returning how many were still registered.
    pub fn unregister_all<I>(&self, handles: I) -> usize
    where
        I: IntoIterator<Item = ListenerHandle>,
    {
        handles
            .into_iter()
            .filter(|handle| self.unregister(*handle))
            .count()
    }

    /// Listeners currently registered for `event`, in registration order.
    pub fn snapshot(&self, event: EventName) -> Snapshot {
        self.entries
            .get(&event)
            .map(|entry| entry.value().clone())
            .unwrap_or_else(empty_snapshot)
    }

    pub fn contains(&self, handle: ListenerHandle) -> bool {
        self.entries
            .get(&handle.event)
            .is_some_and(|entry| entry.iter().any(|listener| listener.id == handle.id))
    }

    pub fn listener_count(&self, event: EventName) -> usize {
        self.entries.get(&event).map(|entry| entry.len()).unwrap_or(0)
    }

    pub fn total_listeners(&self) -> usize {
        self.entries.iter().map(|entry| entry.value().len()).sum()
    }

    /// Same as [`Self::total_listeners`].
    pub fn len(&self) -> usize {
        self.total_listeners()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Event names that currently have at least one listener.
    pub fn registered_events(&self) -> Vec<EventName> {
        let mut events: Vec<_> = self.entries.iter().map(|entry| *entry.key()).collect();
        events.sort();
        events
    }

    /// Drops every registration.
    pub fn clear(&self) -> usize {
        let total = self.total_listeners();
        self.entries.clear();
        total
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("events", &self.entries.len())
            .field("listeners", &self.total_listeners())
            .finish()
    }
}
