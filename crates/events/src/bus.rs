//! In-process signal bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`SessionBus`] is the single publish/subscribe hub for [`SessionEvent`]s.
//! It is designed to be shared via `Arc<SessionBus>` between the UI event
//! handlers that emit signals and the data orchestrator that consumes them.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use stshub_core::types::Id;

// ---------------------------------------------------------------------------
// SessionEvent
// ---------------------------------------------------------------------------

/// A session-level signal that drives the data orchestrator.
///
/// Serialized with an internally-tagged `"type"` discriminator so the
/// signals can be logged and replayed in debug tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// The user navigated to a room. The orchestrator refreshes all
    /// resources when the id differs from the previously selected room.
    RoomChanged { room_id: Id },

    /// An explicit refresh request (pull-to-refresh, post-mutation
    /// refetch). Always triggers a full refresh of the current room.
    RefreshRequested,

    /// The user logged out. Resets all client state unconditionally.
    LoggedOut,
}

// ---------------------------------------------------------------------------
// SessionBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 64;

/// In-process fan-out bus for session signals.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`SessionEvent`].
pub struct SessionBus {
    sender: broadcast::Sender<SessionEvent>,
}

impl SessionBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed signals are dropped
    /// and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a signal to all current subscribers.
    ///
    /// If there are no active subscribers the signal is silently dropped.
    pub fn publish(&self, event: SessionEvent) {
        tracing::debug!(?event, "Publishing session event");
        // Ignore the SendError: it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all signals published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }
}

impl Default for SessionBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_published_event() {
        let bus = SessionBus::default();
        let mut rx = bus.subscribe();

        bus.publish(SessionEvent::RoomChanged { room_id: 3 });

        assert_eq!(
            rx.recv().await.unwrap(),
            SessionEvent::RoomChanged { room_id: 3 }
        );
    }

    #[tokio::test]
    async fn every_subscriber_sees_every_event() {
        let bus = SessionBus::default();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        bus.publish(SessionEvent::RefreshRequested);

        assert_eq!(a.recv().await.unwrap(), SessionEvent::RefreshRequested);
        assert_eq!(b.recv().await.unwrap(), SessionEvent::RefreshRequested);
    }

    #[test]
    fn publish_without_subscribers_does_not_panic() {
        let bus = SessionBus::default();
        bus.publish(SessionEvent::LoggedOut);
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_value(SessionEvent::RoomChanged { room_id: 9 }).unwrap();
        assert_eq!(json["type"], "room_changed");
        assert_eq!(json["room_id"], 9);
    }
}
