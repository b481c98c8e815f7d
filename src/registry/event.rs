//! Registry lifecycle events
//!
//! One broadcast channel per event kind. Sending never blocks and never
//! runs subscriber code, so the registry emits inside its critical section
//! and subscribers observe events in the same order state changed. A
//! lagging or dropped receiver cannot affect other receivers or registry
//! state.

use serde::Serialize;
use tokio::sync::broadcast;

use super::room::Metadata;
use super::signal::Signal;

/// Emitted when a room is created, explicitly or on first connect
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCreated {
    /// The new room's id (trimmed)
    pub room_id: String,
    /// Peer capacity the room was created with
    pub max_peers: usize,
    /// Creation-time metadata
    pub metadata: Metadata,
}

/// Emitted when the last peer leaves and the room is removed
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomClosed {
    /// The removed room's id
    pub room_id: String,
}

/// Emitted when a peer joins a room
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerConnected {
    /// Room the peer joined
    pub room_id: String,
    /// The new peer's id
    pub peer_id: String,
    /// Connect-time metadata
    pub metadata: Metadata,
}

/// Emitted on every heartbeat
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerHeartbeat {
    /// Room the peer belongs to
    pub room_id: String,
    /// The peer that pinged
    pub peer_id: String,
    /// The peer's updated last-seen timestamp (milliseconds since epoch)
    pub last_seen: u64,
}

/// Emitted when a peer leaves a room
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerDisconnected {
    /// Room the peer left
    pub room_id: String,
    /// The departed peer's id
    pub peer_id: String,
}

/// Emitted for every relayed signal, regardless of its target hint
///
/// Transports subscribe to this event and route the signal to the right
/// live connection themselves (typically via `signal.to`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalEvent {
    /// Room the signal was relayed in
    pub room_id: String,
    /// Sending peer
    pub from_peer_id: String,
    /// The relayed signal, unchanged
    pub signal: Signal,
    /// The sender's connect-time metadata
    pub metadata: Metadata,
}

/// Broadcast fan-out for registry events
///
/// Each event kind has its own channel, so subscribers receive only the
/// events they asked for and per-kind ordering is FIFO.
pub(super) struct EventBus {
    room_created: broadcast::Sender<RoomCreated>,
    room_closed: broadcast::Sender<RoomClosed>,
    peer_connected: broadcast::Sender<PeerConnected>,
    peer_heartbeat: broadcast::Sender<PeerHeartbeat>,
    peer_disconnected: broadcast::Sender<PeerDisconnected>,
    signal: broadcast::Sender<SignalEvent>,
}

impl EventBus {
    /// Create a bus with the given per-channel capacity
    pub(super) fn new(capacity: usize) -> Self {
        let (room_created, _) = broadcast::channel(capacity);
        let (room_closed, _) = broadcast::channel(capacity);
        let (peer_connected, _) = broadcast::channel(capacity);
        let (peer_heartbeat, _) = broadcast::channel(capacity);
        let (peer_disconnected, _) = broadcast::channel(capacity);
        let (signal, _) = broadcast::channel(capacity);

        Self {
            room_created,
            room_closed,
            peer_connected,
            peer_heartbeat,
            peer_disconnected,
            signal,
        }
    }

    pub(super) fn subscribe_room_created(&self) -> broadcast::Receiver<RoomCreated> {
        self.room_created.subscribe()
    }

    pub(super) fn subscribe_room_closed(&self) -> broadcast::Receiver<RoomClosed> {
        self.room_closed.subscribe()
    }

    pub(super) fn subscribe_peer_connected(&self) -> broadcast::Receiver<PeerConnected> {
        self.peer_connected.subscribe()
    }

    pub(super) fn subscribe_peer_heartbeat(&self) -> broadcast::Receiver<PeerHeartbeat> {
        self.peer_heartbeat.subscribe()
    }

    pub(super) fn subscribe_peer_disconnected(&self) -> broadcast::Receiver<PeerDisconnected> {
        self.peer_disconnected.subscribe()
    }

    pub(super) fn subscribe_signal(&self) -> broadcast::Receiver<SignalEvent> {
        self.signal.subscribe()
    }

    pub(super) fn emit_room_created(&self, event: RoomCreated) {
        let _ = self.room_created.send(event);
    }

    pub(super) fn emit_room_closed(&self, event: RoomClosed) {
        let _ = self.room_closed.send(event);
    }

    pub(super) fn emit_peer_connected(&self, event: PeerConnected) {
        let _ = self.peer_connected.send(event);
    }

    pub(super) fn emit_peer_heartbeat(&self, event: PeerHeartbeat) {
        let _ = self.peer_heartbeat.send(event);
    }

    pub(super) fn emit_peer_disconnected(&self, event: PeerDisconnected) {
        let _ = self.peer_disconnected.send(event);
    }

    /// Emit a signal event
    ///
    /// Returns the number of receivers the event reached, or 0 if there
    /// are no subscribers.
    pub(super) fn emit_signal(&self, event: SignalEvent) -> usize {
        self.signal.send(event).unwrap_or(0)
    }
}
