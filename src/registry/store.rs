//! Signaling registry implementation
//!
//! The central registry that manages rooms and peers and fans lifecycle
//! events out to transport subscribers.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::{broadcast, RwLock};

use super::config::RegistryConfig;
use super::error::{RegistryError, Result};
use super::event::{
    EventBus, PeerConnected, PeerDisconnected, PeerHeartbeat, RoomClosed, RoomCreated, SignalEvent,
};
use super::room::{Metadata, PeerEntry, RoomEntry, RoomOptions, RoomSnapshot};
use super::signal::{ConnectResult, RelayResult, Signal};

/// Current wall-clock time in milliseconds since the Unix epoch
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

/// Central signaling registry for rooms and peers
///
/// Thread-safe via `RwLock`. Every mutating operation holds the write
/// guard across its whole mutation and event emission, so concurrent
/// operations on one registry instance serialize deterministically: two
/// `connect_peer` calls racing for a room's last slot yield exactly one
/// success and one [`RegistryError::RoomFull`].
///
/// The registry is purely in-memory and performs no media transport, NAT
/// traversal, or peer expiry; an external HTTP or WebSocket layer drives
/// it and routes relayed signals by subscribing to [`on_signal`].
///
/// [`on_signal`]: SignalingRegistry::on_signal
pub struct SignalingRegistry {
    /// Map of room id to room state
    rooms: RwLock<HashMap<String, RoomEntry>>,

    /// Per-event broadcast channels
    events: EventBus,

    /// Configuration, fixed at construction
    config: RegistryConfig,
}

impl SignalingRegistry {
    /// Create a registry with default configuration
    pub fn new() -> Self {
        let config = RegistryConfig::default();
        Self {
            rooms: RwLock::new(HashMap::new()),
            events: EventBus::new(config.event_capacity),
            config,
        }
    }

    /// Create a registry with custom configuration
    ///
    /// Fails with [`RegistryError::InvalidArgument`] if any limit is zero.
    pub fn with_config(config: RegistryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            rooms: RwLock::new(HashMap::new()),
            events: EventBus::new(config.event_capacity),
            config,
        })
    }

    /// Get the registry configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Create a room explicitly
    ///
    /// The id is trimmed and becomes the room's identity. Fails with
    /// [`RegistryError::InvalidArgument`] on an empty id or zero capacity
    /// and [`RegistryError::RoomExists`] on a duplicate id. Emits
    /// `room:created` and returns the new room's state.
    pub async fn create_room(&self, room_id: &str, options: RoomOptions) -> Result<RoomSnapshot> {
        let mut rooms = self.rooms.write().await;
        self.insert_room(&mut rooms, room_id, options)
    }

    /// Connect a peer to a room
    ///
    /// An unknown room is created implicitly with registry defaults; this
    /// is the only implicit-creation path. Fails with
    /// [`RegistryError::PeerAlreadyConnected`] on a duplicate peer id and
    /// [`RegistryError::RoomFull`] at capacity. Emits `peer:connected`.
    ///
    /// The returned `ice_servers` and metadata are independent copies.
    pub async fn connect_peer(
        &self,
        room_id: &str,
        peer_id: &str,
        metadata: Metadata,
    ) -> Result<ConnectResult> {
        let mut rooms = self.rooms.write().await;

        let key = if rooms.contains_key(room_id) {
            room_id.to_string()
        } else {
            self.insert_room(&mut rooms, room_id, RoomOptions::default())?.id
        };
        let room = rooms
            .get_mut(&key)
            .ok_or_else(|| RegistryError::RoomNotFound(key.clone()))?;

        if room.peers.contains_key(peer_id) {
            return Err(RegistryError::PeerAlreadyConnected {
                room_id: room.id.clone(),
                peer_id: peer_id.to_string(),
            });
        }
        if room.is_full() {
            return Err(RegistryError::RoomFull(room.id.clone()));
        }

        let now = now_ms();
        room.peers.insert(
            peer_id.to_string(),
            PeerEntry {
                id: peer_id.to_string(),
                metadata: metadata.clone(),
                last_seen: now,
                joined_at: now,
            },
        );

        self.events.emit_peer_connected(PeerConnected {
            room_id: room.id.clone(),
            peer_id: peer_id.to_string(),
            metadata: metadata.clone(),
        });
        tracing::info!(
            room = %room.id,
            peer = %peer_id,
            peers = room.peers.len(),
            "Peer connected"
        );

        Ok(ConnectResult {
            room_id: room.id.clone(),
            peer_id: peer_id.to_string(),
            heartbeat_interval_ms: self.config.heartbeat_interval_ms,
            ice_servers: self.config.ice_servers.clone(),
            joined_at: now,
            metadata,
            room_metadata: room.metadata.clone(),
        })
    }

    /// Record a liveness ping from a connected peer
    ///
    /// Updates the peer's `last_seen` (never backwards), emits
    /// `peer:heartbeat`, and returns the new value. Fails with
    /// [`RegistryError::RoomNotFound`] or [`RegistryError::PeerNotFound`].
    pub async fn heartbeat(&self, room_id: &str, peer_id: &str) -> Result<u64> {
        let mut rooms = self.rooms.write().await;
        let peer = Self::peer_mut(&mut rooms, room_id, peer_id)?;

        peer.last_seen = peer.last_seen.max(now_ms());
        let last_seen = peer.last_seen;

        self.events.emit_peer_heartbeat(PeerHeartbeat {
            room_id: room_id.to_string(),
            peer_id: peer_id.to_string(),
            last_seen,
        });
        tracing::debug!(room = %room_id, peer = %peer_id, last_seen, "Heartbeat");

        Ok(last_seen)
    }

    /// Relay a signal from a connected peer to all signal subscribers
    ///
    /// The registry does not route by the signal's `to` hint; it notifies
    /// every current `signal` subscriber and reports how many there were.
    /// Fails exactly as [`heartbeat`] when the room or sender is absent.
    ///
    /// [`heartbeat`]: SignalingRegistry::heartbeat
    pub async fn relay(
        &self,
        room_id: &str,
        from_peer_id: &str,
        signal: Signal,
    ) -> Result<RelayResult> {
        let rooms = self.rooms.read().await;
        let room = rooms
            .get(room_id)
            .ok_or_else(|| RegistryError::RoomNotFound(room_id.to_string()))?;
        let peer = room
            .peers
            .get(from_peer_id)
            .ok_or_else(|| RegistryError::PeerNotFound {
                room_id: room_id.to_string(),
                peer_id: from_peer_id.to_string(),
            })?;

        let listeners_notified = self.events.emit_signal(SignalEvent {
            room_id: room.id.clone(),
            from_peer_id: peer.id.clone(),
            signal: signal.clone(),
            metadata: peer.metadata.clone(),
        });
        tracing::debug!(
            room = %room.id,
            peer = %from_peer_id,
            signal_type = %signal.signal_type,
            listeners = listeners_notified,
            "Signal relayed"
        );

        Ok(RelayResult {
            room_id: room.id.clone(),
            from_peer_id: from_peer_id.to_string(),
            signal,
            listeners_notified,
        })
    }

    /// Disconnect a peer from a room
    ///
    /// Returns `false` when the room or peer is already gone; concurrent
    /// disconnects make that a benign outcome, not an error. Emits
    /// `peer:disconnected`, and `room:closed` when the last peer leaves —
    /// an emptied room is removed immediately.
    pub async fn disconnect_peer(&self, room_id: &str, peer_id: &str) -> bool {
        let mut rooms = self.rooms.write().await;

        let now_empty = match rooms.get_mut(room_id) {
            Some(room) => {
                if room.peers.remove(peer_id).is_none() {
                    return false;
                }
                self.events.emit_peer_disconnected(PeerDisconnected {
                    room_id: room.id.clone(),
                    peer_id: peer_id.to_string(),
                });
                tracing::info!(
                    room = %room.id,
                    peer = %peer_id,
                    remaining = room.peers.len(),
                    "Peer disconnected"
                );
                room.peers.is_empty()
            }
            None => return false,
        };

        if now_empty {
            rooms.remove(room_id);
            self.events.emit_room_closed(RoomClosed {
                room_id: room_id.to_string(),
            });
            tracing::info!(room = %room_id, "Room closed");
        }

        true
    }

    /// Get an independent copy of a room's current state
    ///
    /// Returns `None` for an unknown room; polling a possibly-gone room is
    /// a normal caller pattern, not an error.
    pub async fn get_room_snapshot(&self, room_id: &str) -> Option<RoomSnapshot> {
        let rooms = self.rooms.read().await;
        rooms.get(room_id).map(RoomEntry::snapshot)
    }

    /// Get the number of active rooms
    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }

    /// Subscribe to `room:created` events
    pub fn on_room_created(&self) -> broadcast::Receiver<RoomCreated> {
        self.events.subscribe_room_created()
    }

    /// Subscribe to `room:closed` events
    pub fn on_room_closed(&self) -> broadcast::Receiver<RoomClosed> {
        self.events.subscribe_room_closed()
    }

    /// Subscribe to `peer:connected` events
    pub fn on_peer_connected(&self) -> broadcast::Receiver<PeerConnected> {
        self.events.subscribe_peer_connected()
    }

    /// Subscribe to `peer:heartbeat` events
    pub fn on_peer_heartbeat(&self) -> broadcast::Receiver<PeerHeartbeat> {
        self.events.subscribe_peer_heartbeat()
    }

    /// Subscribe to `peer:disconnected` events
    pub fn on_peer_disconnected(&self) -> broadcast::Receiver<PeerDisconnected> {
        self.events.subscribe_peer_disconnected()
    }

    /// Subscribe to `signal` events
    ///
    /// Transports route relayed signals to live connections from here.
    pub fn on_signal(&self) -> broadcast::Receiver<SignalEvent> {
        self.events.subscribe_signal()
    }

    /// Insert a new room, validating id and capacity
    ///
    /// The single guarded create path, shared by `create_room` and the
    /// implicit creation inside `connect_peer`. Emits `room:created`
    /// while the write guard is held.
    fn insert_room(
        &self,
        rooms: &mut HashMap<String, RoomEntry>,
        room_id: &str,
        options: RoomOptions,
    ) -> Result<RoomSnapshot> {
        let id = room_id.trim();
        if id.is_empty() {
            return Err(RegistryError::InvalidArgument(
                "room id must not be empty".into(),
            ));
        }
        if rooms.contains_key(id) {
            return Err(RegistryError::RoomExists(id.to_string()));
        }

        let max_peers = options.max_peers.unwrap_or(self.config.max_peers_per_room);
        if max_peers == 0 {
            return Err(RegistryError::InvalidArgument(
                "max_peers must be greater than 0".into(),
            ));
        }
        let metadata = options.metadata.unwrap_or_default();

        let room = RoomEntry::new(id.to_string(), max_peers, metadata);
        let snapshot = room.snapshot();
        rooms.insert(id.to_string(), room);

        self.events.emit_room_created(RoomCreated {
            room_id: id.to_string(),
            max_peers,
            metadata: snapshot.metadata.clone(),
        });
        tracing::info!(room = %id, max_peers, "Room created");

        Ok(snapshot)
    }

    /// Look up a connected peer, distinguishing a missing room from a
    /// missing peer
    fn peer_mut<'a>(
        rooms: &'a mut HashMap<String, RoomEntry>,
        room_id: &str,
        peer_id: &str,
    ) -> Result<&'a mut PeerEntry> {
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RegistryError::RoomNotFound(room_id.to_string()))?;
        room.peers
            .get_mut(peer_id)
            .ok_or_else(|| RegistryError::PeerNotFound {
                room_id: room_id.to_string(),
                peer_id: peer_id.to_string(),
            })
    }
}

impl Default for SignalingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use tokio::sync::broadcast::error::TryRecvError;

    use super::*;
    use crate::registry::signal::SignalType;

    fn meta(value: serde_json::Value) -> Metadata {
        value.as_object().cloned().unwrap_or_default()
    }

    #[tokio::test]
    async fn test_defaults_and_implicit_room_creation() {
        let registry = SignalingRegistry::new();

        let connection = registry
            .connect_peer("demo", "alice", meta(json!({ "role": "caller" })))
            .await
            .unwrap();

        assert_eq!(connection.heartbeat_interval_ms, 30_000);
        assert!(connection.ice_servers.is_empty());
        assert_eq!(connection.room_id, "demo");

        let snapshot = registry.get_room_snapshot("demo").await.unwrap();
        assert_eq!(snapshot.peers.len(), 1);
        assert_eq!(snapshot.peers[0].id, "alice");
        assert_eq!(snapshot.peers[0].metadata["role"], json!("caller"));
        assert_eq!(registry.room_count().await, 1);
    }

    #[tokio::test]
    async fn test_heartbeat_updates_last_seen() {
        let registry = SignalingRegistry::new();
        let connection = registry
            .connect_peer("demo", "alice", Metadata::new())
            .await
            .unwrap();

        let updated = registry.heartbeat("demo", "alice").await.unwrap();
        assert!(updated >= connection.joined_at);

        let snapshot = registry.get_room_snapshot("demo").await.unwrap();
        assert_eq!(snapshot.peers[0].last_seen, updated);
    }

    #[tokio::test]
    async fn test_custom_config_metadata_and_relay() {
        let registry = SignalingRegistry::with_config(
            RegistryConfig::new()
                .max_peers_per_room(2)
                .heartbeat_interval_ms(1_200)
                .ice_server("stun:staging.example.org"),
        )
        .unwrap();

        let mut created = registry.on_room_created();
        registry
            .create_room(
                "with-meta",
                RoomOptions::new()
                    .max_peers(1)
                    .metadata(meta(json!({ "region": "eu-central" }))),
            )
            .await
            .unwrap();
        assert_eq!(created.recv().await.unwrap().room_id, "with-meta");

        let joined = registry
            .connect_peer("with-meta", "bob", meta(json!({ "role": "host" })))
            .await
            .unwrap();
        assert_eq!(joined.heartbeat_interval_ms, 1_200);
        assert_eq!(joined.ice_servers, ["stun:staging.example.org"]);
        assert_eq!(joined.room_metadata["region"], json!("eu-central"));

        let mut signals = registry.on_signal();
        let relayed = registry
            .relay("with-meta", "bob", Signal::offer(json!({ "sdp": "mock" })))
            .await
            .unwrap();
        assert_eq!(relayed.listeners_notified, 1);

        let event = signals.recv().await.unwrap();
        assert_eq!(event.room_id, "with-meta");
        assert_eq!(event.from_peer_id, "bob");
        assert_eq!(event.signal.signal_type, SignalType::Offer);
        assert_eq!(event.signal.payload, json!({ "sdp": "mock" }));
        assert_eq!(event.metadata["role"], json!("host"));
    }

    #[tokio::test]
    async fn test_construction_rejects_bad_limits() {
        assert!(matches!(
            SignalingRegistry::with_config(RegistryConfig::new().max_peers_per_room(0)),
            Err(RegistryError::InvalidArgument(_))
        ));
        assert!(matches!(
            SignalingRegistry::with_config(RegistryConfig::new().heartbeat_interval_ms(0)),
            Err(RegistryError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_room_invariants() {
        let registry =
            SignalingRegistry::with_config(RegistryConfig::new().max_peers_per_room(1)).unwrap();

        assert!(matches!(
            registry.create_room("   ", RoomOptions::new()).await,
            Err(RegistryError::InvalidArgument(_))
        ));
        assert!(matches!(
            registry
                .create_room("zero", RoomOptions::new().max_peers(0))
                .await,
            Err(RegistryError::InvalidArgument(_))
        ));

        registry.create_room("cap", RoomOptions::new()).await.unwrap();
        assert!(matches!(
            registry.create_room("cap", RoomOptions::new()).await,
            Err(RegistryError::RoomExists(_))
        ));

        registry
            .connect_peer("cap", "alice", Metadata::new())
            .await
            .unwrap();
        assert_eq!(
            registry
                .connect_peer("cap", "alice", Metadata::new())
                .await
                .unwrap_err(),
            RegistryError::PeerAlreadyConnected {
                room_id: "cap".into(),
                peer_id: "alice".into(),
            }
        );
        assert_eq!(
            registry
                .connect_peer("cap", "bob", Metadata::new())
                .await
                .unwrap_err(),
            RegistryError::RoomFull("cap".into())
        );
    }

    #[tokio::test]
    async fn test_not_found_distinguishes_room_from_peer() {
        let registry = SignalingRegistry::new();
        registry
            .connect_peer("cap", "alice", Metadata::new())
            .await
            .unwrap();

        assert_eq!(
            registry.heartbeat("missing", "ghost").await.unwrap_err(),
            RegistryError::RoomNotFound("missing".into())
        );
        assert_eq!(
            registry.heartbeat("cap", "ghost").await.unwrap_err(),
            RegistryError::PeerNotFound {
                room_id: "cap".into(),
                peer_id: "ghost".into(),
            }
        );
        assert!(matches!(
            registry
                .relay("missing", "ghost", Signal::bye(json!(null)))
                .await,
            Err(RegistryError::RoomNotFound(_))
        ));
        assert!(matches!(
            registry.relay("cap", "ghost", Signal::bye(json!(null))).await,
            Err(RegistryError::PeerNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_relay_with_no_subscribers() {
        let registry = SignalingRegistry::new();
        registry
            .connect_peer("quiet", "alice", Metadata::new())
            .await
            .unwrap();

        let relayed = registry
            .relay("quiet", "alice", Signal::candidate(json!({ "candidate": "" })))
            .await
            .unwrap();
        assert_eq!(relayed.listeners_notified, 0);
    }

    #[tokio::test]
    async fn test_relay_counts_subscribers_at_emission_time() {
        let registry = SignalingRegistry::new();
        registry
            .connect_peer("demo", "alice", Metadata::new())
            .await
            .unwrap();

        registry
            .relay("demo", "alice", Signal::offer(json!({ "sdp": "first" })))
            .await
            .unwrap();

        // A subscriber added after a relay sees only later signals
        let mut signals = registry.on_signal();
        let relayed = registry
            .relay("demo", "alice", Signal::offer(json!({ "sdp": "second" })))
            .await
            .unwrap();
        assert_eq!(relayed.listeners_notified, 1);

        let event = signals.recv().await.unwrap();
        assert_eq!(event.signal.payload, json!({ "sdp": "second" }));
        assert!(matches!(signals.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn test_relay_passes_target_hint_through() {
        let registry = SignalingRegistry::new();
        registry
            .connect_peer("demo", "alice", Metadata::new())
            .await
            .unwrap();

        let mut signals = registry.on_signal();
        let relayed = registry
            .relay(
                "demo",
                "alice",
                Signal::answer(json!({ "sdp": "v=0" })).to("bob"),
            )
            .await
            .unwrap();

        // "bob" is not connected; the hint is passed through, never routed on
        assert_eq!(relayed.signal.to.as_deref(), Some("bob"));
        assert_eq!(relayed.listeners_notified, 1);
        assert_eq!(signals.recv().await.unwrap().signal.to.as_deref(), Some("bob"));
    }

    #[tokio::test]
    async fn test_disconnect_tears_down_empty_rooms() {
        let registry = SignalingRegistry::new();
        let mut closed = registry.on_room_closed();

        registry
            .connect_peer("goodbye", "alice", Metadata::new())
            .await
            .unwrap();
        registry
            .connect_peer("goodbye", "bob", Metadata::new())
            .await
            .unwrap();

        assert!(registry.disconnect_peer("goodbye", "alice").await);
        assert!(registry.get_room_snapshot("goodbye").await.is_some());
        assert!(matches!(closed.try_recv(), Err(TryRecvError::Empty)));

        assert!(registry.disconnect_peer("goodbye", "bob").await);
        assert!(registry.get_room_snapshot("goodbye").await.is_none());
        assert_eq!(registry.room_count().await, 0);

        // Exactly one close event, after the second disconnect
        assert_eq!(closed.recv().await.unwrap().room_id, "goodbye");
        assert!(matches!(closed.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn test_disconnect_is_idempotent() {
        let registry = SignalingRegistry::new();
        registry
            .connect_peer("demo", "alice", Metadata::new())
            .await
            .unwrap();

        assert!(!registry.disconnect_peer("missing", "ghost").await);
        assert!(!registry.disconnect_peer("demo", "ghost").await);
        assert!(registry.disconnect_peer("demo", "alice").await);
        assert!(!registry.disconnect_peer("demo", "alice").await);
    }

    #[tokio::test]
    async fn test_connect_result_copies_are_independent() {
        let registry = SignalingRegistry::with_config(
            RegistryConfig::new().ice_server("stun:stun.example.org"),
        )
        .unwrap();

        let mut connection = registry
            .connect_peer("demo", "alice", meta(json!({ "role": "caller" })))
            .await
            .unwrap();
        connection.ice_servers.push("turn:injected.example.org".into());
        connection.metadata.insert("role".into(), json!("tampered"));

        let snapshot = registry.get_room_snapshot("demo").await.unwrap();
        assert_eq!(snapshot.peers[0].metadata["role"], json!("caller"));

        let second = registry
            .connect_peer("demo", "bob", Metadata::new())
            .await
            .unwrap();
        assert_eq!(second.ice_servers, ["stun:stun.example.org"]);
    }

    #[tokio::test]
    async fn test_room_id_is_trimmed_on_implicit_creation() {
        let registry = SignalingRegistry::new();

        let connection = registry
            .connect_peer(" padded ", "alice", Metadata::new())
            .await
            .unwrap();
        assert_eq!(connection.room_id, "padded");
        assert!(registry.get_room_snapshot("padded").await.is_some());
        assert!(registry.get_room_snapshot(" padded ").await.is_none());
    }

    #[tokio::test]
    async fn test_snapshot_lists_peers_in_join_order() {
        let registry = SignalingRegistry::new();
        for id in ["a", "b", "c"] {
            registry
                .connect_peer("ordered", id, Metadata::new())
                .await
                .unwrap();
        }

        let snapshot = registry.get_room_snapshot("ordered").await.unwrap();
        let order: Vec<&str> = snapshot.peers.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_lifecycle_events_arrive_in_mutation_order() {
        let registry = SignalingRegistry::new();
        let mut connected = registry.on_peer_connected();
        let mut heartbeats = registry.on_peer_heartbeat();
        let mut disconnected = registry.on_peer_disconnected();

        registry
            .connect_peer("demo", "alice", Metadata::new())
            .await
            .unwrap();
        registry
            .connect_peer("demo", "bob", Metadata::new())
            .await
            .unwrap();
        let last_seen = registry.heartbeat("demo", "alice").await.unwrap();
        registry.disconnect_peer("demo", "bob").await;

        assert_eq!(connected.recv().await.unwrap().peer_id, "alice");
        assert_eq!(connected.recv().await.unwrap().peer_id, "bob");

        let beat = heartbeats.recv().await.unwrap();
        assert_eq!(beat.peer_id, "alice");
        assert_eq!(beat.last_seen, last_seen);

        assert_eq!(disconnected.recv().await.unwrap().peer_id, "bob");
    }

    #[tokio::test]
    async fn test_capacity_race_yields_one_winner() {
        let registry = Arc::new(
            SignalingRegistry::with_config(RegistryConfig::new().max_peers_per_room(1)).unwrap(),
        );

        let first = tokio::spawn({
            let registry = Arc::clone(&registry);
            async move { registry.connect_peer("race", "alice", Metadata::new()).await }
        });
        let second = tokio::spawn({
            let registry = Arc::clone(&registry);
            async move { registry.connect_peer("race", "bob", Metadata::new()).await }
        });

        let results = [first.await.unwrap(), second.await.unwrap()];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        let loser = results.iter().find(|r| r.is_err()).unwrap();
        assert!(matches!(loser, Err(RegistryError::RoomFull(_))));

        let snapshot = registry.get_room_snapshot("race").await.unwrap();
        assert_eq!(snapshot.peers.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_create_race_yields_one_winner() {
        let registry = Arc::new(SignalingRegistry::new());

        let first = tokio::spawn({
            let registry = Arc::clone(&registry);
            async move { registry.create_room("dup", RoomOptions::new()).await }
        });
        let second = tokio::spawn({
            let registry = Arc::clone(&registry);
            async move { registry.create_room("dup", RoomOptions::new()).await }
        });

        let results = [first.await.unwrap(), second.await.unwrap()];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        let loser = results.iter().find(|r| r.is_err()).unwrap();
        assert!(matches!(loser, Err(RegistryError::RoomExists(_))));
    }
}
