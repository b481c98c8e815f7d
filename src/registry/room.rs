//! Room and peer state types
//!
//! This module defines the per-room state stored in the registry and the
//! read-only snapshots handed out to callers.

use std::collections::HashMap;

use serde::Serialize;

/// Opaque string-keyed metadata attached to rooms and peers
///
/// The registry stores and returns these blobs verbatim; it never
/// interprets their contents.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// State for a single connected peer
#[derive(Debug, Clone)]
pub(super) struct PeerEntry {
    /// Peer id, unique within its room
    pub id: String,

    /// Metadata supplied at connect time
    pub metadata: Metadata,

    /// Last liveness update in milliseconds since the Unix epoch.
    /// Never decreases, even if the wall clock steps backwards.
    pub last_seen: u64,

    /// Join time, fixed for the peer's lifetime
    pub joined_at: u64,
}

/// State for a single room in the registry
///
/// A room only exists while it has at least one peer (except for the
/// window between explicit creation and first connect); the registry
/// removes it the instant its last peer disconnects.
#[derive(Debug)]
pub(super) struct RoomEntry {
    /// Room id (trimmed), unique across the registry
    pub id: String,

    /// Peer capacity, fixed at creation
    pub max_peers: usize,

    /// Creation-time metadata
    pub metadata: Metadata,

    /// Connected peers, keyed by peer id
    pub peers: HashMap<String, PeerEntry>,
}

impl RoomEntry {
    /// Create an empty room
    pub(super) fn new(id: String, max_peers: usize, metadata: Metadata) -> Self {
        Self {
            id,
            max_peers,
            metadata,
            peers: HashMap::new(),
        }
    }

    /// Check whether the room is at capacity
    pub(super) fn is_full(&self) -> bool {
        self.peers.len() >= self.max_peers
    }

    /// Produce an independent copy of the room's current state
    ///
    /// Peers are ordered by join time (peer id as tie-break) so the order
    /// is stable within a snapshot.
    pub(super) fn snapshot(&self) -> RoomSnapshot {
        let mut entries: Vec<&PeerEntry> = self.peers.values().collect();
        entries.sort_by(|a, b| a.joined_at.cmp(&b.joined_at).then_with(|| a.id.cmp(&b.id)));

        RoomSnapshot {
            id: self.id.clone(),
            max_peers: self.max_peers,
            metadata: self.metadata.clone(),
            peers: entries
                .into_iter()
                .map(|peer| PeerSnapshot {
                    id: peer.id.clone(),
                    metadata: peer.metadata.clone(),
                    last_seen: peer.last_seen,
                })
                .collect(),
        }
    }
}

/// Options for creating a room
#[derive(Debug, Clone, Default)]
pub struct RoomOptions {
    /// Peer capacity override; the registry default applies when `None`
    pub max_peers: Option<usize>,

    /// Creation-time metadata; empty when `None`
    pub metadata: Option<Metadata>,
}

impl RoomOptions {
    /// Create options with registry defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the peer capacity
    pub fn max_peers(mut self, max: usize) -> Self {
        self.max_peers = Some(max);
        self
    }

    /// Attach creation-time metadata
    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Read-only copy of a peer's state
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerSnapshot {
    /// Peer id
    pub id: String,
    /// Connect-time metadata
    pub metadata: Metadata,
    /// Last liveness update in milliseconds since the Unix epoch
    pub last_seen: u64,
}

/// Read-only copy of a room's state
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    /// Room id
    pub id: String,
    /// Peer capacity
    pub max_peers: usize,
    /// Creation-time metadata
    pub metadata: Metadata,
    /// Peer summaries in join order
    pub peers: Vec<PeerSnapshot>,
}
