//! Registry error types
//!
//! Error types for signaling registry operations.

use thiserror::Error;

/// Error type for registry operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Malformed caller input (empty room id, non-positive limits)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A room with this id already exists
    #[error("room {0} already exists")]
    RoomExists(String),

    /// The peer is already connected to the room
    #[error("peer {peer_id} already connected to room {room_id}")]
    PeerAlreadyConnected {
        /// Room the peer tried to join
        room_id: String,
        /// Offending peer id
        peer_id: String,
    },

    /// The room is at capacity
    #[error("room {0} is full")]
    RoomFull(String),

    /// The referenced room does not exist
    #[error("room {0} does not exist")]
    RoomNotFound(String),

    /// The room exists but the peer is not connected to it
    #[error("peer {peer_id} is not connected to room {room_id}")]
    PeerNotFound {
        /// Room that was looked up
        room_id: String,
        /// Missing peer id
        peer_id: String,
    },
}

/// Convenience alias for registry operation results
pub type Result<T> = std::result::Result<T, RegistryError>;
