//! WebRTC signaling coordinator
//!
//! An in-memory registry of rooms and peers: peers discover each other,
//! exchange opaque signaling payloads (offers, answers, ICE candidates),
//! and maintain liveness via heartbeats. The registry performs no media
//! transport, NAT traversal, or persistence — an external HTTP or
//! WebSocket layer drives it and routes relayed signals to live
//! connections by subscribing to registry events.
//!
//! Peer expiry is also the transport's job: the registry hands every
//! connecting peer an advisory heartbeat interval and records last-seen
//! timestamps, but never evicts anyone itself.
//!
//! # Example
//!
//! ```
//! use rtc_rs::{Signal, SignalingRegistry};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), rtc_rs::RegistryError> {
//! let registry = SignalingRegistry::new();
//! let mut signals = registry.on_signal();
//!
//! // Rooms are created implicitly on first connect
//! registry.connect_peer("demo", "alice", Default::default()).await?;
//! registry
//!     .relay("demo", "alice", Signal::offer(json!({ "sdp": "v=0..." })))
//!     .await?;
//!
//! let event = signals.recv().await.expect("signal event");
//! assert_eq!(event.from_peer_id, "alice");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod registry;

pub use registry::{
    ConnectResult, Metadata, PeerConnected, PeerDisconnected, PeerHeartbeat, PeerSnapshot,
    RegistryConfig, RegistryError, RelayResult, RoomClosed, RoomCreated, RoomOptions, RoomSnapshot,
    Signal, SignalEvent, SignalType, SignalingRegistry,
};
