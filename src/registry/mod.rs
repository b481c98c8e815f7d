//! Room and peer registry for WebRTC signaling
//!
//! The registry owns all room and peer state and fans lifecycle events out
//! to transport subscribers. It uses one `tokio::sync::broadcast` channel
//! per event kind, so subscribers only receive what they asked for and a
//! slow subscriber never blocks the registry or its peers.
//!
//! # Architecture
//!
//! ```text
//!                     Arc<SignalingRegistry>
//!                ┌──────────────────────────────┐
//!                │ rooms: RwLock<HashMap<       │
//!                │   String, RoomEntry {        │
//!                │     peers: HashMap<..>,      │
//!                │   }                          │
//!                │ >>                           │
//!                └──────────────┬───────────────┘
//!                               │
//!         ┌─────────────────────┼─────────────────────┐
//!         │                     │                     │
//!         ▼                     ▼                     ▼
//!    [HTTP route]          [WS gateway]          [WS gateway]
//!    connect_peer()        on_signal().recv()    on_signal().recv()
//!         │                     │                     │
//!         └──► registry.relay() ──► broadcast ──► socket push
//! ```
//!
//! # Event ordering
//!
//! Every mutating operation emits its events while still holding the
//! registry's write guard. `broadcast::Sender::send` never blocks and
//! never runs subscriber code, so subscribers observe events in exactly
//! the order state changed, and a subscriber that calls back into the
//! registry cannot deadlock.

pub mod config;
pub mod error;
pub mod event;
pub mod room;
pub mod signal;
pub mod store;

pub use config::RegistryConfig;
pub use error::{RegistryError, Result};
pub use event::{
    PeerConnected, PeerDisconnected, PeerHeartbeat, RoomClosed, RoomCreated, SignalEvent,
};
pub use room::{Metadata, PeerSnapshot, RoomOptions, RoomSnapshot};
pub use signal::{ConnectResult, RelayResult, Signal, SignalType};
pub use store::SignalingRegistry;
