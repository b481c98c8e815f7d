//! Signal payload and result types
//!
//! This module defines the opaque negotiation payloads relayed between
//! peers and the structured results returned to transport callers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::room::Metadata;

/// Kind of signaling payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalType {
    /// SDP offer
    Offer,
    /// SDP answer
    Answer,
    /// ICE candidate
    Candidate,
    /// Session teardown
    Bye,
    /// Application-defined payload
    Custom,
}

impl std::fmt::Display for SignalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SignalType::Offer => "offer",
            SignalType::Answer => "answer",
            SignalType::Candidate => "candidate",
            SignalType::Bye => "bye",
            SignalType::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// An opaque negotiation payload relayed between peers
///
/// The registry never inspects `payload` and never routes by `to`; both
/// are passed through to signal subscribers unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Kind of payload
    #[serde(rename = "type")]
    pub signal_type: SignalType,

    /// Opaque payload contents
    pub payload: Value,

    /// Optional target peer hint for the transport's own routing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

impl Signal {
    /// Create a signal of the given kind
    pub fn new(signal_type: SignalType, payload: Value) -> Self {
        Self {
            signal_type,
            payload,
            to: None,
        }
    }

    /// Create an SDP offer signal
    pub fn offer(payload: Value) -> Self {
        Self::new(SignalType::Offer, payload)
    }

    /// Create an SDP answer signal
    pub fn answer(payload: Value) -> Self {
        Self::new(SignalType::Answer, payload)
    }

    /// Create an ICE candidate signal
    pub fn candidate(payload: Value) -> Self {
        Self::new(SignalType::Candidate, payload)
    }

    /// Create a teardown signal
    pub fn bye(payload: Value) -> Self {
        Self::new(SignalType::Bye, payload)
    }

    /// Create an application-defined signal
    pub fn custom(payload: Value) -> Self {
        Self::new(SignalType::Custom, payload)
    }

    /// Set the target peer hint
    pub fn to(mut self, peer_id: impl Into<String>) -> Self {
        self.to = Some(peer_id.into());
        self
    }
}

/// Result returned to a successfully connected peer
///
/// `ice_servers`, `metadata` and `room_metadata` are independent copies;
/// nothing the caller does to them reaches registry state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectResult {
    /// Room the peer joined (trimmed id)
    pub room_id: String,
    /// The connecting peer's id
    pub peer_id: String,
    /// Advisory heartbeat interval in milliseconds
    pub heartbeat_interval_ms: u64,
    /// Snapshot copy of the configured ICE server URIs
    pub ice_servers: Vec<String>,
    /// Join time in milliseconds since the Unix epoch
    pub joined_at: u64,
    /// The metadata supplied at connect time
    pub metadata: Metadata,
    /// The room's creation-time metadata
    pub room_metadata: Metadata,
}

/// Result of relaying a signal
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayResult {
    /// Room the signal was relayed in
    pub room_id: String,
    /// Sending peer
    pub from_peer_id: String,
    /// The relayed signal, unchanged
    pub signal: Signal,
    /// Signal subscribers notified during this call. Counts generic
    /// subscribers at emission time; it says nothing about delivery to
    /// any particular peer.
    pub listeners_notified: usize,
}
