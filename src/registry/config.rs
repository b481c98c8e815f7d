//! Registry configuration

use super::error::{RegistryError, Result};

/// Configuration options for the signaling registry
///
/// Read once at construction; there is no runtime reconfiguration.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// ICE server URIs handed to every connecting peer (opaque to the registry)
    pub ice_servers: Vec<String>,

    /// Default peer capacity for rooms created without an explicit override
    pub max_peers_per_room: usize,

    /// Advisory heartbeat interval communicated to peers, in milliseconds.
    /// The registry never evicts peers itself; stale-peer policy belongs to
    /// the transport.
    pub heartbeat_interval_ms: u64,

    /// Capacity of each per-event broadcast channel
    pub event_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            ice_servers: Vec::new(),
            max_peers_per_room: 8,
            heartbeat_interval_ms: 30_000,
            event_capacity: 64,
        }
    }
}

impl RegistryConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an ICE server URI
    pub fn ice_server(mut self, uri: impl Into<String>) -> Self {
        self.ice_servers.push(uri.into());
        self
    }

    /// Set the default peer capacity for rooms
    pub fn max_peers_per_room(mut self, max: usize) -> Self {
        self.max_peers_per_room = max;
        self
    }

    /// Set the advisory heartbeat interval in milliseconds
    pub fn heartbeat_interval_ms(mut self, interval: u64) -> Self {
        self.heartbeat_interval_ms = interval;
        self
    }

    /// Set the per-event broadcast channel capacity
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// Check that all limits are positive
    ///
    /// A misconfigured registry must never be instantiated, so this runs
    /// at construction time.
    pub fn validate(&self) -> Result<()> {
        if self.max_peers_per_room == 0 {
            return Err(RegistryError::InvalidArgument(
                "max_peers_per_room must be greater than 0".into(),
            ));
        }
        if self.heartbeat_interval_ms == 0 {
            return Err(RegistryError::InvalidArgument(
                "heartbeat_interval_ms must be greater than 0".into(),
            ));
        }
        if self.event_capacity == 0 {
            return Err(RegistryError::InvalidArgument(
                "event_capacity must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
