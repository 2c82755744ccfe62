use std::{default::Default, time::Duration};

use hostsync_shared::PeerId;

/// Interval between two host sync ticks unless configured otherwise
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_millis(50);

/// Contains Config properties which will be used by the Runtime.
/// Fixed for the lifetime of the session.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Whether this peer owns the canonical state
    pub is_host: bool,
    /// Peers known when the session starts, passed to the `setup` hook
    pub initial_peer_ids: Vec<PeerId>,
    /// How often the host diffs and broadcasts state
    pub sync_interval: Duration,
    /// Surface recoverable errors to the caller instead of logging them
    pub strict: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            is_host: false,
            initial_peer_ids: Vec::new(),
            sync_interval: DEFAULT_SYNC_INTERVAL,
            strict: false,
        }
    }
}

impl SessionConfig {
    /// Default configuration for the session's host
    pub fn host() -> Self {
        Self {
            is_host: true,
            ..Self::default()
        }
    }

    /// Default configuration for a mirroring peer
    pub fn peer() -> Self {
        Self::default()
    }
}

impl SessionConfig {
    pub fn with_host(mut self, is_host: bool) -> Self {
        self.is_host = is_host;
        self
    }

    pub fn with_initial_peers<I, P>(mut self, peer_ids: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PeerId>,
    {
        self.initial_peer_ids = peer_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sync_interval(mut self, sync_interval: Duration) -> Self {
        self.sync_interval = sync_interval;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
