//! # Hostsync Runtime
//! A host-authoritative state replication runtime. One peer, the host, owns
//! the canonical session state and applies actions to it; every other peer
//! mirrors that state by replaying the diffs the host broadcasts.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use hostsync_shared::{
        apply_patch, apply_patches, generate_diff, ActionContext, ActionDefinition, ActionError,
        CompressionConfig, CompressionMode, ConfigurationError, DeterministicRng,
        EnvelopeDecoder, EnvelopeEncoder, Patch, PatchError, PathSegment, PeerId,
        SessionBuilder, SessionDefinition, SetupContext, Transport, TransportError,
        TransportEvent, Value, WireEnvelope,
    };
}

mod action_router;
mod error;
mod host_authority;
mod listeners;
mod runtime;
mod sync_scheduler;

pub use action_router::ACTION_SEED_START;
pub use error::RuntimeError;
pub use listeners::ListenerKey;
pub use runtime::{Runtime, SessionConfig, DEFAULT_SYNC_INTERVAL};
