//! # Hostsync Shared
//! Common functionality shared by every hostsync peer: the value tree,
//! the diff/patch engine, the deterministic RNG, session definitions and
//! the wire protocol.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

mod backends;
mod patch;
mod random;
mod session;
mod suggest;
mod transport;
mod types;
mod value;
mod wire;

pub use backends::Timer;
pub use patch::{
    apply_patch, apply_patches, display_path, generate_diff, Patch, PatchError, Path,
    PathSegment,
};
pub use random::{DeterministicRng, RandomError};
pub use session::{
    ActionContext, ActionDefinition, ActionError, ConfigurationError, SessionBuilder,
    SessionDefinition, SetupContext,
};
pub use suggest::{closest_match, edit_distance, MAX_SUGGESTION_DISTANCE};
pub use transport::{Transport, TransportError, TransportEvent};
pub use types::PeerId;
pub use value::{Value, ValueError, ValueMap, MAX_VALUE_DEPTH};
pub use wire::{
    compression_config::{CompressionConfig, CompressionMode, DEFAULT_MAX_DECODED_SIZE},
    decoder::EnvelopeDecoder,
    encoder::EnvelopeEncoder,
    envelope::{
        ActionPayload, EnvelopeBody, EnvelopeKind, EventPayload, StateSyncPayload, WireContext,
        WireEnvelope,
    },
    error::CodecError,
};
