use thiserror::Error;

use crate::CodecError;

/// Errors a Transport reports back to the runtime
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The envelope could not be delivered to the given peer
    #[error("Failed to send envelope to {target}: {reason}")]
    SendFailed { target: String, reason: String },

    /// The transport has been disconnected and no longer carries envelopes
    #[error("Transport is disconnected")]
    Disconnected,

    /// Envelope bytes could not be encoded or decoded
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
}
