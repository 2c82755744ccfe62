use thiserror::Error;

use hostsync_shared::{ConfigurationError, PatchError, TransportError, ValueError};

/// Everything a [`Runtime`](crate::Runtime) operation can report.
///
/// Whether an error reaches the caller depends on `SessionConfig::strict`:
/// recoverable errors are logged and swallowed unless strict mode is on,
/// while fatal ones (see [`RuntimeError::is_fatal`]) always propagate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// The session definition is invalid
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A submitted or received action name is not registered
    #[error("Unknown action '{name}'{}", suggestion_suffix(.suggestion))]
    UnknownAction {
        name: String,
        suggestion: Option<String>,
    },

    /// Action input failed the action's input schema
    #[error("Invalid input for action '{action}': {reason}")]
    InvalidInput { action: String, reason: String },

    /// The action's apply function returned an error. State may have been
    /// partially mutated before it did.
    #[error("Action '{action}' failed to apply: {reason}")]
    ActionRejected { action: String, reason: String },

    /// A host-only operation was invoked on a non-host peer
    #[error("Cannot {operation} on a non-host peer. Only the host may write canonical state")]
    PrivilegeViolation { operation: &'static str },

    /// A patch with an empty path arrived; the patch stream is corrupt
    #[error("Malformed patch stream: {0}")]
    MalformedPatch(PatchError),

    /// A patch could not be resolved against the local mirror
    #[error("Failed to apply patch: {0}")]
    InvalidPatch(PatchError),

    /// The transport failed to send or receive
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// State could not be snapshotted
    #[error("Snapshot error: {0}")]
    Value(#[from] ValueError),

    /// The runtime was destroyed and no longer accepts operations
    #[error("Cannot {operation} after the runtime was destroyed")]
    Destroyed { operation: &'static str },
}

impl RuntimeError {
    /// Fatal errors propagate even when strict mode is off
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RuntimeError::Configuration(_) | RuntimeError::MalformedPatch(_) | RuntimeError::Value(_)
        )
    }
}

impl From<PatchError> for RuntimeError {
    fn from(error: PatchError) -> Self {
        if error.is_malformed() {
            RuntimeError::MalformedPatch(error)
        } else {
            RuntimeError::InvalidPatch(error)
        }
    }
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(suggestion) => format!(". Did you mean '{}'?", suggestion),
        None => String::new(),
    }
}
