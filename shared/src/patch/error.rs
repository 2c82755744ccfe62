use thiserror::Error;

/// Errors that can occur while replaying a patch onto a value tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    /// A patch addressed the root. Diffs never produce one, so this means
    /// the patch stream itself is corrupt.
    #[error("Malformed patch: `{op}` has an empty path and cannot target the root")]
    EmptyPath { op: &'static str },

    /// A path segment could not be resolved against the current tree
    #[error("Cannot apply `{op}` at {path}: {reason}")]
    InvalidPath {
        op: &'static str,
        path: String,
        reason: String,
    },
}

impl PatchError {
    /// Whether this error indicates a corrupted protocol stream rather than
    /// a divergence between the local mirror and the host
    pub fn is_malformed(&self) -> bool {
        matches!(self, PatchError::EmptyPath { .. })
    }
}
