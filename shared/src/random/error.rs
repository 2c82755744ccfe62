use thiserror::Error;

/// Errors that can occur when drawing from a DeterministicRng
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RandomError {
    /// Attempted to choose an element from an empty collection
    #[error("Cannot choose from an empty collection")]
    EmptyCollection,

    /// Weighted choice over weights that contain no positive finite value
    #[error("Weighted choice requires at least one positive, finite weight")]
    InvalidWeights,
}
