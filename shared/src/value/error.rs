use thiserror::Error;

/// Errors that can occur while snapshotting a value tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// The tree nests deeper than the snapshot guard allows
    #[error("Value tree nests deeper than {max_depth} levels and cannot be snapshotted")]
    TooDeep { max_depth: usize },
}
