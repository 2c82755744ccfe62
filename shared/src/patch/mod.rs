//! # Diff/Patch engine
//! [`generate_diff`] walks two snapshots of the value tree and emits the
//! ordered [`Patch`] list that turns the first into the second;
//! [`apply_patch`] replays such a list onto a mirror.
//!
//! Lists are compared positionally. A list whose length changed is
//! replaced wholesale rather than reconciled element by element.

mod apply;
mod diff;
pub mod error;
mod patch;

pub use apply::{apply_patch, apply_patches};
pub use diff::generate_diff;
pub use error::PatchError;
pub use patch::{display_path, Patch, Path, PathSegment};
