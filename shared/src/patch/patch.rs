use std::{borrow::Cow, fmt};

use serde::{Deserialize, Serialize};

use crate::Value;

/// One step of a path into a value tree: a map key or a list index
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

impl PathSegment {
    /// The segment as a map key; indices are rendered in decimal
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            PathSegment::Key(key) => Cow::Borrowed(key.as_str()),
            PathSegment::Index(index) => Cow::Owned(index.to_string()),
        }
    }

    /// The segment as a list index; keys are accepted if they parse
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathSegment::Index(index) => Some(*index),
            PathSegment::Key(key) => key.parse().ok(),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{:?}", key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

pub type Path = Vec<PathSegment>;

/// Renders a path as `[a, 0, b]` for logs and error messages
pub fn display_path(path: &[PathSegment]) -> String {
    let segments: Vec<String> = path.iter().map(ToString::to_string).collect();
    format!("[{}]", segments.join(", "))
}

/// One elementary edit addressed by a path into the value tree.
///
/// Serialized as `{ "op": "add" | "remove" | "replace", "path": [...], "value"?: ... }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Patch {
    Add { path: Path, value: Value },
    Remove { path: Path },
    Replace { path: Path, value: Value },
}

impl Patch {
    pub fn add(path: Path, value: Value) -> Self {
        Patch::Add { path, value }
    }

    pub fn remove(path: Path) -> Self {
        Patch::Remove { path }
    }

    pub fn replace(path: Path, value: Value) -> Self {
        Patch::Replace { path, value }
    }

    pub fn op_name(&self) -> &'static str {
        match self {
            Patch::Add { .. } => "add",
            Patch::Remove { .. } => "remove",
            Patch::Replace { .. } => "replace",
        }
    }

    pub fn path(&self) -> &[PathSegment] {
        match self {
            Patch::Add { path, .. } | Patch::Remove { path } | Patch::Replace { path, .. } => path,
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Patch::Add { value, .. } | Patch::Replace { value, .. } => Some(value),
            Patch::Remove { .. } => None,
        }
    }
}

impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op_name(), display_path(self.path()))
    }
}
