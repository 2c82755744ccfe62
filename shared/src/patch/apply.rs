use crate::Value;

use super::{
    error::PatchError,
    patch::{display_path, Patch, PathSegment},
};

/// Replays one patch onto `state`.
///
/// Missing interior map keys are created as empty maps on the way down.
/// An empty path is always rejected with [`PatchError::EmptyPath`].
pub fn apply_patch(state: &mut Value, patch: &Patch) -> Result<(), PatchError> {
    let op = patch.op_name();
    let path = patch.path();
    let Some((last, interior)) = path.split_last() else {
        return Err(PatchError::EmptyPath { op });
    };

    let invalid = |reason: String| PatchError::InvalidPath {
        op,
        path: display_path(path),
        reason,
    };

    let mut current = state;
    for (depth, segment) in interior.iter().enumerate() {
        current = match current {
            Value::Map(map) => map
                .entry(segment.as_key().into_owned())
                .or_insert_with(Value::empty_map),
            Value::List(items) => {
                let len = items.len();
                let Some(index) = segment.as_index() else {
                    return Err(invalid(format!("segment {} is not a list index", segment)));
                };
                if index == len {
                    items.push(Value::empty_map());
                }
                match items.get_mut(index) {
                    Some(item) => item,
                    None => {
                        return Err(invalid(format!(
                            "index {} is out of bounds for list of length {}",
                            index, len
                        )))
                    }
                }
            }
            other => {
                return Err(invalid(format!(
                    "cannot descend into {} at depth {}",
                    other.kind_name(),
                    depth
                )))
            }
        };
    }

    match patch {
        Patch::Add { value, .. } | Patch::Replace { value, .. } => {
            set_child(current, last, value.clone()).map_err(invalid)
        }
        Patch::Remove { .. } => remove_child(current, last).map_err(invalid),
    }
}

/// Replays `patches` in order, stopping at the first failure
pub fn apply_patches(state: &mut Value, patches: &[Patch]) -> Result<(), PatchError> {
    for patch in patches {
        apply_patch(state, patch)?;
    }
    Ok(())
}

fn set_child(parent: &mut Value, segment: &PathSegment, value: Value) -> Result<(), String> {
    match parent {
        Value::Map(map) => {
            map.insert(segment.as_key().into_owned(), value);
            Ok(())
        }
        Value::List(items) => {
            let len = items.len();
            let index = segment
                .as_index()
                .ok_or_else(|| format!("segment {} is not a list index", segment))?;
            if index < len {
                items[index] = value;
            } else if index == len {
                items.push(value);
            } else {
                return Err(format!(
                    "index {} is out of bounds for list of length {}",
                    index, len
                ));
            }
            Ok(())
        }
        other => Err(format!("cannot set a field on {}", other.kind_name())),
    }
}

// Removing something that is already gone is not an error
fn remove_child(parent: &mut Value, segment: &PathSegment) -> Result<(), String> {
    match parent {
        Value::Map(map) => {
            map.remove(segment.as_key().as_ref());
            Ok(())
        }
        Value::List(items) => {
            let index = segment
                .as_index()
                .ok_or_else(|| format!("segment {} is not a list index", segment))?;
            if index < items.len() {
                items.remove(index);
            }
            Ok(())
        }
        other => Err(format!("cannot remove a field from {}", other.kind_name())),
    }
}
