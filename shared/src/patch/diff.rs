use log::trace;

use crate::Value;

use super::patch::{Patch, Path, PathSegment};

/// Computes the ordered patches that turn `old` into `new`.
///
/// Returns `None` when the difference sits at the root itself (the roots
/// are different variants, different-length lists, or unequal scalars):
/// a patch can never address the root, so the caller must ship the whole
/// new value instead. Identical trees yield `Some` of an empty list.
pub fn generate_diff(old: &Value, new: &Value) -> Option<Vec<Patch>> {
    if replaces_whole(old, new) {
        return None;
    }

    let mut patches = Vec::new();
    let mut path = Path::new();
    diff_into(old, new, &mut path, &mut patches);
    trace!("generate_diff: {} patches", patches.len());
    Some(patches)
}

// Whether comparing these two nodes ends in a single `replace` of `new`
// rather than a recursive walk
fn replaces_whole(old: &Value, new: &Value) -> bool {
    match (old, new) {
        (Value::List(old_items), Value::List(new_items)) => old_items.len() != new_items.len(),
        (Value::Map(_), Value::Map(_)) => false,
        _ => !old.same_kind(new) || old != new,
    }
}

fn diff_into(old: &Value, new: &Value, path: &mut Path, patches: &mut Vec<Patch>) {
    match (old, new) {
        (Value::List(old_items), Value::List(new_items)) if old_items.len() == new_items.len() => {
            for (index, (old_item, new_item)) in old_items.iter().zip(new_items).enumerate() {
                path.push(PathSegment::Index(index));
                diff_into(old_item, new_item, path, patches);
                path.pop();
            }
        }
        (Value::Map(old_map), Value::Map(new_map)) => {
            for (key, old_item) in old_map {
                path.push(PathSegment::Key(key.clone()));
                match new_map.get(key) {
                    Some(new_item) => diff_into(old_item, new_item, path, patches),
                    None => patches.push(Patch::remove(path.clone())),
                }
                path.pop();
            }
            for (key, new_item) in new_map {
                if old_map.contains_key(key) {
                    continue;
                }
                path.push(PathSegment::Key(key.clone()));
                patches.push(Patch::add(path.clone(), new_item.clone()));
                path.pop();
            }
        }
        _ => {
            if replaces_whole(old, new) {
                patches.push(Patch::replace(path.clone(), new.clone()));
            }
        }
    }
}
