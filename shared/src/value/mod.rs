//! # Value tree
//! The dynamically shaped session state: a closed tagged union of null,
//! boolean, number, string, list and string-keyed map.
//!
//! Maps are stored in a [`BTreeMap`], so iteration order is stable across
//! processes and diffs over the same pair of snapshots are always emitted
//! in the same order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub mod error;
mod json;

pub use error::ValueError;

use crate::patch::PathSegment;

/// Deepest nesting accepted by [`Value::deep_clone`]
///
/// Kept well under serde_json's 128-level recursion limit so a snapshot
/// still decodes once a state_sync envelope wraps it in its own levels.
pub const MAX_VALUE_DEPTH: usize = 100;

pub type ValueMap = BTreeMap<String, Value>;

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<Value>),
    Map(ValueMap),
}

impl Value {
    pub fn empty_map() -> Self {
        Value::Map(ValueMap::new())
    }

    pub fn empty_list() -> Self {
        Value::List(Vec::new())
    }

    /// Produces a structurally identical, fully independent copy of this
    /// tree. Fails instead of recursing past [`MAX_VALUE_DEPTH`] levels.
    pub fn deep_clone(&self) -> Result<Value, ValueError> {
        self.check_depth(0)?;
        Ok(self.clone())
    }

    fn check_depth(&self, depth: usize) -> Result<(), ValueError> {
        if depth > MAX_VALUE_DEPTH {
            return Err(ValueError::TooDeep {
                max_depth: MAX_VALUE_DEPTH,
            });
        }
        match self {
            Value::List(items) => {
                for item in items {
                    item.check_depth(depth + 1)?;
                }
            }
            Value::Map(map) => {
                for item in map.values() {
                    item.check_depth(depth + 1)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Name of the variant, used in error messages and logs
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Whether both values are the same variant, regardless of contents
    pub fn same_kind(&self, other: &Value) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Number truncated toward zero, if this is a finite number
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(value) if value.is_finite() => Some(value.trunc() as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut ValueMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Map field lookup; `None` for missing keys and non-map values
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.as_map_mut().and_then(|map| map.get_mut(key))
    }

    /// Inserts `value` under `key`, returning the previous value. A
    /// non-map value is first replaced by an empty map.
    pub fn insert<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) -> Option<Value> {
        if !matches!(self, Value::Map(_)) {
            *self = Value::empty_map();
        }
        match self {
            Value::Map(map) => map.insert(key.into(), value.into()),
            _ => None,
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.as_map_mut().and_then(|map| map.remove(key))
    }

    /// Follows `path` from this node. Map keys and list indices are both
    /// accepted for either container, as long as they resolve.
    pub fn get_path(&self, path: &[PathSegment]) -> Option<&Value> {
        let mut current = self;
        for segment in path {
            current = match current {
                Value::Map(map) => map.get(segment.as_key().as_ref())?,
                Value::List(items) => items.get(segment.as_index()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    pub fn get_path_mut(&mut self, path: &[PathSegment]) -> Option<&mut Value> {
        let mut current = self;
        for segment in path {
            current = match current {
                Value::Map(map) => map.get_mut(segment.as_key().as_ref())?,
                Value::List(items) => items.get_mut(segment.as_index()?)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

// Conversions

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<ValueMap> for Value {
    fn from(map: ValueMap) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Value::Null,
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
