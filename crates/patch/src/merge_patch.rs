//! JSON Merge Patch (RFC 7396).
//!
//! - Objects merge recursively.
//! - A `null` member deletes the key from the target.
//! - Arrays and scalars replace the target wholesale.

use serde::{Deserialize, Serialize};
use tracing::trace;
use vacancy_value::{Map, Value};

/// A merge patch document.
///
/// Any value is a valid merge patch; only objects merge, everything else
/// replaces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MergeDocument(Value);

impl MergeDocument {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for MergeDocument {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Apply a merge patch to `root`, producing a new document.
///
/// Total: every pair of values has a result.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use vacancy_patch::{merge_patch, MergeDocument};
/// use vacancy_value::Value;
///
/// let target = Value::from(json!({"id": "1", "name": "X", "salary": {"min": 1}}));
/// let patch = MergeDocument::from(Value::from(json!({"name": null, "salary": {"max": 2}})));
/// assert_eq!(
///     merge_patch(&target, &patch),
///     Value::from(json!({"id": "1", "salary": {"min": 1, "max": 2}}))
/// );
/// ```
pub fn merge_patch(root: &Value, document: &MergeDocument) -> Value {
    merge_value(root.clone(), &document.0)
}

fn merge_value(target: Value, patch: &Value) -> Value {
    let Value::Object(patch_map) = patch else {
        return patch.clone();
    };

    // A non-object target is discarded, so nulls nested in newly inserted
    // objects are stripped the same way as nulls at the top.
    let mut target_map = match target {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    for (key, patch_value) in patch_map {
        if patch_value.is_null() {
            trace!(key = key.as_str(), "merge removes member");
            target_map.shift_remove(key);
            continue;
        }
        let merged = match target_map.get_mut(key) {
            Some(existing) => merge_value(std::mem::take(existing), patch_value),
            None => merge_value(Value::Null, patch_value),
        };
        target_map.insert(key.clone(), merged);
    }
    Value::Object(target_map)
}
