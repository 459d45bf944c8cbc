//! JSON codec for JSON Patch operations.
//!
//! Converts operations to and from the RFC 6902 wire form.

use serde_json::{json, Value as JsonValue};

use crate::codec::CodecError;
use crate::json_patch::types::{Operation, PatchDocument, Pointer};

/// Serialize an operation to its RFC 6902 object.
pub fn to_json(op: &Operation) -> JsonValue {
    match op {
        Operation::Add { path, value } => json!({
            "op": "add",
            "path": path.to_string(),
            "value": JsonValue::from(value),
        }),
        Operation::Remove { path } => json!({
            "op": "remove",
            "path": path.to_string(),
        }),
        Operation::Replace { path, value } => json!({
            "op": "replace",
            "path": path.to_string(),
            "value": JsonValue::from(value),
        }),
        Operation::Move { from, path } => json!({
            "op": "move",
            "from": from.to_string(),
            "path": path.to_string(),
        }),
        Operation::Copy { from, path } => json!({
            "op": "copy",
            "from": from.to_string(),
            "path": path.to_string(),
        }),
        Operation::Test { path, value } => json!({
            "op": "test",
            "path": path.to_string(),
            "value": JsonValue::from(value),
        }),
    }
}

/// Serialize a patch document to a JSON array.
pub fn to_json_patch(document: &PatchDocument) -> JsonValue {
    JsonValue::Array(document.iter().map(to_json).collect())
}

/// Decode one operation object.
///
/// Unknown members are ignored. An unknown `op`, a missing required member,
/// or an invalid pointer is an error.
pub fn from_json(value: JsonValue) -> Result<Operation, serde_json::Error> {
    serde_json::from_value(value)
}

/// Decode an `application/json-patch+json` body.
///
/// The body must be a JSON array. Errors in an element name its index.
/// An empty array is a valid, no-op patch.
pub fn from_json_patch(body: &[u8]) -> Result<PatchDocument, CodecError> {
    let raw: Vec<JsonValue> =
        serde_json::from_slice(body).map_err(|source| CodecError::Malformed {
            context: "patch body".into(),
            source,
        })?;
    raw.into_iter()
        .enumerate()
        .map(|(index, op)| {
            check_pointers(&op, index)?;
            from_json(op).map_err(|source| CodecError::Malformed {
                context: format!("operation [index = {index}]"),
                source,
            })
        })
        .collect()
}

/// Reject a malformed `path` or `from` member as [`CodecError::InvalidPointer`].
fn check_pointers(op: &JsonValue, index: usize) -> Result<(), CodecError> {
    for member in ["from", "path"] {
        if let Some(JsonValue::String(text)) = op.get(member) {
            Pointer::parse(text).map_err(|source| CodecError::InvalidPointer { index, source })?;
        }
    }
    Ok(())
}
