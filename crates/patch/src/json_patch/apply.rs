//! JSON Patch apply logic.

use tracing::trace;
use vacancy_json_pointer::{resolve, resolve_mut, LocationMut, Pointer, PointerError};
use vacancy_value::Value;

use super::types::{OpError, Operation, PatchDocument, PatchError};

// ── Individual operation applicators ─────────────────────────────────────

fn apply_add(doc: &mut Value, path: &Pointer, value: Value) -> Result<(), PointerError> {
    match resolve_mut(doc, path)? {
        LocationMut::Root(root) => *root = value,
        LocationMut::ObjectKey { parent, key } => {
            parent.insert(key.to_string(), value);
        }
        LocationMut::ArrayIndex { parent, index } => {
            if index > parent.len() {
                return Err(out_of_range(path, index, parent.len()));
            }
            parent.insert(index, value);
        }
        LocationMut::ArrayAppend { parent } => parent.push(value),
    }
    Ok(())
}

fn apply_remove(doc: &mut Value, path: &Pointer) -> Result<Value, PointerError> {
    match resolve_mut(doc, path)? {
        LocationMut::Root(_) => Err(PointerError::InvalidLocation {
            pointer: path.to_string(),
            reason: "the document root cannot be removed",
        }),
        LocationMut::ObjectKey { parent, key } => parent
            .shift_remove(key)
            .ok_or_else(|| not_found(path)),
        LocationMut::ArrayIndex { parent, index } => {
            if index >= parent.len() {
                return Err(out_of_range(path, index, parent.len()));
            }
            Ok(parent.remove(index))
        }
        LocationMut::ArrayAppend { .. } => Err(append_not_allowed(path)),
    }
}

fn apply_replace(doc: &mut Value, path: &Pointer, value: Value) -> Result<(), PointerError> {
    let slot = match resolve_mut(doc, path)? {
        LocationMut::Root(root) => root,
        LocationMut::ObjectKey { parent, key } => {
            parent.get_mut(key).ok_or_else(|| not_found(path))?
        }
        LocationMut::ArrayIndex { parent, index } => {
            parent.get_mut(index).ok_or_else(|| not_found(path))?
        }
        LocationMut::ArrayAppend { .. } => return Err(append_not_allowed(path)),
    };
    *slot = value;
    Ok(())
}

fn apply_copy(doc: &mut Value, from: &Pointer, path: &Pointer) -> Result<(), PointerError> {
    let value = resolve(doc, from)?.existing(from)?.clone();
    apply_add(doc, path, value)
}

fn apply_move(doc: &mut Value, from: &Pointer, path: &Pointer) -> Result<(), PointerError> {
    if path.is_descendant_of(from) {
        return Err(PointerError::InvalidLocation {
            pointer: path.to_string(),
            reason: "a value cannot be moved into its own subtree",
        });
    }
    resolve(doc, from)?.existing(from)?;
    if path == from {
        return Ok(());
    }
    let value = apply_remove(doc, from)?;
    apply_add(doc, path, value)
}

fn apply_test(doc: &Value, path: &Pointer, expected: &Value) -> Result<(), OpError> {
    let actual = resolve(doc, path)?.existing(path)?;
    if actual != expected {
        return Err(OpError::TestFailed {
            pointer: path.to_string(),
            expected: expected.clone(),
            actual: actual.clone(),
        });
    }
    Ok(())
}

fn not_found(path: &Pointer) -> PointerError {
    PointerError::PathNotFound {
        pointer: path.to_string(),
    }
}

fn out_of_range(path: &Pointer, index: usize, len: usize) -> PointerError {
    PointerError::IndexOutOfRange {
        pointer: path.to_string(),
        index,
        len,
    }
}

fn append_not_allowed(path: &Pointer) -> PointerError {
    PointerError::InvalidLocation {
        pointer: path.to_string(),
        reason: "`-` does not address an existing element",
    }
}

// ── Main apply function ───────────────────────────────────────────────────

/// Apply a single operation to the document in place.
///
/// On error the document may be partially edited; callers that need
/// atomicity go through [`apply_ops`] or [`apply_patch`].
pub fn apply_op(doc: &mut Value, op: &Operation) -> Result<(), OpError> {
    match op {
        Operation::Add { path, value } => apply_add(doc, path, value.clone())?,
        Operation::Remove { path } => {
            apply_remove(doc, path)?;
        }
        Operation::Replace { path, value } => apply_replace(doc, path, value.clone())?,
        Operation::Move { from, path } => apply_move(doc, from, path)?,
        Operation::Copy { from, path } => apply_copy(doc, from, path)?,
        Operation::Test { path, value } => apply_test(doc, path, value)?,
    }
    Ok(())
}

/// Apply a sequence of operations to an owned working document.
///
/// The first failing operation aborts the sequence; the working document is
/// dropped with the error.
pub fn apply_ops(mut doc: Value, ops: &[Operation]) -> Result<Value, PatchError> {
    for (index, op) in ops.iter().enumerate() {
        trace!(index, op = %op.kind(), path = %op.path(), "applying operation");
        apply_op(&mut doc, op).map_err(|source| PatchError {
            index,
            op: op.kind(),
            source,
        })?;
    }
    Ok(doc)
}

/// Apply a patch document to `root`, producing a new document.
///
/// `root` is only read: all edits happen on a private copy, so a failed
/// patch leaves nothing behind.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use vacancy_patch::json_patch::{apply_patch, from_json_patch};
/// use vacancy_value::Value;
///
/// let doc = Value::from(json!({"tags": ["a", "b"]}));
/// let patch = from_json_patch(br#"[{"op": "add", "path": "/tags/-", "value": "v"}]"#).unwrap();
/// let patched = apply_patch(&doc, &patch).unwrap();
/// assert_eq!(patched, Value::from(json!({"tags": ["a", "b", "v"]})));
/// assert_eq!(doc, Value::from(json!({"tags": ["a", "b"]})));
/// ```
pub fn apply_patch(root: &Value, document: &PatchDocument) -> Result<Value, PatchError> {
    apply_ops(root.clone(), document.operations())
}

// ── Tests ─────────────────────────────────────────────────────────────────
