//! Pointer resolution to a parent-plus-slot [`Location`].

use vacancy_value::{Map, Value};

use crate::util::parse_index;
use crate::{Pointer, PointerError};

/// Where a pointer lands inside a document.
///
/// Only the final token is left unresolved: the parent container always
/// exists, the slot inside it may not.
#[derive(Debug)]
pub enum Location<'a> {
    /// The empty pointer: the document itself.
    Root(&'a Value),
    ObjectKey { parent: &'a Map, key: &'a str },
    /// An array slot. The index is not bounds-checked.
    ArrayIndex { parent: &'a [Value], index: usize },
    /// The `-` token: one past the last element.
    ArrayAppend { parent: &'a [Value] },
}

/// Mutable twin of [`Location`].
#[derive(Debug)]
pub enum LocationMut<'a> {
    Root(&'a mut Value),
    ObjectKey { parent: &'a mut Map, key: &'a str },
    ArrayIndex { parent: &'a mut Vec<Value>, index: usize },
    ArrayAppend { parent: &'a mut Vec<Value> },
}

impl<'a> Location<'a> {
    /// The value currently in the slot, if there is one.
    pub fn value(&self) -> Option<&'a Value> {
        match *self {
            Location::Root(root) => Some(root),
            Location::ObjectKey { parent, key } => parent.get(key),
            Location::ArrayIndex { parent, index } => parent.get(index),
            Location::ArrayAppend { .. } => None,
        }
    }

    /// The value in the slot, which must exist.
    ///
    /// Fails with `InvalidLocation` for `-` and `PathNotFound` for a missing
    /// key or an out-of-range index.
    pub fn existing(self, pointer: &Pointer) -> Result<&'a Value, PointerError> {
        if let Location::ArrayAppend { .. } = self {
            return Err(PointerError::InvalidLocation {
                pointer: pointer.to_string(),
                reason: "`-` does not address an existing element",
            });
        }
        self.value().ok_or_else(|| PointerError::PathNotFound {
            pointer: pointer.to_string(),
        })
    }
}

/// Resolve `pointer` against `root`.
///
/// Every token but the last must step into an existing object member or
/// array element; otherwise the pointer fails with `PathNotFound`. The last
/// token is classified against its parent container.
///
/// # Errors
///
/// - `PathNotFound` when an intermediate step is missing, is `-`, or lands
///   on a scalar, or when the final parent is a scalar.
/// - `InvalidPointer` when an array is indexed by a malformed token.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use vacancy_json_pointer::{resolve, Location, Pointer};
/// use vacancy_value::Value;
///
/// let doc = Value::from(json!({"tags": ["a", "b"]}));
/// let at = Pointer::parse("/tags/-").unwrap();
/// let loc = resolve(&doc, &at).unwrap();
/// assert!(matches!(loc, Location::ArrayAppend { parent } if parent.len() == 2));
/// ```
pub fn resolve<'a>(root: &'a Value, pointer: &'a Pointer) -> Result<Location<'a>, PointerError> {
    let Some((last, parents)) = pointer.split_last() else {
        return Ok(Location::Root(root));
    };

    let mut current = root;
    for token in parents {
        current = match current {
            Value::Object(map) => map.get(token.as_str()),
            Value::Array(arr) if token != "-" => arr.get(parse_index(token, pointer)?),
            _ => None,
        }
        .ok_or_else(|| not_found(pointer))?;
    }

    match current {
        Value::Object(parent) => Ok(Location::ObjectKey { parent, key: last }),
        Value::Array(parent) => {
            if last == "-" {
                return Ok(Location::ArrayAppend { parent });
            }
            let index = parse_index(last, pointer)?;
            Ok(Location::ArrayIndex { parent, index })
        }
        _ => Err(not_found(pointer)),
    }
}

/// Resolve `pointer` against `root` for mutation.
///
/// Same rules and errors as [`resolve`].
pub fn resolve_mut<'a>(
    root: &'a mut Value,
    pointer: &'a Pointer,
) -> Result<LocationMut<'a>, PointerError> {
    let Some((last, parents)) = pointer.split_last() else {
        return Ok(LocationMut::Root(root));
    };

    let mut current = root;
    for token in parents {
        current = match current {
            Value::Object(map) => map.get_mut(token.as_str()),
            Value::Array(arr) if token != "-" => arr.get_mut(parse_index(token, pointer)?),
            _ => None,
        }
        .ok_or_else(|| not_found(pointer))?;
    }

    match current {
        Value::Object(parent) => Ok(LocationMut::ObjectKey { parent, key: last }),
        Value::Array(parent) => {
            if last == "-" {
                return Ok(LocationMut::ArrayAppend { parent });
            }
            let index = parse_index(last, pointer)?;
            Ok(LocationMut::ArrayIndex { parent, index })
        }
        _ => Err(not_found(pointer)),
    }
}

fn not_found(pointer: &Pointer) -> PointerError {
    PointerError::PathNotFound {
        pointer: pointer.to_string(),
    }
}
