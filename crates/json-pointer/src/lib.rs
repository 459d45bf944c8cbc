//! JSON Pointer (RFC 6901) over structural values.
//!
//! This crate parses [JSON Pointer](https://tools.ietf.org/html/rfc6901)
//! strings and resolves them against a [`vacancy_value::Value`] tree to a
//! parent-plus-slot [`Location`], which is what the patch executor edits.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use vacancy_json_pointer::{get, resolve, Location, Pointer};
//! use vacancy_value::Value;
//!
//! let pointer = Pointer::parse("/requirements/0").unwrap();
//! assert_eq!(pointer.tokens(), ["requirements", "0"]);
//! assert_eq!(pointer.to_string(), "/requirements/0");
//!
//! let doc = Value::from(json!({"requirements": ["rust"]}));
//! assert_eq!(get(&doc, &pointer).and_then(Value::as_str), Some("rust"));
//! assert!(matches!(resolve(&doc, &pointer).unwrap(), Location::ArrayIndex { index: 0, .. }));
//! ```

use thiserror::Error;

mod find;
mod get;
pub mod types;
mod util;
pub mod validate;

pub use find::{resolve, resolve_mut, Location, LocationMut};
pub use get::get;
pub use types::Pointer;
pub use util::{escape_component, is_valid_index, unescape_component};
pub use validate::{validate_depth, validate_pointer_len, MAX_POINTER_DEPTH, MAX_POINTER_LENGTH};

/// Location errors. Each carries the offending pointer in RFC 6901 form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointerError {
    /// Malformed pointer syntax or array index token.
    #[error("invalid pointer `{pointer}`: {reason}")]
    InvalidPointer { pointer: String, reason: &'static str },
    /// The pointer does not resolve against the current document.
    #[error("path `{pointer}` does not exist")]
    PathNotFound { pointer: String },
    /// The array index is outside the bounds the operation allows.
    #[error("index {index} at `{pointer}` is out of range for an array of length {len}")]
    IndexOutOfRange {
        pointer: String,
        index: usize,
        len: usize,
    },
    /// The location exists syntactically but the operation cannot target it.
    #[error("invalid location `{pointer}`: {reason}")]
    InvalidLocation { pointer: String, reason: &'static str },
}

impl PointerError {
    /// The pointer the error refers to.
    pub fn pointer(&self) -> &str {
        match self {
            PointerError::InvalidPointer { pointer, .. }
            | PointerError::PathNotFound { pointer }
            | PointerError::IndexOutOfRange { pointer, .. }
            | PointerError::InvalidLocation { pointer, .. } => pointer,
        }
    }
}
