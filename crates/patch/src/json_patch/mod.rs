//! JSON Patch (RFC 6902).
//!
//! # Operations
//!
//! `add`, `remove`, `replace`, `move`, `copy` and `test`. Operations apply in
//! order to a private copy of the document; the first failure aborts the
//! whole patch and the input is left as it was.

pub mod apply;
pub mod codec;
pub mod types;

pub use apply::{apply_op, apply_ops, apply_patch};
pub use codec::json::{from_json, from_json_patch, to_json, to_json_patch};
pub use types::{OpError, OpKind, Operation, PatchDocument, PatchError, Pointer};
