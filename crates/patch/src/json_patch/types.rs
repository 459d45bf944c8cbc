//! Core types for the JSON Patch module.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vacancy_json_pointer::PointerError;
use vacancy_value::Value;

pub use vacancy_json_pointer::Pointer;

// ── Error ─────────────────────────────────────────────────────────────────

/// Why a single operation failed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OpError {
    #[error(transparent)]
    Pointer(#[from] PointerError),
    #[error("test failed at `{pointer}`: expected {expected}, found {actual}")]
    TestFailed {
        pointer: String,
        expected: Value,
        actual: Value,
    },
}

impl OpError {
    /// The pointer the failure refers to.
    pub fn pointer(&self) -> &str {
        match self {
            OpError::Pointer(err) => err.pointer(),
            OpError::TestFailed { pointer, .. } => pointer,
        }
    }
}

/// A failed patch: which operation failed, and why.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("operation {index} ({op}) failed: {source}")]
pub struct PatchError {
    /// Zero-based position of the failing operation in the document.
    pub index: usize,
    pub op: OpKind,
    #[source]
    pub source: OpError,
}

// ── Op enum ───────────────────────────────────────────────────────────────

/// The RFC 6902 operation names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Add,
    Remove,
    Replace,
    Move,
    Copy,
    Test,
}

impl OpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpKind::Add => "add",
            OpKind::Remove => "remove",
            OpKind::Replace => "replace",
            OpKind::Move => "move",
            OpKind::Copy => "copy",
            OpKind::Test => "test",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A JSON Patch operation.
///
/// Serialized in the RFC 6902 wire form, `{"op": ..., "path": ..., ...}`.
/// Members an operation does not use are ignored on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Operation {
    Add { path: Pointer, value: Value },
    Remove { path: Pointer },
    Replace { path: Pointer, value: Value },
    Move { from: Pointer, path: Pointer },
    Copy { from: Pointer, path: Pointer },
    Test { path: Pointer, value: Value },
}

impl Operation {
    pub fn kind(&self) -> OpKind {
        match self {
            Operation::Add { .. } => OpKind::Add,
            Operation::Remove { .. } => OpKind::Remove,
            Operation::Replace { .. } => OpKind::Replace,
            Operation::Move { .. } => OpKind::Move,
            Operation::Copy { .. } => OpKind::Copy,
            Operation::Test { .. } => OpKind::Test,
        }
    }

    /// The target path of the operation.
    pub fn path(&self) -> &Pointer {
        match self {
            Operation::Add { path, .. }
            | Operation::Remove { path }
            | Operation::Replace { path, .. }
            | Operation::Move { path, .. }
            | Operation::Copy { path, .. }
            | Operation::Test { path, .. } => path,
        }
    }

    /// The source path, for `move` and `copy`.
    pub fn from(&self) -> Option<&Pointer> {
        match self {
            Operation::Move { from, .. } | Operation::Copy { from, .. } => Some(from),
            _ => None,
        }
    }

    /// Every pointer the operation references.
    pub fn pointers(&self) -> impl Iterator<Item = &Pointer> {
        std::iter::once(self.path()).chain(self.from())
    }
}

/// An ordered list of operations, applied left to right.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchDocument(Vec<Operation>);

impl PatchDocument {
    pub fn new(operations: Vec<Operation>) -> Self {
        Self(operations)
    }

    pub fn operations(&self) -> &[Operation] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.0.iter()
    }
}

impl From<Vec<Operation>> for PatchDocument {
    fn from(operations: Vec<Operation>) -> Self {
        Self(operations)
    }
}

impl FromIterator<Operation> for PatchDocument {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PatchDocument {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
