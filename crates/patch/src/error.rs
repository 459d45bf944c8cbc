//! Error taxonomy for the patch pipeline.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use vacancy_json_pointer::PointerError;

use crate::bridge::ShapeMismatch;
use crate::config::LimitError;
use crate::json_patch::{OpError, PatchError};
use crate::validation::Violations;

/// Flat classification of every failure the engine reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidPointer,
    PathNotFound,
    IndexOutOfRange,
    InvalidLocation,
    TestFailed,
    ShapeMismatch,
    ValidationFailed,
    LimitExceeded,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidPointer => "invalid_pointer",
            ErrorKind::PathNotFound => "path_not_found",
            ErrorKind::IndexOutOfRange => "index_out_of_range",
            ErrorKind::InvalidLocation => "invalid_location",
            ErrorKind::TestFailed => "test_failed",
            ErrorKind::ShapeMismatch => "shape_mismatch",
            ErrorKind::ValidationFailed => "validation_failed",
            ErrorKind::LimitExceeded => "limit_exceeded",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&PointerError> for ErrorKind {
    fn from(err: &PointerError) -> Self {
        match err {
            PointerError::InvalidPointer { .. } => ErrorKind::InvalidPointer,
            PointerError::PathNotFound { .. } => ErrorKind::PathNotFound,
            PointerError::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            PointerError::InvalidLocation { .. } => ErrorKind::InvalidLocation,
        }
    }
}

impl OpError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OpError::Pointer(err) => err.into(),
            OpError::TestFailed { .. } => ErrorKind::TestFailed,
        }
    }
}

impl PatchError {
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

impl ShapeMismatch {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::ShapeMismatch
    }
}

impl LimitError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::LimitExceeded
    }
}

/// Pipeline stage at which a patch was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Snapshot,
    Applying,
    Validating,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Snapshot => "snapshot",
            Stage::Applying => "applying",
            Stage::Validating => "validating",
        })
    }
}

/// Why a patch request was rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProcessError {
    /// The target object could not be serialized. A server-side fault.
    #[error("cannot snapshot target: {0}")]
    Snapshot(#[source] ShapeMismatch),
    #[error("patch rejected: {0}")]
    LimitExceeded(#[from] LimitError),
    #[error("patch could not be applied: {0}")]
    PatchApplication(#[from] PatchError),
    /// The patched document no longer fits the target type.
    #[error("patched document is malformed: {0}")]
    MalformedResult(#[source] ShapeMismatch),
    #[error("patched object is invalid: {0}")]
    Validation(Violations),
}

impl ProcessError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProcessError::Snapshot(err) | ProcessError::MalformedResult(err) => err.kind(),
            ProcessError::LimitExceeded(err) => err.kind(),
            ProcessError::PatchApplication(err) => err.kind(),
            ProcessError::Validation(_) => ErrorKind::ValidationFailed,
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            ProcessError::Snapshot(_) => Stage::Snapshot,
            ProcessError::LimitExceeded(_) | ProcessError::PatchApplication(_) => Stage::Applying,
            ProcessError::MalformedResult(_) | ProcessError::Validation(_) => Stage::Validating,
        }
    }

    /// HTTP status for the rejection.
    pub fn status(&self) -> u16 {
        match self {
            ProcessError::Snapshot(_) => 500,
            ProcessError::LimitExceeded(_) => 413,
            _ => 400,
        }
    }

    /// The pointer the failure refers to, for location errors.
    pub fn pointer(&self) -> Option<&str> {
        match self {
            ProcessError::PatchApplication(err) => Some(err.source.pointer()),
            ProcessError::LimitExceeded(LimitError::Pointer { source, .. }) => {
                Some(source.pointer())
            }
            _ => None,
        }
    }

    pub fn violations(&self) -> Option<&Violations> {
        match self {
            ProcessError::Validation(violations) => Some(violations),
            _ => None,
        }
    }

    /// A response body describing the rejection.
    pub fn problem(&self) -> Problem {
        Problem {
            status: self.status(),
            kind: self.kind(),
            message: self.to_string(),
            pointer: self.pointer().map(str::to_string),
            violations: self.violations().cloned().unwrap_or_default(),
        }
    }
}

/// Serialisable error body for a rejected patch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Problem {
    pub status: u16,
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,
    #[serde(skip_serializing_if = "Violations::is_empty")]
    pub violations: Violations,
}
