//! Generic partial-update engine for typed domain objects.
//!
//! A [`PatchProcessor`] takes a borrowed object, a decoded [`PatchBody`]
//! (JSON Patch, RFC 6902, or JSON Merge Patch, RFC 7396) and a
//! [`ValidationGate`], and either returns a new object or a
//! [`ProcessError`] saying what was rejected and where:
//!
//! 1. snapshot the object as a [`vacancy_value::Value`];
//! 2. check [`PatchLimits`] and apply the patch to the snapshot;
//! 3. rebuild the typed object from the patched value;
//! 4. run the gate over the rebuilt object.
//!
//! The input object is never modified.

pub mod bridge;
pub mod codec;
pub mod config;
pub mod error;
pub mod json_patch;
pub mod merge_patch;
pub mod processor;
pub mod validation;

pub use bridge::{from_value, to_value, ShapeMismatch};
pub use codec::{CodecError, PatchBody, JSON_PATCH_MEDIA_TYPE, MERGE_PATCH_MEDIA_TYPE};
pub use config::{LimitError, PatchConfig, PatchLimits};
pub use error::{ErrorKind, Problem, ProcessError, Stage};
pub use json_patch::{apply_patch, OpError, OpKind, Operation, PatchDocument, PatchError, Pointer};
pub use merge_patch::{merge_patch, MergeDocument};
pub use processor::PatchProcessor;
pub use validation::{
    AcceptAll, Constraints, DeclaredConstraints, Validate, ValidationGate, Violation, Violations,
};
