//! Codecs for JSON Patch documents.
//!
//! Only the RFC 6902 JSON form is supported.

pub mod json;
