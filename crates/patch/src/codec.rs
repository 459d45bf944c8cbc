//! Patch bodies and their media types.

use thiserror::Error;
use vacancy_json_pointer::PointerError;
use vacancy_value::Value;

use crate::error::ErrorKind;
use crate::json_patch::codec::json::{from_json_patch, to_json_patch};
use crate::json_patch::PatchDocument;
use crate::merge_patch::MergeDocument;

pub const JSON_PATCH_MEDIA_TYPE: &str = "application/json-patch+json";
pub const MERGE_PATCH_MEDIA_TYPE: &str = "application/merge-patch+json";

/// Errors decoding a patch body.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("unsupported media type `{0}`")]
    UnsupportedMediaType(String),
    #[error("malformed {context}: {source}")]
    Malformed {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    /// A `path` or `from` member that is not a valid JSON Pointer.
    #[error("invalid pointer in operation [index = {index}]: {source}")]
    InvalidPointer {
        index: usize,
        #[source]
        source: PointerError,
    },
}

impl CodecError {
    /// HTTP status for the error.
    pub fn status(&self) -> u16 {
        match self {
            CodecError::UnsupportedMediaType(_) => 415,
            CodecError::Malformed { .. } | CodecError::InvalidPointer { .. } => 400,
        }
    }

    /// Classification of the error, when it maps onto an engine error kind.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            CodecError::InvalidPointer { source, .. } => Some(source.into()),
            _ => None,
        }
    }

    /// The offending pointer text, for pointer errors.
    pub fn pointer(&self) -> Option<&str> {
        match self {
            CodecError::InvalidPointer { source, .. } => Some(source.pointer()),
            _ => None,
        }
    }
}

/// A decoded patch, in either supported format.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchBody {
    Json(PatchDocument),
    Merge(MergeDocument),
}

impl PatchBody {
    /// Decode `body` according to `media_type`.
    ///
    /// Media type parameters such as `; charset=utf-8` are ignored and the
    /// type itself is matched case-insensitively.
    ///
    /// # Example
    ///
    /// ```
    /// use vacancy_patch::{PatchBody, MERGE_PATCH_MEDIA_TYPE};
    ///
    /// let media_type = "application/merge-patch+json; charset=utf-8";
    /// let body = PatchBody::decode(media_type, br#"{"a": null}"#).unwrap();
    /// assert_eq!(body.media_type(), MERGE_PATCH_MEDIA_TYPE);
    /// ```
    pub fn decode(media_type: &str, body: &[u8]) -> Result<Self, CodecError> {
        let essence = media_type.split(';').next().unwrap_or_default().trim();
        if essence.eq_ignore_ascii_case(JSON_PATCH_MEDIA_TYPE) {
            from_json_patch(body).map(PatchBody::Json)
        } else if essence.eq_ignore_ascii_case(MERGE_PATCH_MEDIA_TYPE) {
            from_merge_patch(body).map(PatchBody::Merge)
        } else {
            Err(CodecError::UnsupportedMediaType(media_type.to_string()))
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            PatchBody::Json(_) => JSON_PATCH_MEDIA_TYPE,
            PatchBody::Merge(_) => MERGE_PATCH_MEDIA_TYPE,
        }
    }

    /// Short format name, used in logs.
    pub fn format(&self) -> &'static str {
        match self {
            PatchBody::Json(_) => "json-patch",
            PatchBody::Merge(_) => "merge-patch",
        }
    }

    /// Encode the body in its wire form.
    pub fn to_vec(&self) -> Result<Vec<u8>, serde_json::Error> {
        match self {
            PatchBody::Json(document) => serde_json::to_vec(&to_json_patch(document)),
            PatchBody::Merge(document) => serde_json::to_vec(document),
        }
    }
}

impl From<PatchDocument> for PatchBody {
    fn from(document: PatchDocument) -> Self {
        PatchBody::Json(document)
    }
}

impl From<MergeDocument> for PatchBody {
    fn from(document: MergeDocument) -> Self {
        PatchBody::Merge(document)
    }
}

/// Decode an `application/merge-patch+json` body. Any JSON value is accepted.
pub fn from_merge_patch(body: &[u8]) -> Result<MergeDocument, CodecError> {
    serde_json::from_slice::<Value>(body)
        .map(MergeDocument::new)
        .map_err(|source| CodecError::Malformed {
            context: "merge patch body".into(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dispatches_on_media_type() {
        let raw = br#"[{"op": "remove", "path": "/a"}]"#;
        let body = PatchBody::decode(JSON_PATCH_MEDIA_TYPE, raw).unwrap();
        assert!(matches!(&body, PatchBody::Json(doc) if doc.len() == 1));
        assert_eq!(body.format(), "json-patch");

        let body = PatchBody::decode(MERGE_PATCH_MEDIA_TYPE, br#"{"a": 1}"#).unwrap();
        let expected = Value::from(json!({"a": 1}));
        assert!(matches!(&body, PatchBody::Merge(doc) if doc.as_value() == &expected));
        assert_eq!(body.format(), "merge-patch");
    }

    #[test]
    fn ignores_parameters_and_case() {
        let body = PatchBody::decode("Application/JSON-Patch+JSON ; charset=utf-8", b"[]").unwrap();
        assert_eq!(body.media_type(), JSON_PATCH_MEDIA_TYPE);
    }

    #[test]
    fn rejects_unknown_media_type() {
        let err = PatchBody::decode("application/json", b"{}").unwrap_err();
        assert!(matches!(&err, CodecError::UnsupportedMediaType(t) if t == "application/json"));
        assert_eq!(err.status(), 415);
    }

    #[test]
    fn malformed_bodies_are_bad_requests() {
        let err = PatchBody::decode(MERGE_PATCH_MEDIA_TYPE, b"{").unwrap_err();
        assert_eq!(err.status(), 400);
        let raw = br#"[{"op": "add", "path": "/a"}]"#;
        let err = PatchBody::decode(JSON_PATCH_MEDIA_TYPE, raw).unwrap_err();
        assert_eq!(err.status(), 400);
        assert!(err.to_string().starts_with("malformed operation [index = 0]"));
        assert_eq!(err.kind(), None);
    }

    #[test]
    fn bad_pointer_is_a_typed_error() {
        let raw = br#"[
            {"op": "test", "path": "/a", "value": 1},
            {"op": "move", "from": "a/b", "path": "/c"}
        ]"#;
        let err = PatchBody::decode(JSON_PATCH_MEDIA_TYPE, raw).unwrap_err();
        assert!(matches!(&err, CodecError::InvalidPointer { index: 1, .. }));
        assert_eq!(err.kind(), Some(ErrorKind::InvalidPointer));
        assert_eq!(err.pointer(), Some("a/b"));
        assert_eq!(err.status(), 400);
        assert!(err.to_string().starts_with("invalid pointer in operation [index = 1]"));
    }

    #[test]
    fn scalar_merge_patch_is_accepted() {
        let body = PatchBody::decode(MERGE_PATCH_MEDIA_TYPE, b"null").unwrap();
        assert_eq!(body, PatchBody::Merge(MergeDocument::new(Value::Null)));
    }

    #[test]
    fn encodes_back_to_wire_form() {
        let raw = br#"[{"op":"test","path":"/a","value":1}]"#;
        let body = PatchBody::decode(JSON_PATCH_MEDIA_TYPE, raw).unwrap();
        assert_eq!(body.to_vec().unwrap(), raw.to_vec());

        let raw = br#"{"b":{"c":null}}"#;
        let body = PatchBody::decode(MERGE_PATCH_MEDIA_TYPE, raw).unwrap();
        assert_eq!(body.to_vec().unwrap(), raw.to_vec());
    }
}
