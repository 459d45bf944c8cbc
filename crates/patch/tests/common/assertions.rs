#![allow(dead_code)]

use serde_json::Value as JsonValue;
use vacancy_patch::{
    ErrorKind, PatchBody, ProcessError, JSON_PATCH_MEDIA_TYPE, MERGE_PATCH_MEDIA_TYPE,
};

pub fn json_patch(ops: JsonValue) -> PatchBody {
    decode(JSON_PATCH_MEDIA_TYPE, ops)
}

pub fn merge_patch(doc: JsonValue) -> PatchBody {
    decode(MERGE_PATCH_MEDIA_TYPE, doc)
}

fn decode(media_type: &str, body: JsonValue) -> PatchBody {
    let bytes =
        serde_json::to_vec(&body).unwrap_or_else(|e| panic!("failed to encode {body}: {e}"));
    PatchBody::decode(media_type, &bytes)
        .unwrap_or_else(|e| panic!("failed to decode {body}: {e}"))
}

pub fn assert_rejected<T: std::fmt::Debug>(
    result: Result<T, ProcessError>,
    kind: ErrorKind,
) -> ProcessError {
    match result {
        Ok(value) => panic!("expected {kind} rejection, got {value:?}"),
        Err(err) => {
            assert_eq!(err.kind(), kind, "unexpected rejection: {err}");
            err
        }
    }
}
