//! The patch pipeline: snapshot, apply, rebuild, validate.

use std::any::type_name;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use vacancy_value::Value;

use crate::bridge::{from_value, to_value};
use crate::codec::PatchBody;
use crate::config::PatchConfig;
use crate::error::ProcessError;
use crate::json_patch::apply_patch;
use crate::merge_patch::merge_patch;
use crate::validation::ValidationGate;

/// Applies patch bodies to typed domain objects.
///
/// Stateless apart from its configuration; one instance can serve
/// concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct PatchProcessor {
    config: PatchConfig,
}

impl PatchProcessor {
    pub fn new(config: PatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PatchConfig {
        &self.config
    }

    /// Patch `target`, returning the new object if it passes `gate`.
    ///
    /// `target` is only borrowed; on any failure the caller still holds the
    /// original, untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use serde::{Deserialize, Serialize};
    /// use vacancy_patch::{AcceptAll, PatchBody, PatchProcessor, JSON_PATCH_MEDIA_TYPE};
    ///
    /// #[derive(Debug, PartialEq, Serialize, Deserialize)]
    /// struct Vacancy { title: String, tags: Vec<String> }
    ///
    /// let vacancy = Vacancy { title: "Engineer".into(), tags: vec![] };
    /// let body = PatchBody::decode(
    ///     JSON_PATCH_MEDIA_TYPE,
    ///     br#"[{"op": "add", "path": "/tags/-", "value": "rust"}]"#,
    /// ).unwrap();
    ///
    /// let patched = PatchProcessor::default().patch(&vacancy, &body, &AcceptAll).unwrap();
    /// assert_eq!(patched.tags, ["rust"]);
    /// assert!(vacancy.tags.is_empty());
    /// ```
    pub fn patch<T, G>(&self, target: &T, body: &PatchBody, gate: &G) -> Result<T, ProcessError>
    where
        T: Serialize + DeserializeOwned,
        G: ValidationGate<T> + ?Sized,
    {
        let target_type = type_name::<T>();
        debug!(target_type, format = body.format(), "snapshot");
        let snapshot = to_value(target).map_err(|err| reject(ProcessError::Snapshot(err)))?;

        let patched = self.patch_value(&snapshot, body)?;

        debug!(target_type, "validating");
        let candidate: T =
            from_value(patched).map_err(|err| reject(ProcessError::MalformedResult(err)))?;
        let violations = gate.validate(&candidate);
        if !violations.is_empty() {
            return Err(reject(ProcessError::Validation(violations)));
        }

        debug!(target_type, "accepted");
        Ok(candidate)
    }

    /// Apply `body` to a structural document after checking the limits.
    ///
    /// This is the applying stage of [`patch`](Self::patch) on its own, for
    /// callers that hold a [`Value`] rather than a typed object.
    pub fn patch_value(&self, root: &Value, body: &PatchBody) -> Result<Value, ProcessError> {
        self.config
            .limits
            .check(body)
            .map_err(|err| reject(ProcessError::LimitExceeded(err)))?;

        match body {
            PatchBody::Json(document) => {
                debug!(format = body.format(), operations = document.len(), "applying");
                apply_patch(root, document)
                    .map_err(|err| reject(ProcessError::PatchApplication(err)))
            }
            PatchBody::Merge(document) => {
                debug!(format = body.format(), "applying");
                Ok(merge_patch(root, document))
            }
        }
    }
}

fn reject(err: ProcessError) -> ProcessError {
    debug!(
        kind = %err.kind(),
        stage = %err.stage(),
        violations = err.violations().map_or(0, |v| v.len()),
        "rejected: {err}"
    );
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PatchLimits;
    use crate::error::{ErrorKind, Stage};
    use crate::json_patch::{Operation, PatchDocument, Pointer};
    use crate::merge_patch::MergeDocument;
    use crate::validation::{AcceptAll, Violations};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        text: String,
        pinned: bool,
    }

    fn note() -> Note {
        Note {
            text: "hello".into(),
            pinned: false,
        }
    }

    fn json_body(ops: serde_json::Value) -> PatchBody {
        PatchBody::Json(serde_json::from_value::<PatchDocument>(ops).unwrap())
    }

    fn merge_body(doc: serde_json::Value) -> PatchBody {
        PatchBody::Merge(MergeDocument::new(Value::from(doc)))
    }

    #[test]
    fn accepted_json_patch() {
        let body = json_body(json!([{"op": "replace", "path": "/pinned", "value": true}]));
        let patched = PatchProcessor::default().patch(&note(), &body, &AcceptAll).unwrap();
        assert!(patched.pinned);
    }

    #[test]
    fn accepted_merge_patch() {
        let body = merge_body(json!({"text": "bye"}));
        let patched = PatchProcessor::default().patch(&note(), &body, &AcceptAll).unwrap();
        assert_eq!(patched, Note { text: "bye".into(), pinned: false });
    }

    #[test]
    fn executor_failure_is_patch_application() {
        let body = json_body(json!([{"op": "remove", "path": "/missing"}]));
        let err = PatchProcessor::default().patch(&note(), &body, &AcceptAll).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PathNotFound);
        assert_eq!(err.stage(), Stage::Applying);
    }

    #[test]
    fn type_mismatch_is_malformed_result() {
        let body = merge_body(json!({"pinned": "yes"}));
        let err = PatchProcessor::default().patch(&note(), &body, &AcceptAll).unwrap_err();
        assert!(matches!(err, ProcessError::MalformedResult(_)));
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
        assert_eq!(err.status(), 400);
        let message = err.problem().message;
        assert!(message.contains("`Note`") && !message.contains("::"), "{message}");

        let body = json_body(json!([{"op": "remove", "path": "/text"}]));
        let err = PatchProcessor::default().patch(&note(), &body, &AcceptAll).unwrap_err();
        assert!(matches!(err, ProcessError::MalformedResult(_)));
    }

    #[test]
    fn gate_rejection() {
        let gate = |n: &Note| {
            let mut violations = Violations::new();
            if n.pinned && n.text.is_empty() {
                violations.add("/text", "pinned notes need text");
            }
            violations
        };
        let body = merge_body(json!({"text": "", "pinned": true}));
        let err = PatchProcessor::default().patch(&note(), &body, &gate).unwrap_err();
        assert_eq!(err.violations().map(Violations::len), Some(1));
    }

    #[test]
    fn limits_are_checked_before_applying() {
        let processor = PatchProcessor::new(PatchConfig {
            limits: PatchLimits {
                max_operations: 1,
                ..PatchLimits::default()
            },
        });
        let body = json_body(json!([
            {"op": "test", "path": "/pinned", "value": false},
            {"op": "replace", "path": "/pinned", "value": true}
        ]));
        let err = processor.patch(&note(), &body, &AcceptAll).unwrap_err();
        assert!(matches!(err, ProcessError::LimitExceeded(_)));
        assert_eq!(err.status(), 413);
        assert_eq!(processor.config().limits.max_operations, 1);
    }

    #[test]
    fn snapshot_failure_is_a_server_fault() {
        #[derive(Debug, Serialize, Deserialize)]
        struct Keyed(std::collections::BTreeMap<(u8, u8), u8>);

        let mut map = std::collections::BTreeMap::new();
        map.insert((1, 2), 3);
        let err = PatchProcessor::default()
            .patch(&Keyed(map), &merge_body(json!({})), &AcceptAll)
            .unwrap_err();
        assert!(matches!(err, ProcessError::Snapshot(_)));
        assert_eq!(err.status(), 500);
        assert_eq!(err.stage(), Stage::Snapshot);
    }

    #[test]
    fn patch_value_works_on_plain_documents() {
        let root = Value::from(json!({"a": [1]}));
        let body = PatchBody::Json(PatchDocument::new(vec![Operation::Add {
            path: Pointer::parse("/a/-").unwrap(),
            value: Value::from(2i64),
        }]));
        let patched = PatchProcessor::default().patch_value(&root, &body).unwrap();
        assert_eq!(patched, Value::from(json!({"a": [1, 2]})));
        assert_eq!(root, Value::from(json!({"a": [1]})));
    }

    #[test]
    fn processor_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PatchProcessor>();
    }
}
