//! Processor configuration.
//!
//! Both structs deserialize with every field optional, so a host can embed
//! them in its own configuration file:
//!
//! ```toml
//! [patch.limits]
//! max_operations = 200
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vacancy_json_pointer::{
    validate_depth, validate_pointer_len, PointerError, MAX_POINTER_DEPTH, MAX_POINTER_LENGTH,
};

use crate::codec::PatchBody;

pub const DEFAULT_MAX_OPERATIONS: usize = 1000;

/// Configuration for a [`PatchProcessor`](crate::PatchProcessor).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchConfig {
    pub limits: PatchLimits,
}

/// Size limits checked before a patch is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchLimits {
    /// Maximum operations in a JSON Patch document.
    pub max_operations: usize,
    /// Maximum length of a pointer in RFC 6901 text form.
    pub max_pointer_length: usize,
    /// Maximum tokens in a pointer, and maximum nesting of a merge patch.
    pub max_pointer_depth: usize,
}

impl Default for PatchLimits {
    fn default() -> Self {
        Self {
            max_operations: DEFAULT_MAX_OPERATIONS,
            max_pointer_length: MAX_POINTER_LENGTH,
            max_pointer_depth: MAX_POINTER_DEPTH,
        }
    }
}

/// A patch body exceeds a configured limit.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LimitError {
    #[error("patch has {count} operations, the limit is {max}")]
    TooManyOperations { count: usize, max: usize },
    #[error("merge patch nests {depth} levels deep, the limit is {max}")]
    TooDeep { depth: usize, max: usize },
    #[error("operation {index}: {source}")]
    Pointer {
        index: usize,
        #[source]
        source: PointerError,
    },
}

impl PatchLimits {
    /// Check `body` against the limits.
    pub fn check(&self, body: &PatchBody) -> Result<(), LimitError> {
        match body {
            PatchBody::Json(document) => {
                if document.len() > self.max_operations {
                    return Err(LimitError::TooManyOperations {
                        count: document.len(),
                        max: self.max_operations,
                    });
                }
                for (index, op) in document.iter().enumerate() {
                    for pointer in op.pointers() {
                        validate_pointer_len(pointer, self.max_pointer_length)
                            .and_then(|()| validate_depth(pointer, self.max_pointer_depth))
                            .map_err(|source| LimitError::Pointer { index, source })?;
                    }
                }
                Ok(())
            }
            PatchBody::Merge(document) => {
                let depth = document.as_value().depth();
                if depth > self.max_pointer_depth {
                    return Err(LimitError::TooDeep {
                        depth,
                        max: self.max_pointer_depth,
                    });
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json_patch::{Operation, PatchDocument, Pointer};
    use crate::merge_patch::MergeDocument;
    use serde_json::json;
    use vacancy_value::Value;

    fn remove(path: &str) -> Operation {
        Operation::Remove {
            path: Pointer::parse(path).unwrap(),
        }
    }

    #[test]
    fn defaults() {
        let limits = PatchLimits::default();
        assert_eq!(limits.max_operations, 1000);
        assert_eq!(limits.max_pointer_length, 1024);
        assert_eq!(limits.max_pointer_depth, 256);
        assert_eq!(PatchConfig::default().limits, limits);
    }

    #[test]
    fn operation_count() {
        let limits = PatchLimits {
            max_operations: 2,
            ..PatchLimits::default()
        };
        let body = PatchBody::Json(PatchDocument::new(vec![remove("/a"), remove("/b")]));
        assert!(limits.check(&body).is_ok());
        let body = PatchBody::Json(PatchDocument::new(vec![
            remove("/a"),
            remove("/b"),
            remove("/c"),
        ]));
        assert_eq!(
            limits.check(&body),
            Err(LimitError::TooManyOperations { count: 3, max: 2 })
        );
    }

    #[test]
    fn pointer_limits_name_the_operation() {
        let limits = PatchLimits {
            max_pointer_length: 8,
            max_pointer_depth: 2,
            ..PatchLimits::default()
        };
        let body = PatchBody::Json(PatchDocument::new(vec![remove("/a"), remove("/a/b/c")]));
        assert!(matches!(
            limits.check(&body),
            Err(LimitError::Pointer {
                index: 1,
                source: PointerError::InvalidPointer { reason: "pointer is too deep", .. }
            })
        ));

        let body = PatchBody::Json(PatchDocument::new(vec![Operation::Move {
            from: Pointer::parse("/long-name").unwrap(),
            path: Pointer::parse("/a").unwrap(),
        }]));
        assert!(matches!(
            limits.check(&body),
            Err(LimitError::Pointer {
                index: 0,
                source: PointerError::InvalidPointer { reason: "pointer is too long", .. }
            })
        ));
    }

    #[test]
    fn merge_depth() {
        let limits = PatchLimits {
            max_pointer_depth: 2,
            ..PatchLimits::default()
        };
        let shallow = PatchBody::Merge(MergeDocument::new(Value::from(json!({"a": {"b": 1}}))));
        assert!(limits.check(&shallow).is_ok());
        let deep = PatchBody::Merge(MergeDocument::new(Value::from(json!({"a": {"b": {"c": 1}}}))));
        assert_eq!(limits.check(&deep), Err(LimitError::TooDeep { depth: 3, max: 2 }));
    }

    #[test]
    fn load_from_toml() {
        let config: PatchConfig = toml::from_str(
            r#"
            [limits]
            max_operations = 50
            "#,
        )
        .unwrap();
        assert_eq!(config.limits.max_operations, 50);
        assert_eq!(config.limits.max_pointer_length, 1024);

        let config: PatchConfig = toml::from_str("").unwrap();
        assert_eq!(config, PatchConfig::default());
    }

    #[test]
    fn embeds_in_host_config() {
        #[derive(serde::Deserialize)]
        struct Host {
            patch: PatchConfig,
        }

        let host: Host = toml::from_str(
            r#"
            [patch.limits]
            max_pointer_depth = 16
            "#,
        )
        .unwrap();
        assert_eq!(host.patch.limits.max_pointer_depth, 16);
        assert_eq!(host.patch.limits.max_operations, DEFAULT_MAX_OPERATIONS);
    }
}
