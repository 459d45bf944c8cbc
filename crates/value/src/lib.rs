//! vacancy-value - structural JSON value model.
//!
//! [`Value`] is the common currency between the wire format and typed domain
//! objects: the patch executors operate on it, and the bridge in
//! `vacancy-patch` converts domain objects to and from it.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use vacancy_value::Value;
//!
//! let v = Value::from(json!({"title": "Engineer", "headcount": 2}));
//! assert_eq!(v.get("title").and_then(Value::as_str), Some("Engineer"));
//! assert_eq!(v, Value::from(json!({"headcount": 2.0, "title": "Engineer"})));
//! ```

mod convert;
mod equal;
mod ser;
mod value;

pub use equal::{deep_equal, number_equal};
pub use value::{Map, Number, Value, ValueKind};
