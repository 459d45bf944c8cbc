//! Conversion between typed domain objects and [`Value`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use vacancy_value::Value;

/// A value does not fit the requested shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("value does not fit `{shape}`: {message}")]
pub struct ShapeMismatch {
    /// Unqualified name of the target type, without generic arguments.
    pub shape: &'static str,
    pub message: String,
}

impl ShapeMismatch {
    fn new<T: ?Sized>(err: serde_json::Error) -> Self {
        Self {
            shape: short_type_name::<T>(),
            message: err.to_string(),
        }
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path)
}

/// Snapshot a typed object as a structural value.
pub fn to_value<T: Serialize + ?Sized>(object: &T) -> Result<Value, ShapeMismatch> {
    serde_json::to_value(object)
        .map(Value::from)
        .map_err(ShapeMismatch::new::<T>)
}

/// Rebuild a typed object from a structural value.
///
/// # Example
///
/// ```
/// use serde::Deserialize;
/// use serde_json::json;
/// use vacancy_patch::bridge::from_value;
/// use vacancy_value::Value;
///
/// #[derive(Debug, Deserialize)]
/// struct Salary { min: u32 }
///
/// let err = from_value::<Salary>(Value::from(json!({"min": "lots"}))).unwrap_err();
/// assert_eq!(err.shape, "Salary");
/// ```
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, ShapeMismatch> {
    serde_json::from_value(serde_json::Value::from(value)).map_err(ShapeMismatch::new::<T>)
}
