use serde_json::Number;

use crate::Value;

/// Performs a deep equality check between two structural values.
///
/// - Numbers compare by numeric value, so `1` equals `1.0`.
/// - Arrays compare element-by-element, in order.
/// - Objects compare key-by-key; member order is irrelevant.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use vacancy_value::{deep_equal, Value};
///
/// let a = Value::from(json!({"a": 1, "b": [1.0, 2]}));
/// let b = Value::from(json!({"b": [1, 2], "a": 1}));
/// let c = Value::from(json!({"a": 1, "b": [2, 1]}));
///
/// assert!(deep_equal(&a, &b));
/// assert!(!deep_equal(&a, &c));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => number_equal(a, b),
        (Value::String(a), Value::String(b)) => a == b,

        (Value::Array(arr_a), Value::Array(arr_b)) => {
            arr_a.len() == arr_b.len() && arr_a.iter().zip(arr_b).all(|(x, y)| deep_equal(x, y))
        }

        (Value::Object(obj_a), Value::Object(obj_b)) => {
            if obj_a.len() != obj_b.len() {
                return false;
            }
            obj_a
                .iter()
                .all(|(key, val_a)| obj_b.get(key).is_some_and(|val_b| deep_equal(val_a, val_b)))
        }

        _ => false,
    }
}

/// Numeric equality across integer and float representations.
///
/// Integers compare exactly. An integer equals a float only if the float is
/// integral and converts to exactly that integer; two floats compare as `f64`.
pub fn number_equal(a: &Number, b: &Number) -> bool {
    match (as_integer(a), as_integer(b)) {
        (Some(x), Some(y)) => x == y,
        (Some(x), None) => b.as_f64().is_some_and(|f| float_is_integer(f, x)),
        (None, Some(y)) => a.as_f64().is_some_and(|f| float_is_integer(f, y)),
        (None, None) => matches!((a.as_f64(), b.as_f64()), (Some(x), Some(y)) if x == y),
    }
}

fn as_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

// `as` saturates, so an out-of-range float never matches.
fn float_is_integer(f: f64, i: i128) -> bool {
    f.fract() == 0.0 && f as i128 == i
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        deep_equal(self, other)
    }
}
