use vacancy_value::Value;

use crate::util::is_valid_index;
use crate::Pointer;

/// Get a value from a document by pointer.
///
/// Returns `None` if the pointer does not address an existing value; `-` and
/// malformed indices never match.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use vacancy_json_pointer::{get, Pointer};
/// use vacancy_value::Value;
///
/// let doc = Value::from(json!({"foo": {"bar": 42}}));
/// let at = Pointer::parse("/foo/bar").unwrap();
/// assert_eq!(get(&doc, &at), Some(&Value::from(json!(42))));
/// assert_eq!(get(&doc, &Pointer::parse("/missing").unwrap()), None);
/// ```
pub fn get<'a>(val: &'a Value, pointer: &Pointer) -> Option<&'a Value> {
    let mut current = val;
    for token in pointer.tokens() {
        current = match current {
            Value::Array(arr) if is_valid_index(token) => arr.get(token.parse::<usize>().ok()?)?,
            Value::Object(map) => map.get(token.as_str())?,
            _ => return None,
        };
    }
    Some(current)
}
