use crate::{Pointer, PointerError};

/// Unescapes a JSON Pointer reference token.
///
/// Per RFC 6901, `~1` becomes `/` and `~0` becomes `~`. A `~` followed by
/// anything else is rejected.
///
/// # Example
///
/// ```
/// use vacancy_json_pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b").unwrap(), "a~b");
/// assert_eq!(unescape_component("c~1d").unwrap(), "c/d");
/// assert!(unescape_component("e~2f").is_err());
/// ```
pub fn unescape_component(component: &str) -> Result<String, PointerError> {
    if !component.contains('~') {
        return Ok(component.to_string());
    }
    let mut out = String::with_capacity(component.len());
    let mut chars = component.chars();
    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('~'),
            Some('1') => out.push('/'),
            _ => {
                return Err(PointerError::InvalidPointer {
                    pointer: component.to_string(),
                    reason: "`~` must be followed by `0` or `1`",
                })
            }
        }
    }
    Ok(out)
}

/// Escapes a JSON Pointer reference token.
///
/// Per RFC 6901, `~` becomes `~0` and `/` becomes `~1`.
///
/// # Example
///
/// ```
/// use vacancy_json_pointer::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// assert_eq!(escape_component("no-escapes"), "no-escapes");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    // `~` first, otherwise the `~` introduced by `~1` would be escaped again
    component.replace('~', "~0").replace('/', "~1")
}

/// Check if a token is a well-formed array index: ASCII digits with no
/// leading zero, except `"0"` itself.
///
/// # Example
///
/// ```
/// use vacancy_json_pointer::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index(""));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(u8::is_ascii_digit)
}

/// Parse an array index token, failing with `InvalidPointer` when the token
/// is malformed or does not fit in `usize`.
pub(crate) fn parse_index(token: &str, pointer: &Pointer) -> Result<usize, PointerError> {
    if !is_valid_index(token) {
        return Err(PointerError::InvalidPointer {
            pointer: pointer.to_string(),
            reason: "array index must be digits without a leading zero",
        });
    }
    token.parse().map_err(|_| PointerError::InvalidPointer {
        pointer: pointer.to_string(),
        reason: "array index is too large",
    })
}
