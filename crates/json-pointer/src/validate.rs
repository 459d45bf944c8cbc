//! Size limits for pointers.

use crate::{Pointer, PointerError};

/// Default maximum pointer string length.
pub const MAX_POINTER_LENGTH: usize = 1024;

/// Default maximum pointer depth (number of tokens).
pub const MAX_POINTER_DEPTH: usize = 256;

/// Validate the textual length of a pointer.
///
/// # Example
///
/// ```
/// use vacancy_json_pointer::{validate_pointer_len, Pointer, MAX_POINTER_LENGTH};
///
/// let short = Pointer::parse("/foo/bar").unwrap();
/// assert!(validate_pointer_len(&short, MAX_POINTER_LENGTH).is_ok());
/// let long = Pointer::from_tokens(["a".repeat(2000)]);
/// assert!(validate_pointer_len(&long, MAX_POINTER_LENGTH).is_err());
/// ```
pub fn validate_pointer_len(pointer: &Pointer, max: usize) -> Result<(), PointerError> {
    let text = pointer.to_string();
    if text.len() > max {
        return Err(PointerError::InvalidPointer {
            pointer: text,
            reason: "pointer is too long",
        });
    }
    Ok(())
}

/// Validate the number of tokens in a pointer.
pub fn validate_depth(pointer: &Pointer, max: usize) -> Result<(), PointerError> {
    if pointer.len() > max {
        return Err(PointerError::InvalidPointer {
            pointer: pointer.to_string(),
            reason: "pointer is too deep",
        });
    }
    Ok(())
}
