//! The parsed pointer type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::util::{escape_component, unescape_component};
use crate::PointerError;

/// A parsed JSON Pointer: a sequence of unescaped reference tokens.
///
/// The empty sequence addresses the whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pointer {
    tokens: Vec<String>,
}

impl Pointer {
    /// The pointer to the whole document (`""`).
    pub fn root() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Build a pointer from already-unescaped tokens.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a pointer string.
    ///
    /// The empty string is the root. Anything else must start with `/`, and
    /// every `~` must begin a `~0` or `~1` escape.
    ///
    /// # Example
    ///
    /// ```
    /// use vacancy_json_pointer::Pointer;
    ///
    /// assert!(Pointer::parse("").unwrap().is_root());
    /// assert_eq!(Pointer::parse("/").unwrap().tokens(), [""]);
    /// assert_eq!(Pointer::parse("/a~0b/c~1d").unwrap().tokens(), ["a~b", "c/d"]);
    /// assert!(Pointer::parse("foo").is_err());
    /// ```
    pub fn parse(pointer: &str) -> Result<Self, PointerError> {
        if pointer.is_empty() {
            return Ok(Self::root());
        }
        let Some(rest) = pointer.strip_prefix('/') else {
            return Err(PointerError::InvalidPointer {
                pointer: pointer.to_string(),
                reason: "must be empty or start with `/`",
            });
        };
        let tokens = rest
            .split('/')
            .map(|component| {
                unescape_component(component).map_err(|err| match err {
                    PointerError::InvalidPointer { reason, .. } => PointerError::InvalidPointer {
                        pointer: pointer.to_string(),
                        reason,
                    },
                    other => other,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Check if this pointer addresses the whole document.
    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The last token and the tokens leading to it. `None` for the root.
    pub fn split_last(&self) -> Option<(&str, &[String])> {
        self.tokens
            .split_last()
            .map(|(last, parents)| (last.as_str(), parents))
    }

    /// The parent pointer. `None` for the root.
    pub fn parent(&self) -> Option<Pointer> {
        self.split_last()
            .map(|(_, parents)| Pointer::from_tokens(parents.iter().cloned()))
    }

    /// A new pointer one level deeper.
    pub fn child(&self, token: impl Into<String>) -> Pointer {
        let mut tokens = self.tokens.clone();
        tokens.push(token.into());
        Pointer { tokens }
    }

    /// Check if `self` equals `other` or is one of its ancestors.
    pub fn is_prefix_of(&self, other: &Pointer) -> bool {
        other.tokens.len() >= self.tokens.len()
            && other.tokens[..self.tokens.len()] == self.tokens[..]
    }

    /// Check if `self` lies strictly inside the subtree addressed by `ancestor`.
    ///
    /// # Example
    ///
    /// ```
    /// use vacancy_json_pointer::Pointer;
    ///
    /// let a = Pointer::parse("/a").unwrap();
    /// let ab = Pointer::parse("/a/b").unwrap();
    /// assert!(ab.is_descendant_of(&a));
    /// assert!(!a.is_descendant_of(&a));
    /// assert!(!a.is_descendant_of(&ab));
    /// ```
    pub fn is_descendant_of(&self, ancestor: &Pointer) -> bool {
        self.tokens.len() > ancestor.tokens.len() && ancestor.is_prefix_of(self)
    }
}

impl fmt::Display for Pointer {
    /// Formats back to RFC 6901 text; the inverse of [`Pointer::parse`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            f.write_str("/")?;
            f.write_str(&escape_component(token))?;
        }
        Ok(())
    }
}

impl FromStr for Pointer {
    type Err = PointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pointer::parse(s)
    }
}

impl TryFrom<&str> for Pointer {
    type Error = PointerError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Pointer::parse(s)
    }
}

impl Serialize for Pointer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Pointer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Pointer::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Pointer {
        Pointer::parse(s).unwrap()
    }

    #[test]
    fn test_parse() {
        assert_eq!(p("").tokens(), Vec::<String>::new().as_slice());
        assert_eq!(p("/").tokens(), [""]);
        assert_eq!(p("/foo/bar").tokens(), ["foo", "bar"]);
        assert_eq!(p("/foo///").tokens(), ["foo", "", "", ""]);
        assert_eq!(p("/a~0b/c~1d/1").tokens(), ["a~b", "c/d", "1"]);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["foo", "#/foo", "/a~", "/a~2", "/ok/~x"] {
            let err = Pointer::parse(bad).unwrap_err();
            match err {
                PointerError::InvalidPointer { pointer, .. } => assert_eq!(pointer, bad),
                other => panic!("unexpected error for {bad:?}: {other:?}"),
            }
        }
    }

    #[test]
    fn test_roundtrip() {
        for pointer in ["", "/", "/foo", "/foo/bar", "/a~0b", "/c~1d", "/a~0b/c~1d/1", "/foo///"] {
            assert_eq!(p(pointer).to_string(), pointer, "roundtrip failed for {pointer:?}");
        }
    }

    #[test]
    fn test_parent_and_child() {
        let path = p("/foo/bar");
        assert_eq!(path.parent(), Some(p("/foo")));
        assert_eq!(p("/foo").parent(), Some(Pointer::root()));
        assert_eq!(Pointer::root().parent(), None);
        assert_eq!(p("/foo").child("a/b").to_string(), "/foo/a~1b");
    }

    #[test]
    fn test_prefix_relations() {
        let parent = p("/foo");
        let child = p("/foo/bar");
        let sibling = p("/baz");
        assert!(parent.is_prefix_of(&child));
        assert!(parent.is_prefix_of(&parent));
        assert!(!child.is_prefix_of(&parent));
        assert!(child.is_descendant_of(&parent));
        assert!(!parent.is_descendant_of(&parent));
        assert!(!sibling.is_descendant_of(&parent));
        assert!(child.is_descendant_of(&Pointer::root()));
    }

    #[test]
    fn test_prefix_is_token_wise() {
        // "/ab" is not under "/a" even though the text shares a prefix
        assert!(!p("/ab").is_descendant_of(&p("/a")));
    }

    #[test]
    fn test_split_last() {
        let path = p("/a/b/c");
        let (last, parents) = path.split_last().unwrap();
        assert_eq!(last, "c");
        assert_eq!(parents, ["a", "b"]);
        assert!(Pointer::root().split_last().is_none());
    }
}
