//! Byte-preserving text payloads.
//!
//! NBT strings are length-prefixed byte sequences that are usually, but not
//! always, valid UTF-8. Minecraft files produced by Java tooling can carry
//! modified-UTF-8 sequences (CESU-8 surrogate pairs, overlong NUL). `TagStr`
//! stores the payload bytes verbatim so such documents round-trip bit-exact,
//! and exposes a `&str` view only when the bytes are valid UTF-8.

use std::borrow::Cow;
use std::fmt;

/// A string payload or tag name, kept as its raw wire bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TagStr(Vec<u8>);

impl TagStr {
    /// An empty string.
    pub fn new() -> Self {
        TagStr(Vec::new())
    }

    /// Wraps raw payload bytes without validation.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        TagStr(bytes)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The UTF-8 view, or `None` if the payload is not valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    /// Lossy UTF-8 view; invalid sequences become U+FFFD.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    /// Byte length, as counted by the wire length prefix.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for TagStr {
    fn from(s: &str) -> Self {
        TagStr(s.as_bytes().to_vec())
    }
}

impl From<String> for TagStr {
    fn from(s: String) -> Self {
        TagStr(s.into_bytes())
    }
}

impl PartialEq<str> for TagStr {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for TagStr {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl fmt::Display for TagStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}
