//! One-byte tag kind ids of the NBT wire format.

use std::fmt;

/// Tag kind as it appears on the wire.
///
/// `End` (id 0) is a wire-level delimiter only: it terminates compound
/// payloads and marks the declared element kind of a list that has no
/// elements yet. It never appears as a value in a decoded tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TagKind {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
    LongArray = 12,
}

impl TagKind {
    /// Maps a wire id to a kind. Ids outside `0..=12` are unknown.
    pub fn from_u8(id: u8) -> Option<TagKind> {
        match id {
            0 => Some(TagKind::End),
            1 => Some(TagKind::Byte),
            2 => Some(TagKind::Short),
            3 => Some(TagKind::Int),
            4 => Some(TagKind::Long),
            5 => Some(TagKind::Float),
            6 => Some(TagKind::Double),
            7 => Some(TagKind::ByteArray),
            8 => Some(TagKind::String),
            9 => Some(TagKind::List),
            10 => Some(TagKind::Compound),
            11 => Some(TagKind::IntArray),
            12 => Some(TagKind::LongArray),
            _ => None,
        }
    }

    /// The one-byte wire id of this kind.
    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TagKind::End => "End",
            TagKind::Byte => "Byte",
            TagKind::Short => "Short",
            TagKind::Int => "Int",
            TagKind::Long => "Long",
            TagKind::Float => "Float",
            TagKind::Double => "Double",
            TagKind::ByteArray => "ByteArray",
            TagKind::String => "String",
            TagKind::List => "List",
            TagKind::Compound => "Compound",
            TagKind::IntArray => "IntArray",
            TagKind::LongArray => "LongArray",
        };
        f.write_str(name)
    }
}
