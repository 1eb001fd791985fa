//! [`NbtValue`] — the in-memory NBT tree, one variant per wire kind.

use crate::constants::TagKind;
use crate::error::TreeError;
use crate::tag_str::TagStr;

/// One node of an NBT tree.
///
/// Children are owned by value; the format is a strict tree, so no sharing
/// or back-references exist. Compound entries keep the literal order they
/// were decoded or inserted in, which is what makes re-encoding bit-exact.
#[derive(Debug, Clone, PartialEq)]
pub enum NbtValue {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(TagStr),
    List(NbtList),
    Compound(Vec<(TagStr, NbtValue)>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl NbtValue {
    /// The wire kind of this node.
    pub fn kind(&self) -> TagKind {
        match self {
            NbtValue::Byte(_) => TagKind::Byte,
            NbtValue::Short(_) => TagKind::Short,
            NbtValue::Int(_) => TagKind::Int,
            NbtValue::Long(_) => TagKind::Long,
            NbtValue::Float(_) => TagKind::Float,
            NbtValue::Double(_) => TagKind::Double,
            NbtValue::ByteArray(_) => TagKind::ByteArray,
            NbtValue::String(_) => TagKind::String,
            NbtValue::List(_) => TagKind::List,
            NbtValue::Compound(_) => TagKind::Compound,
            NbtValue::IntArray(_) => TagKind::IntArray,
            NbtValue::LongArray(_) => TagKind::LongArray,
        }
    }

    /// An empty compound.
    pub fn compound() -> NbtValue {
        NbtValue::Compound(Vec::new())
    }

    /// A string value from UTF-8 text.
    pub fn string(s: &str) -> NbtValue {
        NbtValue::String(TagStr::from(s))
    }

    /// Fixed-width scalar or string — the kinds `set_primitive` accepts.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            NbtValue::Byte(_)
                | NbtValue::Short(_)
                | NbtValue::Int(_)
                | NbtValue::Long(_)
                | NbtValue::Float(_)
                | NbtValue::Double(_)
                | NbtValue::String(_)
        )
    }

    /// Byte/Int/Long array — the kinds `set_array` accepts.
    pub fn is_array(&self) -> bool {
        matches!(
            self,
            NbtValue::ByteArray(_) | NbtValue::IntArray(_) | NbtValue::LongArray(_)
        )
    }

    /// Looks up a compound entry by name. Last value wins when a decoded
    /// document carried duplicate names.
    pub fn get_entry(&self, name: &str) -> Option<&NbtValue> {
        match self {
            NbtValue::Compound(entries) => entries
                .iter()
                .rev()
                .find(|(n, _)| n.as_bytes() == name.as_bytes())
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Inserts or replaces a compound entry, last write wins.
    ///
    /// A name that already exists is replaced in place, keeping entry order.
    /// Fails with `TypeMismatch` on a non-compound node.
    pub fn insert_entry(&mut self, name: &str, value: NbtValue) -> Result<(), TreeError> {
        match self {
            NbtValue::Compound(entries) => {
                match entries
                    .iter()
                    .rposition(|(n, _)| n.as_bytes() == name.as_bytes())
                {
                    Some(i) => entries[i].1 = value,
                    None => entries.push((TagStr::from(name), value)),
                }
                Ok(())
            }
            _ => Err(TreeError::TypeMismatch),
        }
    }

    /// Removes every entry with the given name, returning the last removed
    /// value, or `None` if the name was absent. Fails with `TypeMismatch`
    /// on a non-compound node.
    pub fn remove_entry(&mut self, name: &str) -> Result<Option<NbtValue>, TreeError> {
        match self {
            NbtValue::Compound(entries) => {
                let mut removed = None;
                let mut i = 0;
                while i < entries.len() {
                    if entries[i].0.as_bytes() == name.as_bytes() {
                        removed = Some(entries.remove(i).1);
                    } else {
                        i += 1;
                    }
                }
                Ok(removed)
            }
            _ => Err(TreeError::TypeMismatch),
        }
    }
}

/// A homogeneous list of unnamed values.
///
/// The element kind is recorded separately from the elements so an empty
/// list keeps its declared kind across a decode/encode cycle. A list that
/// never held an element uses the `End` sentinel and adopts the kind of the
/// first pushed value.
#[derive(Debug, Clone, PartialEq)]
pub struct NbtList {
    elem_kind: TagKind,
    items: Vec<NbtValue>,
}

impl Default for NbtList {
    fn default() -> Self {
        Self::new()
    }
}

impl NbtList {
    /// An empty list with the "no elements yet" sentinel kind.
    pub fn new() -> Self {
        NbtList {
            elem_kind: TagKind::End,
            items: Vec::new(),
        }
    }

    /// An empty list with a declared element kind.
    pub fn with_kind(kind: TagKind) -> Self {
        NbtList {
            elem_kind: kind,
            items: Vec::new(),
        }
    }

    /// Builds a list from elements, taking the kind from the first one.
    /// Fails with `InvariantViolation` if the elements are heterogeneous.
    pub fn try_from_items(items: Vec<NbtValue>) -> Result<Self, TreeError> {
        let mut list = NbtList::new();
        for item in items {
            list.try_push(item)?;
        }
        Ok(list)
    }

    /// Appends an element, enforcing homogeneity.
    pub fn try_push(&mut self, value: NbtValue) -> Result<(), TreeError> {
        let kind = value.kind();
        if self.elem_kind == TagKind::End && self.items.is_empty() {
            self.elem_kind = kind;
        } else if kind != self.elem_kind {
            return Err(TreeError::InvariantViolation(format!(
                "list of {} cannot hold a {} element",
                self.elem_kind, kind
            )));
        }
        self.items.push(value);
        Ok(())
    }

    /// The declared element kind (`End` when never set).
    pub fn elem_kind(&self) -> TagKind {
        self.elem_kind
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&NbtValue> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NbtValue> {
        self.items.iter()
    }

    /// Mutable element access for checked path mutation. Kept crate-private
    /// so callers cannot swap an element for one of a different kind.
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut NbtValue> {
        self.items.get_mut(index)
    }

    /// Assembles a decoded list without re-checking homogeneity; the decoder
    /// only produces elements of `elem_kind`.
    pub(crate) fn from_raw_parts(elem_kind: TagKind, items: Vec<NbtValue>) -> Self {
        NbtList { elem_kind, items }
    }
}

impl<'a> IntoIterator for &'a NbtList {
    type Item = &'a NbtValue;
    type IntoIter = std::slice::Iter<'a, NbtValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
