//! Path-addressed access into an NBT tree.
//!
//! A path is a sequence of steps from the root: compound entries are
//! addressed by name, list elements by index. An empty path addresses the
//! root itself.

use crate::error::TreeError;
use crate::nbt_value::NbtValue;

/// One step of a tree path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep<'a> {
    /// A compound entry, by name. Duplicate names resolve last-wins.
    Name(&'a str),
    /// A list element, by zero-based index.
    Index(usize),
}

/// Walks `path` from `root`. A step that cannot be applied — missing name,
/// index out of bounds, or a step aimed at the wrong container kind — is a
/// `PathNotFound`.
pub(crate) fn resolve<'v>(
    root: &'v NbtValue,
    path: &[PathStep<'_>],
) -> Result<&'v NbtValue, TreeError> {
    let mut current = root;
    for step in path {
        current = match (current, step) {
            (compound @ NbtValue::Compound(_), PathStep::Name(name)) => {
                compound.get_entry(name).ok_or(TreeError::PathNotFound)?
            }
            (NbtValue::List(list), PathStep::Index(i)) => {
                list.get(*i).ok_or(TreeError::PathNotFound)?
            }
            _ => return Err(TreeError::PathNotFound),
        };
    }
    Ok(current)
}

/// Mutable variant of [`resolve`]. Crate-private: callers go through the
/// checked mutation operations so node kinds can never be swapped.
pub(crate) fn resolve_mut<'v>(
    root: &'v mut NbtValue,
    path: &[PathStep<'_>],
) -> Result<&'v mut NbtValue, TreeError> {
    let mut current = root;
    for step in path {
        current = match (current, step) {
            (NbtValue::Compound(entries), PathStep::Name(name)) => {
                let i = entries
                    .iter()
                    .rposition(|(n, _)| n.as_bytes() == name.as_bytes())
                    .ok_or(TreeError::PathNotFound)?;
                &mut entries[i].1
            }
            (NbtValue::List(list), PathStep::Index(i)) => {
                list.get_mut(*i).ok_or(TreeError::PathNotFound)?
            }
            _ => return Err(TreeError::PathNotFound),
        };
    }
    Ok(current)
}
