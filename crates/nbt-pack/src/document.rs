//! Document service: load/save orchestration plus the path-addressed tree
//! API that collaborators (tree views, editors, schema checks) consume.

use std::fs;
use std::io;
use std::path::Path;

use crate::compression::Compression;
use crate::decoder::NbtDecoder;
use crate::encoder::NbtEncoder;
use crate::error::{DecodeError, EncodeError, TreeError};
use crate::nbt_value::NbtValue;
use crate::path::{resolve, resolve_mut, PathStep};
use crate::tag_str::TagStr;

/// One NBT document: a named root compound plus its compression policy.
///
/// The document exclusively owns its tree. Mutation goes through the
/// path-addressed operations below, all of which validate before touching
/// the tree, so a failed call leaves the document unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct NbtDocument {
    name: TagStr,
    root: NbtValue,
    compression: Compression,
}

impl Default for NbtDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl NbtDocument {
    /// An empty document with an anonymous root, saved gzip-compressed.
    pub fn new() -> Self {
        NbtDocument {
            name: TagStr::new(),
            root: NbtValue::compound(),
            compression: Compression::default(),
        }
    }

    /// Wraps an existing root compound. Fails with `TypeMismatch` if the
    /// value is not a compound.
    pub fn with_root(name: impl Into<TagStr>, root: NbtValue) -> Result<Self, TreeError> {
        if !matches!(root, NbtValue::Compound(_)) {
            return Err(TreeError::TypeMismatch);
        }
        Ok(NbtDocument {
            name: name.into(),
            root,
            compression: Compression::default(),
        })
    }

    /// Loads a document from raw file bytes: detects the compression
    /// envelope, inflates, decodes, and remembers the envelope scheme for
    /// the next save.
    pub fn load(bytes: &[u8]) -> Result<Self, DecodeError> {
        let compression = Compression::detect(bytes)?;
        let raw = compression.decompress(bytes)?;
        let (name, root) = NbtDecoder::new().decode(&raw)?;
        Ok(NbtDocument {
            name,
            root,
            compression,
        })
    }

    /// Encodes the tree and wraps it in the document's envelope.
    pub fn save(&self) -> Result<Vec<u8>, EncodeError> {
        let raw = NbtEncoder::new().encode(&self.name, &self.root)?;
        self.compression.compress(&raw)
    }

    /// Reads and decodes a document from disk. Decode failures surface as
    /// `io::ErrorKind::InvalidData`.
    pub fn read_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let bytes = fs::read(path)?;
        NbtDocument::load(&bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Encodes and writes the document to disk.
    pub fn write_file(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let bytes = self
            .save()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, bytes)
    }

    pub fn name(&self) -> &TagStr {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<TagStr>) {
        self.name = name.into();
    }

    pub fn root(&self) -> &NbtValue {
        &self.root
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Overrides the scheme used by the next save.
    pub fn set_compression(&mut self, compression: Compression) {
        self.compression = compression;
    }

    /// Resolves a path to a node. The empty path addresses the root.
    pub fn get(&self, path: &[PathStep<'_>]) -> Result<&NbtValue, TreeError> {
        resolve(&self.root, path)
    }

    /// Lists the direct children of a compound (named) or list (unnamed)
    /// node, in tree order. Fails with `TypeMismatch` on any other kind.
    pub fn children(
        &self,
        path: &[PathStep<'_>],
    ) -> Result<Vec<(Option<&TagStr>, &NbtValue)>, TreeError> {
        match resolve(&self.root, path)? {
            NbtValue::Compound(entries) => {
                Ok(entries.iter().map(|(n, v)| (Some(n), v)).collect())
            }
            NbtValue::List(list) => Ok(list.iter().map(|v| (None, v)).collect()),
            _ => Err(TreeError::TypeMismatch),
        }
    }

    /// Replaces a primitive (scalar or string) node with a new value of
    /// the same kind. No coercion: a `Short` target rejects an `Int`.
    pub fn set_primitive(
        &mut self,
        path: &[PathStep<'_>],
        value: NbtValue,
    ) -> Result<(), TreeError> {
        if !value.is_primitive() {
            return Err(TreeError::TypeMismatch);
        }
        let target = resolve_mut(&mut self.root, path)?;
        if target.kind() != value.kind() {
            return Err(TreeError::TypeMismatch);
        }
        *target = value;
        Ok(())
    }

    /// Replaces the contents of an array node with a new array of the same
    /// kind.
    pub fn set_array(&mut self, path: &[PathStep<'_>], elements: NbtValue) -> Result<(), TreeError> {
        if !elements.is_array() {
            return Err(TreeError::TypeMismatch);
        }
        let target = resolve_mut(&mut self.root, path)?;
        if target.kind() != elements.kind() {
            return Err(TreeError::TypeMismatch);
        }
        *target = elements;
        Ok(())
    }

    /// Inserts or replaces an entry of the compound at `compound_path`,
    /// last write wins.
    pub fn insert_entry(
        &mut self,
        compound_path: &[PathStep<'_>],
        name: &str,
        value: NbtValue,
    ) -> Result<(), TreeError> {
        resolve_mut(&mut self.root, compound_path)?.insert_entry(name, value)
    }

    /// Removes an entry by name from the compound at `compound_path`,
    /// returning the removed value. An absent name is a `PathNotFound`.
    pub fn remove_entry(
        &mut self,
        compound_path: &[PathStep<'_>],
        name: &str,
    ) -> Result<NbtValue, TreeError> {
        resolve_mut(&mut self.root, compound_path)?
            .remove_entry(name)?
            .ok_or(TreeError::PathNotFound)
    }

    /// Appends an element to the list at `path`, enforcing homogeneity.
    pub fn append_list_element(
        &mut self,
        path: &[PathStep<'_>],
        value: NbtValue,
    ) -> Result<(), TreeError> {
        match resolve_mut(&mut self.root, path)? {
            NbtValue::List(list) => list.try_push(value),
            _ => Err(TreeError::TypeMismatch),
        }
    }
}
