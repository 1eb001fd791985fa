//! NBT binary encoder — the structural inverse of the decoder.
//!
//! For an unmodified decoded tree, `encode` reproduces the input buffer
//! byte for byte: compound entries are written in tree order, empty lists
//! keep their recorded element kind, and a zero-length root name is still
//! written as a zero-length field.

use crate::constants::TagKind;
use crate::error::EncodeError;
use crate::nbt_value::{NbtList, NbtValue};
use crate::tag_str::TagStr;

/// Encodes an NBT tree into raw (uncompressed) document bytes.
#[derive(Default)]
pub struct NbtEncoder;

impl NbtEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encodes one document: root kind id, root name, compound payload.
    pub fn encode(&self, name: &TagStr, root: &NbtValue) -> Result<Vec<u8>, EncodeError> {
        if root.kind() != TagKind::Compound {
            return Err(EncodeError::RootNotCompound);
        }
        let mut buf = Vec::new();
        buf.push(TagKind::Compound.id());
        self.write_name(&mut buf, name)?;
        self.write_payload(&mut buf, root)?;
        Ok(buf)
    }

    fn write_name(&self, buf: &mut Vec<u8>, name: &TagStr) -> Result<(), EncodeError> {
        if name.len() > u16::MAX as usize {
            return Err(EncodeError::NameTooLong);
        }
        buf.extend_from_slice(&(name.len() as u16).to_be_bytes());
        buf.extend_from_slice(name.as_bytes());
        Ok(())
    }

    fn write_count(&self, buf: &mut Vec<u8>, count: usize) -> Result<(), EncodeError> {
        if count > i32::MAX as usize {
            return Err(EncodeError::SequenceTooLong);
        }
        buf.extend_from_slice(&(count as i32).to_be_bytes());
        Ok(())
    }

    fn write_payload(&self, buf: &mut Vec<u8>, value: &NbtValue) -> Result<(), EncodeError> {
        match value {
            NbtValue::Byte(v) => buf.extend_from_slice(&v.to_be_bytes()),
            NbtValue::Short(v) => buf.extend_from_slice(&v.to_be_bytes()),
            NbtValue::Int(v) => buf.extend_from_slice(&v.to_be_bytes()),
            NbtValue::Long(v) => buf.extend_from_slice(&v.to_be_bytes()),
            NbtValue::Float(v) => buf.extend_from_slice(&v.to_be_bytes()),
            NbtValue::Double(v) => buf.extend_from_slice(&v.to_be_bytes()),
            NbtValue::ByteArray(v) => {
                self.write_count(buf, v.len())?;
                buf.extend(v.iter().map(|b| *b as u8));
            }
            NbtValue::String(s) => {
                if s.len() > u16::MAX as usize {
                    return Err(EncodeError::StringTooLong);
                }
                buf.extend_from_slice(&(s.len() as u16).to_be_bytes());
                buf.extend_from_slice(s.as_bytes());
            }
            NbtValue::List(list) => self.write_list(buf, list)?,
            NbtValue::Compound(entries) => {
                for (name, value) in entries {
                    buf.push(value.kind().id());
                    self.write_name(buf, name)?;
                    self.write_payload(buf, value)?;
                }
                buf.push(TagKind::End.id());
            }
            NbtValue::IntArray(v) => {
                self.write_count(buf, v.len())?;
                for n in v {
                    buf.extend_from_slice(&n.to_be_bytes());
                }
            }
            NbtValue::LongArray(v) => {
                self.write_count(buf, v.len())?;
                for n in v {
                    buf.extend_from_slice(&n.to_be_bytes());
                }
            }
        }
        Ok(())
    }

    fn write_list(&self, buf: &mut Vec<u8>, list: &NbtList) -> Result<(), EncodeError> {
        buf.push(list.elem_kind().id());
        self.write_count(buf, list.len())?;
        for item in list {
            if item.kind() != list.elem_kind() {
                return Err(EncodeError::ListKindMismatch {
                    declared: list.elem_kind(),
                    found: item.kind(),
                });
            }
            self.write_payload(buf, item)?;
        }
        Ok(())
    }
}
