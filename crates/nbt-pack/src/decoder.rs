//! NBT binary decoder.
//!
//! Wire grammar (all multi-byte integers big-endian):
//! - Named tag:  `u8` kind id, `u16` name byte-length, name bytes, payload.
//! - Compound:   named tags until a lone `End` (0x00) byte.
//! - List:       `u8` element kind id, `i32` count, `count` unnamed payloads.
//! - Arrays:     `i32` count, then fixed-width 1/4/8-byte elements.
//! - String:     `u16` byte-length, then that many bytes.
//! - Primitives: fixed-width big-endian 1/2/4/8-byte encodings.

use crate::constants::TagKind;
use crate::error::DecodeError;
use crate::nbt_value::{NbtList, NbtValue};
use crate::tag_str::TagStr;

/// Bounds-checked cursor over the input buffer.
struct Cur<'a> {
    data: &'a [u8],
    x: usize,
}

impl<'a> Cur<'a> {
    #[inline]
    fn check(&self, n: usize) -> Result<(), DecodeError> {
        if self.x + n > self.data.len() {
            Err(DecodeError::UnexpectedEndOfData)
        } else {
            Ok(())
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        self.check(n)?;
        let bin = &self.data[self.x..self.x + n];
        self.x += n;
        Ok(bin)
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.data.len() - self.x
    }

    fn u8(&mut self) -> Result<u8, DecodeError> {
        self.check(1)?;
        let v = self.data[self.x];
        self.x += 1;
        Ok(v)
    }

    fn i8(&mut self) -> Result<i8, DecodeError> {
        Ok(self.u8()? as i8)
    }

    fn u16(&mut self) -> Result<u16, DecodeError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn i16(&mut self) -> Result<i16, DecodeError> {
        let b = self.take(2)?;
        Ok(i16::from_be_bytes([b[0], b[1]]))
    }

    fn i32(&mut self) -> Result<i32, DecodeError> {
        let b = self.take(4)?;
        Ok(i32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn i64(&mut self) -> Result<i64, DecodeError> {
        let b = self.take(8)?;
        Ok(i64::from_be_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    fn f32(&mut self) -> Result<f32, DecodeError> {
        let b = self.take(4)?;
        Ok(f32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn f64(&mut self) -> Result<f64, DecodeError> {
        let b = self.take(8)?;
        Ok(f64::from_be_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }
}

/// Recursive-descent decoder for raw (already decompressed) NBT bytes.
///
/// Any structural violation aborts the whole decode; a partial tree is
/// never returned.
#[derive(Default)]
pub struct NbtDecoder;

impl NbtDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decodes one document: a named root tag whose kind must be Compound.
    ///
    /// Returns the root name (zero-length names are preserved, not absent)
    /// and the root compound. The whole buffer must be consumed.
    pub fn decode(&self, input: &[u8]) -> Result<(TagStr, NbtValue), DecodeError> {
        let mut c = Cur { data: input, x: 0 };
        let kind_id = c.u8()?;
        if kind_id != TagKind::Compound.id() {
            return Err(DecodeError::InvalidRoot(kind_id));
        }
        let name = self.read_name(&mut c)?;
        let root = self.read_payload(TagKind::Compound, &mut c)?;
        if c.remaining() != 0 {
            return Err(DecodeError::TrailingData);
        }
        Ok((name, root))
    }

    fn read_name(&self, c: &mut Cur) -> Result<TagStr, DecodeError> {
        let len = c.u16()? as usize;
        Ok(TagStr::from_bytes(c.take(len)?.to_vec()))
    }

    /// Reads an `i32` count field, rejecting negative values.
    fn read_count(&self, c: &mut Cur) -> Result<usize, DecodeError> {
        let n = c.i32()?;
        if n < 0 {
            return Err(DecodeError::MalformedLength(n));
        }
        Ok(n as usize)
    }

    fn read_payload(&self, kind: TagKind, c: &mut Cur) -> Result<NbtValue, DecodeError> {
        match kind {
            // Callers never dispatch End as a payload kind.
            TagKind::End => Err(DecodeError::UnknownTagKind(TagKind::End.id())),
            TagKind::Byte => Ok(NbtValue::Byte(c.i8()?)),
            TagKind::Short => Ok(NbtValue::Short(c.i16()?)),
            TagKind::Int => Ok(NbtValue::Int(c.i32()?)),
            TagKind::Long => Ok(NbtValue::Long(c.i64()?)),
            TagKind::Float => Ok(NbtValue::Float(c.f32()?)),
            TagKind::Double => Ok(NbtValue::Double(c.f64()?)),
            TagKind::ByteArray => {
                let count = self.read_count(c)?;
                let raw = c.take(count)?;
                Ok(NbtValue::ByteArray(raw.iter().map(|b| *b as i8).collect()))
            }
            TagKind::String => {
                let len = c.u16()? as usize;
                Ok(NbtValue::String(TagStr::from_bytes(c.take(len)?.to_vec())))
            }
            TagKind::List => self.read_list(c),
            TagKind::Compound => self.read_compound(c),
            TagKind::IntArray => {
                let count = self.read_count(c)?;
                // Capacity capped by what the buffer can still hold, so a
                // huge count in a truncated file cannot balloon allocation.
                let mut items = Vec::with_capacity(count.min(c.remaining() / 4));
                for _ in 0..count {
                    items.push(c.i32()?);
                }
                Ok(NbtValue::IntArray(items))
            }
            TagKind::LongArray => {
                let count = self.read_count(c)?;
                let mut items = Vec::with_capacity(count.min(c.remaining() / 8));
                for _ in 0..count {
                    items.push(c.i64()?);
                }
                Ok(NbtValue::LongArray(items))
            }
        }
    }

    fn read_list(&self, c: &mut Cur) -> Result<NbtValue, DecodeError> {
        let elem_id = c.u8()?;
        let elem_kind = TagKind::from_u8(elem_id).ok_or(DecodeError::UnknownTagKind(elem_id))?;
        let count = self.read_count(c)?;
        if elem_kind == TagKind::End && count > 0 {
            // End is a valid declared kind only for an empty list.
            return Err(DecodeError::UnknownTagKind(TagKind::End.id()));
        }
        let mut items = Vec::with_capacity(count.min(c.remaining()));
        for _ in 0..count {
            items.push(self.read_payload(elem_kind, c)?);
        }
        Ok(NbtValue::List(NbtList::from_raw_parts(elem_kind, items)))
    }

    fn read_compound(&self, c: &mut Cur) -> Result<NbtValue, DecodeError> {
        let mut entries = Vec::new();
        loop {
            let id = c.u8()?;
            if id == TagKind::End.id() {
                break;
            }
            let kind = TagKind::from_u8(id).ok_or(DecodeError::UnknownTagKind(id))?;
            let name = self.read_name(c)?;
            let value = self.read_payload(kind, c)?;
            // Duplicate names are preserved in literal file order; lookup
            // through the tree API is last-value-wins.
            entries.push((name, value));
        }
        Ok(NbtValue::Compound(entries))
    }
}
