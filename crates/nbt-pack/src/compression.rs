//! Compression envelope: detects and transparently unwraps/wraps the
//! stream compression around raw document bytes.

use std::io::{Read, Write};

use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::ZlibEncoder;
use flate2::GzBuilder;

use crate::error::{DecodeError, EncodeError};

/// Gzip member header magic.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
/// Zstandard frame magic — recognized so it can be rejected explicitly.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xb5, 0x2f, 0xfd];

/// Compression scheme wrapped around a document.
///
/// A loaded document remembers its scheme and is saved with the same one.
/// Never-loaded documents default to `Gzip`, matching what Minecraft
/// tooling writes for `.dat` files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    None,
    #[default]
    Gzip,
    Zlib,
}

impl Compression {
    /// Identifies the envelope from the leading magic bytes.
    ///
    /// A zstd frame is recognized but not implemented and fails with
    /// `UnsupportedCompression`. Anything without a known magic is treated
    /// as a raw document.
    pub fn detect(data: &[u8]) -> Result<Compression, DecodeError> {
        if data.starts_with(&ZSTD_MAGIC) {
            return Err(DecodeError::UnsupportedCompression);
        }
        if data.starts_with(&GZIP_MAGIC) {
            return Ok(Compression::Gzip);
        }
        // Zlib: CMF byte 0x78 (deflate, 32K window) and the CMF/FLG
        // checksum divisible by 31.
        if data.len() >= 2 && data[0] == 0x78 && u16::from_be_bytes([data[0], data[1]]) % 31 == 0 {
            return Ok(Compression::Zlib);
        }
        Ok(Compression::None)
    }

    /// Fully inflates `data` into memory. Truncated or garbage streams
    /// fail with `CorruptStream`.
    pub fn decompress(self, data: &[u8]) -> Result<Vec<u8>, DecodeError> {
        match self {
            Compression::None => Ok(data.to_vec()),
            Compression::Gzip => {
                let mut out = Vec::new();
                GzDecoder::new(data)
                    .read_to_end(&mut out)
                    .map_err(|_| DecodeError::CorruptStream)?;
                Ok(out)
            }
            Compression::Zlib => {
                let mut out = Vec::new();
                ZlibDecoder::new(data)
                    .read_to_end(&mut out)
                    .map_err(|_| DecodeError::CorruptStream)?;
                Ok(out)
            }
        }
    }

    /// Wraps raw document bytes in this envelope.
    ///
    /// The gzip header mtime is pinned to 0 so saving the same document
    /// twice yields identical bytes.
    pub fn compress(self, data: &[u8]) -> Result<Vec<u8>, EncodeError> {
        match self {
            Compression::None => Ok(data.to_vec()),
            Compression::Gzip => {
                let mut enc = GzBuilder::new()
                    .mtime(0)
                    .write(Vec::new(), flate2::Compression::default());
                enc.write_all(data)
                    .map_err(|e| EncodeError::CompressionFailed(e.to_string()))?;
                enc.finish()
                    .map_err(|e| EncodeError::CompressionFailed(e.to_string()))
            }
            Compression::Zlib => {
                let mut enc = ZlibEncoder::new(Vec::new(), flate2::Compression::default());
                enc.write_all(data)
                    .map_err(|e| EncodeError::CompressionFailed(e.to_string()))?;
                enc.finish()
                    .map_err(|e| EncodeError::CompressionFailed(e.to_string()))
            }
        }
    }
}
