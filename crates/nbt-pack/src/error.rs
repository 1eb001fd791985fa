//! Error types for decoding, encoding, and tree mutation.

use thiserror::Error;

use crate::constants::TagKind;

/// Errors aborting a whole load. No partial tree is ever returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("compressed stream signature is recognized but not supported")]
    UnsupportedCompression,
    #[error("compressed stream is corrupt or truncated")]
    CorruptStream,
    #[error("root tag must be a compound, got kind id 0x{0:02x}")]
    InvalidRoot(u8),
    #[error("unknown tag kind id 0x{0:02x}")]
    UnknownTagKind(u8),
    #[error("negative length or count field: {0}")]
    MalformedLength(i32),
    #[error("unexpected end of data")]
    UnexpectedEndOfData,
    #[error("bytes remain after the root compound closes")]
    TrailingData,
}

/// Encode-side invariant checks.
///
/// Unreachable for trees built and mutated only through this crate's API,
/// but collaborators hold `&mut` access long enough that every write is
/// still verified.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("root value must be a compound")]
    RootNotCompound,
    #[error("list element kind mismatch: declared {declared}, found {found}")]
    ListKindMismatch { declared: TagKind, found: TagKind },
    #[error("tag name longer than 65535 bytes")]
    NameTooLong,
    #[error("string payload longer than 65535 bytes")]
    StringTooLong,
    #[error("sequence longer than 2147483647 elements")]
    SequenceTooLong,
    #[error("compression failed: {0}")]
    CompressionFailed(String),
}

/// Errors from tree construction and path-addressed mutation.
///
/// These are local and recoverable: the tree is left unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("path does not resolve to a node")]
    PathNotFound,
    #[error("node kind does not match the operation")]
    TypeMismatch,
    #[error("value invariant violated: {0}")]
    InvariantViolation(String),
}
