//! AMF0 error type.

use std::io;
use std::num::TryFromIntError;

/// Result type.
pub type Result<T> = std::result::Result<T, Amf0Error>;

/// AMF0 error.
#[derive(thiserror::Error, Debug)]
pub enum Amf0Error {
    /// IO error while encoding.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    /// The buffer ended in the middle of a value.
    #[error("unexpected end of data: needed {requested} bytes, {available} available")]
    UnexpectedEof {
        /// Number of bytes the decoder tried to read.
        requested: usize,
        /// Number of bytes that were left.
        available: usize,
    },
    /// The marker is unknown or not supported by this decoder.
    #[error("unsupported marker: 0x{0:02x}")]
    UnsupportedMarker(u8),
    /// Objects are nested deeper than the decoder allows.
    #[error("nesting depth exceeds {0}")]
    NestingTooDeep(usize),
    /// Element (string or key) is too long to be encoded.
    #[error("element is too long: {0}")]
    TooLong(#[from] TryFromIntError),
}

impl From<bytes::TryGetError> for Amf0Error {
    fn from(err: bytes::TryGetError) -> Self {
        Amf0Error::UnexpectedEof {
            requested: err.requested,
            available: err.available,
        }
    }
}
