//! # Codec Errors

use thiserror::Error;

/// Errors raised by byte-level conversions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Input is not an even-length hex string
    #[error("Invalid hex string: {0:?}")]
    InvalidHex(String),

    /// Decoded bytes are not valid UTF-8
    #[error("Invalid UTF-8 in decoded bytes")]
    InvalidUtf8,

    /// Decoded byte length differs from the required length
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Value cannot be read as an integer
    #[error("Invalid integer: {0}")]
    InvalidInteger(String),

    /// Integer does not fit in 256 bits
    #[error("Integer overflows 256 bits: {0}")]
    IntegerOverflow(String),
}
