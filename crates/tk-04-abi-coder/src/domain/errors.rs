//! # ABI Errors

use thiserror::Error;
use tk_02_address_codec::AddressError;

/// Errors raised while parsing types or coding parameters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AbiError {
    /// Encoded data is not a whole number of 32-byte words
    #[error("Malformed encoding: {len} bytes is not a multiple of 32")]
    MalformedEncoding { len: usize },

    /// Base type name is not an ABI type
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// Type string does not parse
    #[error("Invalid type string: {0}")]
    InvalidTypeString(String),

    /// Numeric value exceeds the declared width
    #[error("Value {value} out of bounds for {ty}")]
    OutOfBounds { ty: String, value: String },

    /// Value has the wrong shape for its type
    #[error("Invalid value for {ty}: {reason}")]
    InvalidValue { ty: String, reason: String },

    /// Type and value lists differ in length
    #[error("Argument count mismatch: expected {expected}, got {actual}")]
    ArgumentCount { expected: usize, actual: usize },

    /// Argument absent while strict argument checking is enabled
    #[error("Missing argument {index} ({name})")]
    MissingArgument { index: usize, name: String },

    /// Failure reported by the external word coder
    #[error("ABI coder error: {0}")]
    Coder(String),

    /// Address value could not be rewritten
    #[error(transparent)]
    Address(#[from] AddressError),
}
