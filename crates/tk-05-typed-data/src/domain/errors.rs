//! # Typed Data Errors
//!
//! Schema errors surface from [`TypedDataEncoder::new`](super::encoder::TypedDataEncoder::new)
//! and are permanent for that schema. Value errors are per call and leave
//! the encoder usable.

use thiserror::Error;
use tk_02_address_codec::AddressError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypedDataError {
    /// Two fields of one struct share a name
    #[error("Duplicate field {field} in {type_name}")]
    DuplicateField { type_name: String, field: String },

    /// Field type is neither primitive nor a declared struct
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// Struct reaches itself through its fields
    #[error("Circular type reference: {0}")]
    CircularType(String),

    /// Schema declares no struct
    #[error("Missing primary type")]
    NoPrimaryType,

    /// More than one struct is referenced by nothing
    #[error("Ambiguous primary types or unused types: {0:?}")]
    AmbiguousPrimaryType(Vec<String>),

    /// Integer exceeds the declared width
    #[error("Value {value} out of bounds for {ty}")]
    OutOfBounds { ty: String, value: String },

    /// Value has the wrong shape for its type
    #[error("Invalid value for {ty}: {reason}")]
    InvalidValue { ty: String, reason: String },

    /// Domain field failed validation
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    #[error(transparent)]
    Address(#[from] AddressError),
}
