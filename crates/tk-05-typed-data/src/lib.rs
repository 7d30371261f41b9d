//! # Typed Data (TK-05)
//!
//! Deterministic hashing of typed value trees bound to a domain separator.
//!
//! A [`TypedDataEncoder`] is built once per schema. Construction validates
//! the type graph (duplicate fields, unknown or circular references, a
//! single primary type) and precomputes each struct's full type string.
//! Field encoders are resolved lazily and cached for the encoder's lifetime.
//!
//! The signing payload is `0x19 0x01 || hash_domain(domain) || hash(value)`.

pub mod domain;

pub use domain::encoder::{FieldEncoder, TypedDataEncoder};
pub use domain::entities::{TypedDataDomain, TypedDataField, TypedDataTypes};
pub use domain::errors::TypedDataError;
pub use domain::separator::{
    encode_typed_data, get_payload, hash_domain, hash_typed_data, DOMAIN_TYPE_NAME,
    TYPED_DATA_PREFIX,
};
