//! # Outbound Ports (Driven Ports)
//!
//! The general-purpose ABI word coder this crate delegates packing to.

use crate::domain::errors::AbiError;
use crate::domain::types::TypeExpr;
use serde_json::Value;

/// Packs typed values into 32-byte words and back.
///
/// Implementations know nothing about chain address shapes: `address`
/// values arrive as `0x` + 40 hex chars and must be returned the same way.
/// Integers leave as JSON numbers when they fit 64 bits and as decimal
/// strings otherwise; byte strings leave as `0x` hex; tuples leave as
/// positional arrays.
pub trait WordCoder: Send + Sync {
    /// Encode `values` against `types` (same length, same order).
    fn encode(&self, types: &[TypeExpr], values: &[Value]) -> Result<Vec<u8>, AbiError>;

    /// Decode one value per entry of `types`.
    fn decode(&self, types: &[TypeExpr], data: &[u8]) -> Result<Vec<Value>, AbiError>;
}
