//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of this subsystem.

use crate::domain::abi::AbiFunction;
use crate::domain::errors::AbiError;
use crate::domain::v2::DecodedOutputs;
use serde_json::Value;

/// Primary ABI Coder API.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait AbiCoderApi: Send + Sync {
    /// Positional encode; top-level `address` values may use any form.
    fn encode_params(&self, types: &[&str], values: &[Value]) -> Result<Vec<u8>, AbiError>;

    /// Positional decode into an array, or an object when `names` is non-empty.
    fn decode_params(&self, names: &[&str], types: &[&str], data: &[u8])
        -> Result<Value, AbiError>;

    /// Schema-driven encode of `function.inputs`.
    fn encode_params_v2_by_abi(
        &self,
        function: &AbiFunction,
        args: &[Value],
    ) -> Result<Vec<u8>, AbiError>;

    /// Schema-driven decode of `function.outputs`.
    fn decode_params_v2_by_abi(
        &self,
        function: &AbiFunction,
        data: &[u8],
    ) -> Result<DecodedOutputs, AbiError>;

    /// Call data: 4-byte selector followed by the schema-driven arguments.
    fn encode_call(&self, function: &AbiFunction, args: &[Value]) -> Result<Vec<u8>, AbiError>;
}
