//! # Schema-Driven Parameter Coding
//!
//! Coding driven by a function's ABI fragment. Every `address` leaf is
//! rewritten, however deeply it sits in tuples and arrays.

use super::abi::AbiFunction;
use super::errors::AbiError;
use super::params::prepare_data;
use super::rewrite::{address_from_abi, address_to_abi, walk_leaves};
use super::types::Primitive;
use crate::ports::outbound::WordCoder;
use serde::Serialize;
use serde_json::{Map, Value};
use tk_01_byte_codec::WORD_SIZE;

/// Decoded outputs: positional values plus the declared output names.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DecodedOutputs {
    values: Vec<Value>,
    names: Vec<String>,
}

impl DecodedOutputs {
    pub fn new(values: Vec<Value>, names: Vec<String>) -> Self {
        Self { values, names }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Look up an output by its declared name.
    pub fn by_name(&self, name: &str) -> Option<&Value> {
        self.names
            .iter()
            .position(|n| !n.is_empty() && n == name)
            .and_then(|i| self.values.get(i))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// An object keyed by name when every output is named, else an array.
    pub fn to_json(&self) -> Value {
        if self.names.is_empty() || self.names.iter().any(String::is_empty) {
            return Value::Array(self.values.clone());
        }
        let object: Map<String, Value> = self
            .names
            .iter()
            .cloned()
            .zip(self.values.iter().cloned())
            .collect();
        Value::Object(object)
    }
}

fn prepare_input(primitive: Primitive, value: &mut Value) -> Result<(), AbiError> {
    if primitive == Primitive::Bool {
        match value.as_str() {
            Some("false") => *value = Value::Bool(false),
            Some("true") => *value = Value::Bool(true),
            _ => {}
        }
        return Ok(());
    }
    address_to_abi(primitive, value)
}

/// Encode `args` against `function.inputs`.
///
/// Missing trailing arguments are padded with `""` unless `strict` is set,
/// in which case the first gap is reported as [`AbiError::MissingArgument`].
pub fn encode_params_v2_by_abi<C>(
    function: &AbiFunction,
    args: &[Value],
    strict: bool,
    coder: &C,
) -> Result<Vec<u8>, AbiError>
where
    C: WordCoder + ?Sized,
{
    let types = function.input_types()?;
    if args.len() > types.len() {
        return Err(AbiError::ArgumentCount {
            expected: types.len(),
            actual: args.len(),
        });
    }

    let mut values = Vec::with_capacity(types.len());
    for (index, ty) in types.iter().enumerate() {
        let mut value = match args.get(index) {
            Some(arg) => arg.clone(),
            None if strict => {
                return Err(AbiError::MissingArgument {
                    index,
                    name: function.inputs[index].name.clone(),
                })
            }
            None => Value::String(String::new()),
        };
        walk_leaves(ty, &mut value, &mut prepare_input)?;
        values.push(value);
    }

    coder.encode(&types, &values)
}

/// Decode `data` against `function.outputs`.
///
/// Empty data for a non-empty output list decodes as one zero word per
/// output.
pub fn decode_params_v2_by_abi<C>(
    function: &AbiFunction,
    data: &[u8],
    ignore_method_hash: bool,
    coder: &C,
) -> Result<DecodedOutputs, AbiError>
where
    C: WordCoder + ?Sized,
{
    let types = function.output_types()?;
    let zeroes;
    let data = if data.is_empty() && !types.is_empty() {
        zeroes = vec![0u8; WORD_SIZE * types.len()];
        zeroes.as_slice()
    } else {
        prepare_data(data, ignore_method_hash)?
    };

    let mut values = coder.decode(&types, data)?;
    for (ty, value) in types.iter().zip(values.iter_mut()) {
        walk_leaves(ty, value, &mut address_from_abi)?;
    }

    let names = function.outputs.iter().map(|p| p.name.clone()).collect();
    Ok(DecodedOutputs::new(values, names))
}
