//! # ABI Fragments
//!
//! The JSON shape of contract interface entries, as produced by compilers
//! and returned by nodes.

use super::errors::AbiError;
use super::types::{TupleField, TypeExpr};
use serde::{Deserialize, Serialize};
use shared_crypto::keccak256;

/// One parameter of a function, event or constructor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiParam {
    #[serde(default)]
    pub name: String,
    /// Raw type string, e.g. `uint256`, `address[]`, `tuple[2]`
    #[serde(rename = "type")]
    pub kind: String,
    /// Fields of a `tuple` type
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<AbiParam>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed: Option<bool>,
    #[serde(
        rename = "internalType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub internal_type: Option<String>,
}

impl AbiParam {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn with_components(mut self, components: Vec<AbiParam>) -> Self {
        self.components = components;
        self
    }

    /// Resolve to a type tree. `tuple…` types are built from `components`
    /// and then wrapped by whatever array suffix follows the word `tuple`.
    pub fn type_expr(&self) -> Result<TypeExpr, AbiError> {
        match self.kind.strip_prefix("tuple") {
            Some(suffix) if !suffix.starts_with('(') => {
                let fields = self
                    .components
                    .iter()
                    .map(|c| {
                        Ok(TupleField {
                            name: (!c.name.is_empty()).then(|| c.name.clone()),
                            ty: c.type_expr()?,
                        })
                    })
                    .collect::<Result<Vec<_>, AbiError>>()?;
                TypeExpr::Tuple(fields).with_array_suffix(suffix)
            }
            _ => TypeExpr::parse(&self.kind),
        }
    }
}

/// A function (or constructor) entry of a contract ABI.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiFunction {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub inputs: Vec<AbiParam>,
    #[serde(default)]
    pub outputs: Vec<AbiParam>,
    #[serde(
        rename = "stateMutability",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub state_mutability: Option<String>,
}

impl AbiFunction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: Some("function".to_string()),
            ..Self::default()
        }
    }

    pub fn with_inputs(mut self, inputs: Vec<AbiParam>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<AbiParam>) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn input_types(&self) -> Result<Vec<TypeExpr>, AbiError> {
        self.inputs.iter().map(AbiParam::type_expr).collect()
    }

    pub fn output_types(&self) -> Result<Vec<TypeExpr>, AbiError> {
        self.outputs.iter().map(AbiParam::type_expr).collect()
    }

    /// `name(type,...)` with `trcToken` folded to `uint256`.
    pub fn signature(&self) -> Result<String, AbiError> {
        let types = self
            .input_types()?
            .iter()
            .map(|t| t.canonical().to_string())
            .collect::<Vec<_>>()
            .join(",");
        Ok(format!("{}({types})", self.name))
    }

    /// First four bytes of `keccak256(signature)`.
    pub fn selector(&self) -> Result<[u8; 4], AbiError> {
        let hash = keccak256(self.signature()?.as_bytes());
        Ok([hash[0], hash[1], hash[2], hash[3]])
    }
}
