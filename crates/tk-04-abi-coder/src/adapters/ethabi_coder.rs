//! # ethabi Word Coder
//!
//! [`WordCoder`] backed by the `ethabi` crate. JSON values are converted to
//! `ethabi::Token`s with width checks `ethabi` itself does not perform.

use crate::domain::errors::AbiError;
use crate::domain::types::{Primitive, TypeExpr};
use crate::ports::outbound::WordCoder;
use ethabi::{ParamType, Token};
use serde_json::Value;
use tk_01_byte_codec::{bytes_to_hex_prefixed, decode_fixed, hex_to_bytes, Integer};

/// Word coder using `ethabi::encode` / `ethabi::decode`.
#[derive(Clone, Copy, Debug, Default)]
pub struct EthabiWordCoder;

impl WordCoder for EthabiWordCoder {
    fn encode(&self, types: &[TypeExpr], values: &[Value]) -> Result<Vec<u8>, AbiError> {
        if types.len() != values.len() {
            return Err(AbiError::ArgumentCount {
                expected: types.len(),
                actual: values.len(),
            });
        }
        let tokens = types
            .iter()
            .zip(values)
            .map(|(ty, value)| to_token(&ty.canonical(), value))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ethabi::encode(&tokens))
    }

    fn decode(&self, types: &[TypeExpr], data: &[u8]) -> Result<Vec<Value>, AbiError> {
        let canonical: Vec<TypeExpr> = types.iter().map(TypeExpr::canonical).collect();
        let params: Vec<ParamType> = canonical.iter().map(param_type).collect();
        let tokens = ethabi::decode(&params, data).map_err(|e| AbiError::Coder(e.to_string()))?;
        canonical
            .iter()
            .zip(tokens)
            .map(|(ty, token)| from_token(ty, token))
            .collect()
    }
}

fn param_type(ty: &TypeExpr) -> ParamType {
    match ty {
        TypeExpr::Primitive(p) => match p.canonical() {
            Primitive::Address => ParamType::Address,
            Primitive::Bool => ParamType::Bool,
            Primitive::String => ParamType::String,
            Primitive::Bytes => ParamType::Bytes,
            Primitive::FixedBytes(n) => ParamType::FixedBytes(n),
            Primitive::Int(bits) => ParamType::Int(bits),
            Primitive::Uint(bits) => ParamType::Uint(bits),
            Primitive::TrcToken => ParamType::Uint(256),
        },
        TypeExpr::Tuple(fields) => {
            ParamType::Tuple(fields.iter().map(|f| param_type(&f.ty)).collect())
        }
        TypeExpr::Array(elem, Some(n)) => ParamType::FixedArray(Box::new(param_type(elem)), *n),
        TypeExpr::Array(elem, None) => ParamType::Array(Box::new(param_type(elem))),
    }
}

fn invalid(ty: &TypeExpr, reason: impl Into<String>) -> AbiError {
    AbiError::InvalidValue {
        ty: ty.to_string(),
        reason: reason.into(),
    }
}

fn expect_str<'v>(ty: &TypeExpr, value: &'v Value) -> Result<&'v str, AbiError> {
    value
        .as_str()
        .ok_or_else(|| invalid(ty, format!("expected string, got {value}")))
}

fn integer(ty: &TypeExpr, value: &Value, signed: bool, bits: usize) -> Result<Integer, AbiError> {
    let int = Integer::from_json(value).map_err(|e| invalid(ty, e.to_string()))?;
    if !int.fits(signed, bits) {
        return Err(AbiError::OutOfBounds {
            ty: ty.to_string(),
            value: int.to_string(),
        });
    }
    Ok(int)
}

fn to_token(ty: &TypeExpr, value: &Value) -> Result<Token, AbiError> {
    match ty {
        TypeExpr::Primitive(p) => match *p {
            Primitive::Address => {
                let raw: [u8; 20] = decode_fixed(expect_str(ty, value)?)
                    .map_err(|e| invalid(ty, e.to_string()))?;
                Ok(Token::Address(ethabi::Address::from(raw)))
            }
            Primitive::Bool => value
                .as_bool()
                .map(Token::Bool)
                .ok_or_else(|| invalid(ty, format!("expected bool, got {value}"))),
            Primitive::String => Ok(Token::String(expect_str(ty, value)?.to_string())),
            Primitive::Bytes => {
                let bytes =
                    hex_to_bytes(expect_str(ty, value)?).map_err(|e| invalid(ty, e.to_string()))?;
                Ok(Token::Bytes(bytes))
            }
            Primitive::FixedBytes(n) => {
                let bytes =
                    hex_to_bytes(expect_str(ty, value)?).map_err(|e| invalid(ty, e.to_string()))?;
                if bytes.len() != n {
                    return Err(invalid(ty, format!("expected {n} bytes, got {}", bytes.len())));
                }
                Ok(Token::FixedBytes(bytes))
            }
            Primitive::Int(bits) => {
                let word = integer(ty, value, true, bits)?.to_word();
                Ok(Token::Int(ethabi::Int::from_big_endian(&word)))
            }
            Primitive::Uint(bits) => {
                let word = integer(ty, value, false, bits)?.to_word();
                Ok(Token::Uint(ethabi::Uint::from_big_endian(&word)))
            }
            Primitive::TrcToken => to_token(&TypeExpr::Primitive(p.canonical()), value),
        },
        TypeExpr::Array(elem, size) => {
            let items = value
                .as_array()
                .ok_or_else(|| invalid(ty, format!("expected array, got {value}")))?;
            if let Some(n) = size {
                if items.len() != *n {
                    return Err(invalid(
                        ty,
                        format!("expected {n} elements, got {}", items.len()),
                    ));
                }
            }
            let tokens = items
                .iter()
                .map(|item| to_token(elem, item))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(match size {
                Some(_) => Token::FixedArray(tokens),
                None => Token::Array(tokens),
            })
        }
        TypeExpr::Tuple(fields) => {
            let tokens = match value {
                Value::Array(items) => {
                    if items.len() != fields.len() {
                        return Err(invalid(
                            ty,
                            format!("expected {} components, got {}", fields.len(), items.len()),
                        ));
                    }
                    fields
                        .iter()
                        .zip(items)
                        .map(|(field, item)| to_token(&field.ty, item))
                        .collect::<Result<Vec<_>, _>>()?
                }
                Value::Object(map) => fields
                    .iter()
                    .enumerate()
                    .map(|(i, field)| {
                        let item = field
                            .name
                            .as_ref()
                            .and_then(|name| map.get(name))
                            .ok_or_else(|| invalid(ty, format!("missing component {i}")))?;
                        to_token(&field.ty, item)
                    })
                    .collect::<Result<Vec<_>, _>>()?,
                other => return Err(invalid(ty, format!("expected tuple, got {other}"))),
            };
            Ok(Token::Tuple(tokens))
        }
    }
}

fn from_token(ty: &TypeExpr, token: Token) -> Result<Value, AbiError> {
    let value = match (ty, token) {
        (TypeExpr::Primitive(Primitive::Address), Token::Address(address)) => {
            Value::String(bytes_to_hex_prefixed(address.as_bytes()))
        }
        (TypeExpr::Primitive(Primitive::Bool), Token::Bool(b)) => Value::Bool(b),
        (TypeExpr::Primitive(Primitive::String), Token::String(s)) => Value::String(s),
        (TypeExpr::Primitive(Primitive::Bytes), Token::Bytes(bytes))
        | (TypeExpr::Primitive(Primitive::FixedBytes(_)), Token::FixedBytes(bytes)) => {
            Value::String(bytes_to_hex_prefixed(&bytes))
        }
        (TypeExpr::Primitive(Primitive::Int(bits)), Token::Int(word)) => {
            let mut raw = [0u8; 32];
            word.to_big_endian(&mut raw);
            Integer::from_word_width(&raw, true, *bits).to_json()
        }
        (TypeExpr::Primitive(Primitive::Uint(bits)), Token::Uint(word)) => {
            let mut raw = [0u8; 32];
            word.to_big_endian(&mut raw);
            Integer::from_word_width(&raw, false, *bits).to_json()
        }
        (TypeExpr::Array(elem, _), Token::Array(items) | Token::FixedArray(items)) => {
            Value::Array(
                items
                    .into_iter()
                    .map(|item| from_token(elem, item))
                    .collect::<Result<_, _>>()?,
            )
        }
        (TypeExpr::Tuple(fields), Token::Tuple(items)) => Value::Array(
            fields
                .iter()
                .zip(items)
                .map(|(field, item)| from_token(&field.ty, item))
                .collect::<Result<_, _>>()?,
        ),
        (ty, token) => {
            return Err(AbiError::Coder(format!(
                "decoded {token:?} does not match {ty}"
            )))
        }
    };
    Ok(value)
}
