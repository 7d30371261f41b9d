//! # Leaf Rewriting
//!
//! Walks a JSON value alongside its [`TypeExpr`] and hands every primitive
//! leaf to a visitor. Arrays descend once per dimension; tuples accept
//! either positional arrays or objects keyed by component name. Values
//! whose shape does not match the type are left for the word coder to
//! reject.

use super::errors::AbiError;
use super::types::{Primitive, TypeExpr};
use serde_json::Value;
use tk_02_address_codec::{to_hex_for_abi, Address};

/// Visit every primitive leaf of `value` typed by `ty`.
pub fn walk_leaves<F>(ty: &TypeExpr, value: &mut Value, visit: &mut F) -> Result<(), AbiError>
where
    F: FnMut(Primitive, &mut Value) -> Result<(), AbiError>,
{
    match ty {
        TypeExpr::Primitive(p) => visit(*p, value),
        TypeExpr::Array(elem, _) => {
            if let Value::Array(items) = value {
                for item in items {
                    walk_leaves(elem, item, visit)?;
                }
            }
            Ok(())
        }
        TypeExpr::Tuple(fields) => match value {
            Value::Array(items) => {
                for (field, item) in fields.iter().zip(items.iter_mut()) {
                    walk_leaves(&field.ty, item, visit)?;
                }
                Ok(())
            }
            Value::Object(map) => {
                for field in fields {
                    if let Some(item) = field.name.as_ref().and_then(|n| map.get_mut(n)) {
                        walk_leaves(&field.ty, item, visit)?;
                    }
                }
                Ok(())
            }
            _ => Ok(()),
        },
    }
}

/// Non-empty string leaves of an `address` type, or `None`.
fn address_leaf(primitive: Primitive, value: &mut Value) -> Option<&mut String> {
    match (primitive, value) {
        (Primitive::Address, Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

/// Any address form → `0x` + 40 hex chars.
pub fn address_to_abi(primitive: Primitive, value: &mut Value) -> Result<(), AbiError> {
    if let Some(s) = address_leaf(primitive, value) {
        *s = to_hex_for_abi(s)?;
    }
    Ok(())
}

/// `0x` + 40 hex chars → `41` + 40 lowercase hex chars.
pub fn address_from_abi(primitive: Primitive, value: &mut Value) -> Result<(), AbiError> {
    if let Some(s) = address_leaf(primitive, value) {
        *s = Address::from_hex(s)?.to_hex21();
    }
    Ok(())
}
