//! # Positional Parameter Coding
//!
//! Type-string lists paired with value lists. Only parameters declared as a
//! bare `address` are rewritten; addresses nested in arrays or tuples must
//! already be in `0x` form.

use super::errors::AbiError;
use super::rewrite::{address_from_abi, address_to_abi};
use super::types::TypeExpr;
use crate::ports::outbound::WordCoder;
use serde_json::{Map, Value};
use tk_01_byte_codec::WORD_SIZE;

/// Length of a method selector.
pub const SELECTOR_SIZE: usize = 4;

fn parse_types(types: &[&str]) -> Result<Vec<TypeExpr>, AbiError> {
    types.iter().map(|t| TypeExpr::parse(t)).collect()
}

/// Strip an optional selector and check word alignment.
pub(crate) fn prepare_data(data: &[u8], ignore_method_hash: bool) -> Result<&[u8], AbiError> {
    let data = if ignore_method_hash && data.len() % WORD_SIZE == SELECTOR_SIZE {
        &data[SELECTOR_SIZE..]
    } else {
        data
    };
    if data.len() % WORD_SIZE != 0 {
        return Err(AbiError::MalformedEncoding { len: data.len() });
    }
    Ok(data)
}

/// Encode `values` against `types`, in order.
pub fn encode_params<C>(types: &[&str], values: &[Value], coder: &C) -> Result<Vec<u8>, AbiError>
where
    C: WordCoder + ?Sized,
{
    if types.len() != values.len() {
        return Err(AbiError::ArgumentCount {
            expected: types.len(),
            actual: values.len(),
        });
    }
    let parsed = parse_types(types)?;
    let mut values = values.to_vec();
    for (ty, value) in parsed.iter().zip(values.iter_mut()) {
        if let TypeExpr::Primitive(p) = ty {
            address_to_abi(*p, value)?;
        }
    }
    coder.encode(&parsed, &values)
}

/// Decode `data` into a positional array, or a `name → value` object when
/// `names` is non-empty. With `ignore_method_hash`, data one selector longer
/// than a word multiple has its leading four bytes dropped first.
pub fn decode_params<C>(
    names: &[&str],
    types: &[&str],
    data: &[u8],
    ignore_method_hash: bool,
    coder: &C,
) -> Result<Value, AbiError>
where
    C: WordCoder + ?Sized,
{
    if !names.is_empty() && names.len() != types.len() {
        return Err(AbiError::ArgumentCount {
            expected: types.len(),
            actual: names.len(),
        });
    }
    let data = prepare_data(data, ignore_method_hash)?;
    let parsed = parse_types(types)?;
    let mut values = coder.decode(&parsed, data)?;

    for (ty, value) in parsed.iter().zip(values.iter_mut()) {
        if let TypeExpr::Primitive(p) = ty {
            address_from_abi(*p, value)?;
        }
    }

    if names.is_empty() {
        return Ok(Value::Array(values));
    }
    let object: Map<String, Value> = names
        .iter()
        .map(|n| n.to_string())
        .zip(values)
        .collect();
    Ok(Value::Object(object))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ethabi_coder::EthabiWordCoder;
    use serde_json::json;

    const BASE58: &str = "TPL66VK2gCXNCD7EJg9pgJRfqcRazjhUZY";
    const HEX21: &str = "41928c9af0651632157ef27a2cf17ca72c575a4d21";

    #[test]
    fn test_primitive_roundtrip() {
        let coder = EthabiWordCoder;
        let encoded = encode_params(&["string", "uint8"], &[json!("hi"), json!(255)], &coder)
            .unwrap();
        let decoded = decode_params(&[], &["string", "uint8"], &encoded, false, &coder).unwrap();

        assert_eq!(decoded, json!(["hi", 255]));
    }

    #[test]
    fn test_address_rewritten_both_ways() {
        let coder = EthabiWordCoder;
        let encoded = encode_params(
            &["address", "uint256"],
            &[json!(BASE58), json!(100)],
            &coder,
        )
        .unwrap();
        assert_eq!(&encoded[12..32], &hex::decode(&HEX21[2..]).unwrap()[..]);

        let decoded = decode_params(
            &["to", "amount"],
            &["address", "uint256"],
            &encoded,
            false,
            &coder,
        )
        .unwrap();
        assert_eq!(decoded, json!({"to": HEX21, "amount": 100}));
    }

    #[test]
    fn test_order_matters() {
        let coder = EthabiWordCoder;
        let a = encode_params(&["uint256", "uint256"], &[json!(1), json!(2)], &coder).unwrap();
        let b = encode_params(&["uint256", "uint256"], &[json!(2), json!(1)], &coder).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_method_hash_dropped_when_requested() {
        let coder = EthabiWordCoder;
        let mut data = vec![0xa9, 0x05, 0x9c, 0xbb];
        data.extend(encode_params(&["uint256"], &[json!(42)], &coder).unwrap());

        let decoded = decode_params(&[], &["uint256"], &data, true, &coder).unwrap();
        assert_eq!(decoded, json!([42]));

        assert_eq!(
            decode_params(&[], &["uint256"], &data, false, &coder),
            Err(AbiError::MalformedEncoding { len: 36 })
        );
    }

    #[test]
    fn test_unaligned_data_rejected() {
        let coder = EthabiWordCoder;
        assert_eq!(
            decode_params(&[], &["uint256"], &[0u8; 31], true, &coder),
            Err(AbiError::MalformedEncoding { len: 31 })
        );
    }

    #[test]
    fn test_trc_token_decodes_as_uint256() {
        let coder = EthabiWordCoder;
        let encoded = encode_params(&["uint256"], &[json!(1000001)], &coder).unwrap();
        let decoded = decode_params(&[], &["trcToken"], &encoded, false, &coder).unwrap();
        assert_eq!(decoded, json!([1000001]));
    }

    #[test]
    fn test_unknown_type() {
        let coder = EthabiWordCoder;
        assert_eq!(
            encode_params(&["uint257"], &[json!(1)], &coder),
            Err(AbiError::UnknownType("uint257".into()))
        );
    }

    #[test]
    fn test_invalid_address_value() {
        let coder = EthabiWordCoder;
        assert!(matches!(
            encode_params(&["address"], &[json!("TNotAnAddress")], &coder),
            Err(AbiError::Address(_))
        ));
    }
}
