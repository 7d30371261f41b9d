//! # Domain Separator
//!
//! The domain is hashed as an ad-hoc `EIP712Domain` struct made of the
//! fields actually present, always in the order
//! `name, version, chainId, verifyingContract, salt`.

use super::encoder::TypedDataEncoder;
use super::entities::{TypedDataDomain, TypedDataField, TypedDataTypes};
use super::errors::TypedDataError;
use serde_json::{json, Map, Value};
use shared_crypto::{keccak256, Hash};
use tk_01_byte_codec::{bytes_to_hex_prefixed, hex_to_bytes, Integer};
use tk_02_address_codec::Address;
use tk_04_abi_coder::Primitive;

/// Struct name of the domain separator.
pub const DOMAIN_TYPE_NAME: &str = "EIP712Domain";

/// Leading bytes of every typed-data signing payload.
pub const TYPED_DATA_PREFIX: [u8; 2] = [0x19, 0x01];

/// Validated domain as parallel field declarations and a JSON object.
fn domain_struct(
    domain: &TypedDataDomain,
) -> Result<(Vec<TypedDataField>, Map<String, Value>), TypedDataError> {
    let mut fields = Vec::new();
    let mut values = Map::new();

    for (key, text) in [("name", &domain.name), ("version", &domain.version)] {
        if let Some(text) = text {
            if text.is_empty() {
                return Err(TypedDataError::InvalidDomain(format!("{key} must not be empty")));
            }
            fields.push(TypedDataField::new(key, "string"));
            values.insert(key.to_string(), Value::String(text.clone()));
        }
    }

    if let Some(chain_id) = &domain.chain_id {
        let id = Integer::from_json(chain_id)
            .ok()
            .filter(|id| id.fits(false, 256))
            .ok_or_else(|| {
                TypedDataError::InvalidDomain(format!("invalid chainId: {chain_id}"))
            })?;
        fields.push(TypedDataField::new("chainId", "uint256"));
        values.insert("chainId".into(), Value::String(id.to_string()));
    }

    if let Some(contract) = &domain.verifying_contract {
        let address = Address::parse(contract).map_err(|e| {
            TypedDataError::InvalidDomain(format!("invalid verifyingContract: {e}"))
        })?;
        fields.push(TypedDataField::new("verifyingContract", "address"));
        values.insert("verifyingContract".into(), Value::String(address.to_hex21()));
    }

    if let Some(salt) = &domain.salt {
        let bytes = hex_to_bytes(salt)
            .ok()
            .filter(|b| b.len() == 32)
            .ok_or_else(|| TypedDataError::InvalidDomain(format!("invalid salt: {salt}")))?;
        fields.push(TypedDataField::new("salt", "bytes32"));
        values.insert("salt".into(), Value::String(bytes_to_hex_prefixed(&bytes)));
    }

    Ok((fields, values))
}

/// Hash of the domain separator struct.
pub fn hash_domain(domain: &TypedDataDomain) -> Result<Hash, TypedDataError> {
    let (fields, values) = domain_struct(domain)?;
    let mut types = TypedDataTypes::new();
    types.insert(DOMAIN_TYPE_NAME.to_string(), fields);
    TypedDataEncoder::new(types)?.hash_struct(DOMAIN_TYPE_NAME, &Value::Object(values))
}

fn message_encoder(types: &TypedDataTypes) -> Result<TypedDataEncoder, TypedDataError> {
    let mut types = types.clone();
    types.remove(DOMAIN_TYPE_NAME);
    TypedDataEncoder::new(types)
}

/// `0x19 0x01 || hash_domain(domain) || hash(value)`
pub fn encode_typed_data(
    domain: &TypedDataDomain,
    types: &TypedDataTypes,
    value: &Value,
) -> Result<Vec<u8>, TypedDataError> {
    let domain_hash = hash_domain(domain)?;
    let struct_hash = message_encoder(types)?.hash(value)?;

    let mut out = Vec::with_capacity(TYPED_DATA_PREFIX.len() + 64);
    out.extend_from_slice(&TYPED_DATA_PREFIX);
    out.extend_from_slice(&domain_hash);
    out.extend_from_slice(&struct_hash);
    Ok(out)
}

/// The digest a signer signs.
pub fn hash_typed_data(
    domain: &TypedDataDomain,
    types: &TypedDataTypes,
    value: &Value,
) -> Result<Hash, TypedDataError> {
    Ok(keccak256(&encode_typed_data(domain, types, value)?))
}

/// JSON request body for wallets: `types` (domain included), `domain`,
/// `primaryType` and a normalized `message`.
///
/// Integers become decimal strings, byte strings lowercase `0x` hex and
/// addresses their `41`-prefixed hex form.
pub fn get_payload(
    domain: &TypedDataDomain,
    types: &TypedDataTypes,
    value: &Value,
) -> Result<Value, TypedDataError> {
    let (domain_fields, domain_values) = domain_struct(domain)?;
    let encoder = message_encoder(types)?;
    let message = normalize(&encoder, encoder.primary_type(), value)?;

    let mut all_types = encoder.types().clone();
    all_types.insert(DOMAIN_TYPE_NAME.to_string(), domain_fields);

    Ok(json!({
        "types": all_types,
        "domain": domain_values,
        "primaryType": encoder.primary_type(),
        "message": message,
    }))
}

fn normalize(encoder: &TypedDataEncoder, kind: &str, value: &Value) -> Result<Value, TypedDataError> {
    let invalid = |reason: String| TypedDataError::InvalidValue {
        ty: kind.to_string(),
        reason,
    };

    if let Some(body) = kind.strip_suffix(']') {
        let open = body
            .rfind('[')
            .ok_or_else(|| TypedDataError::UnknownType(kind.to_string()))?;
        let items = value
            .as_array()
            .ok_or_else(|| invalid(format!("expected array, got {value}")))?;
        return items
            .iter()
            .map(|item| normalize(encoder, &body[..open], item))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array);
    }

    if let Some(fields) = encoder.types().get(kind) {
        let object = value
            .as_object()
            .ok_or_else(|| invalid(format!("expected object, got {value}")))?;
        let mut out = Map::new();
        for field in fields {
            let item = object
                .get(&field.name)
                .ok_or_else(|| invalid(format!("missing field {}", field.name)))?;
            out.insert(field.name.clone(), normalize(encoder, &field.kind, item)?);
        }
        return Ok(Value::Object(out));
    }

    // Validates the leaf with the encoder's own rules.
    encoder.encode_data(kind, value)?;
    let primitive =
        Primitive::parse(kind).ok_or_else(|| TypedDataError::UnknownType(kind.to_string()))?;
    Ok(match primitive {
        Primitive::Int(_) | Primitive::Uint(_) | Primitive::TrcToken => {
            let int = Integer::from_json(value).map_err(|e| invalid(e.to_string()))?;
            Value::String(int.to_string())
        }
        Primitive::Address => {
            let text = value.as_str().unwrap_or_default();
            Value::String(Address::parse(text)?.to_hex21())
        }
        Primitive::Bytes | Primitive::FixedBytes(_) => {
            let text = value.as_str().unwrap_or_default();
            let bytes = hex_to_bytes(text).map_err(|e| invalid(e.to_string()))?;
            Value::String(bytes_to_hex_prefixed(&bytes))
        }
        Primitive::Bool | Primitive::String => value.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, kind: &str) -> TypedDataField {
        TypedDataField::new(name, kind)
    }

    fn mail_types() -> TypedDataTypes {
        let mut types = TypedDataTypes::new();
        types.insert(
            "Person".into(),
            vec![field("name", "string"), field("wallet", "address")],
        );
        types.insert(
            "Mail".into(),
            vec![
                field("from", "Person"),
                field("to", "Person"),
                field("contents", "string"),
            ],
        );
        types
    }

    fn mail_domain() -> TypedDataDomain {
        TypedDataDomain::default()
            .with_name("Ether Mail")
            .with_version("1")
            .with_chain_id(1)
            .with_verifying_contract("0xCcCCccccCCCCcCCCCCCcCcCccCcCCCcCcccccccC")
    }

    fn mail_value() -> Value {
        json!({
            "from": {"name": "Cow", "wallet": "0xCD2a3d9F938E13CD947Ec05AbC7FE734Df8DD826"},
            "to": {"name": "Bob", "wallet": "0xbBbBBBBbbBBBbbbBbbBbbbbBBbBbbbbBbBbbBBbB"},
            "contents": "Hello, Bob!"
        })
    }

    #[test]
    fn test_mail_domain_and_digest() {
        assert_eq!(
            hex::encode(hash_domain(&mail_domain()).unwrap()),
            "f2cee375fa42b42143804025fc449deafd50cc031ca257e0b194a650a912090f"
        );

        let encoded = encode_typed_data(&mail_domain(), &mail_types(), &mail_value()).unwrap();
        assert_eq!(encoded.len(), 66);
        assert_eq!(encoded[..2], TYPED_DATA_PREFIX);

        assert_eq!(
            hex::encode(hash_typed_data(&mail_domain(), &mail_types(), &mail_value()).unwrap()),
            "be609aee343fb3c4b28e1df9e632fca64fcfaede20f02e86244efddf30957bd2"
        );
    }

    #[test]
    fn test_partial_domain_order_independent() {
        let name_first = TypedDataDomain::default().with_name("X").with_chain_id(1);
        let chain_first = TypedDataDomain::default().with_chain_id(1).with_name("X");
        let from_json: TypedDataDomain =
            serde_json::from_value(json!({"chainId": "1", "name": "X"})).unwrap();

        let expected = "0d98beb382308955b6e8410f596228527c4b44a9a7b8dd20ee862af465c2d6cd";
        assert_eq!(hex::encode(hash_domain(&name_first).unwrap()), expected);
        assert_eq!(hex::encode(hash_domain(&chain_first).unwrap()), expected);
        assert_eq!(hex::encode(hash_domain(&from_json).unwrap()), expected);
    }

    #[test]
    fn test_domain_validation() {
        let cases = [
            TypedDataDomain::default().with_name(""),
            TypedDataDomain::default().with_chain_id(-1),
            TypedDataDomain::default().with_chain_id("abc"),
            TypedDataDomain::default().with_verifying_contract("not an address"),
            TypedDataDomain::default().with_salt("0x1234"),
        ];
        for domain in cases {
            assert!(
                matches!(hash_domain(&domain), Err(TypedDataError::InvalidDomain(_))),
                "{domain:?}"
            );
        }

        let salted = TypedDataDomain::default().with_salt(format!("0x{}", "ab".repeat(32)));
        assert!(hash_domain(&salted).is_ok());
    }

    #[test]
    fn test_domain_entry_in_types_is_ignored() {
        let mut types = mail_types();
        types.insert(
            DOMAIN_TYPE_NAME.into(),
            vec![field("name", "string"), field("chainId", "uint256")],
        );

        assert_eq!(
            hash_typed_data(&mail_domain(), &types, &mail_value()).unwrap(),
            hash_typed_data(&mail_domain(), &mail_types(), &mail_value()).unwrap()
        );
    }

    #[test]
    fn test_payload_shape() {
        let mut types = mail_types();
        types
            .get_mut("Mail")
            .unwrap()
            .extend([field("nonce", "uint64"), field("tag", "bytes2")]);
        let mut value = mail_value();
        value["nonce"] = json!(7);
        value["tag"] = json!("0xABCD");

        let payload = get_payload(&mail_domain(), &types, &value).unwrap();

        assert_eq!(payload["primaryType"], "Mail");
        assert_eq!(payload["domain"]["chainId"], "1");
        assert_eq!(
            payload["domain"]["verifyingContract"],
            "41cccccccccccccccccccccccccccccccccccccccc"
        );
        assert_eq!(payload["types"][DOMAIN_TYPE_NAME].as_array().unwrap().len(), 4);
        assert_eq!(payload["message"]["nonce"], "7");
        assert_eq!(payload["message"]["tag"], "0xabcd");
        assert_eq!(
            payload["message"]["from"]["wallet"],
            "41cd2a3d9f938e13cd947ec05abc7fe734df8dd826"
        );
    }

    #[test]
    fn test_payload_rejects_bad_message() {
        let mut value = mail_value();
        value["from"]["wallet"] = json!("nope");

        assert!(get_payload(&mail_domain(), &mail_types(), &value).is_err());
    }
}
