//! # Property Tests
//!
//! Invariants that must hold for every input, not only pinned vectors.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;
    use tk_02_address_codec::{from_base58check, to_base58check, Address};
    use tk_03_signing_engine::{derive_address, keypair_from_slice, recover_address, sign};
    use tk_04_abi_coder::{decode_params, encode_params, EthabiWordCoder};
    use tk_05_typed_data::{TypedDataEncoder, TypedDataError, TypedDataField, TypedDataTypes};

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn address_forms_round_trip(hash in any::<[u8; 20]>()) {
            let address = Address::from_hash20(hash);

            prop_assert_eq!(Address::parse(&address.to_base58()).unwrap(), address);
            prop_assert_eq!(Address::parse(&address.to_hex21()).unwrap(), address);
            prop_assert_eq!(Address::parse(&address.to_abi_hex20()).unwrap(), address);
            prop_assert_eq!(
                from_base58check(&to_base58check(address.as_bytes())).unwrap(),
                address.as_bytes().to_vec()
            );
        }

        #[test]
        fn signatures_recover_their_signer(
            secret in any::<[u8; 32]>(),
            digest in any::<[u8; 32]>(),
        ) {
            prop_assume!(keypair_from_slice(&secret).is_ok());

            let signature = sign(&digest, &secret).unwrap();
            prop_assert_eq!(
                recover_address(&digest, &signature).unwrap(),
                derive_address(&secret).unwrap()
            );
        }

        #[test]
        fn primitive_params_round_trip(
            amount in any::<u64>(),
            flag in any::<bool>(),
            memo in "[ -~]{0,80}",
            hash in any::<[u8; 20]>(),
        ) {
            let address = Address::from_hash20(hash);
            let types = ["uint64", "bool", "string", "address"];
            let coder = EthabiWordCoder;

            let encoded = encode_params(
                &types,
                &[json!(amount), json!(flag), json!(memo), json!(address.to_base58())],
                &coder,
            )
            .unwrap();
            let decoded = decode_params(&[], &types, &encoded, false, &coder).unwrap();

            prop_assert_eq!(
                decoded,
                json!([amount, flag, memo, address.to_hex21()])
            );
        }

        #[test]
        fn typed_data_uint8_bounds(value in 0u32..1024) {
            let mut types = TypedDataTypes::new();
            types.insert("T".into(), vec![TypedDataField::new("v", "uint8")]);
            let encoder = TypedDataEncoder::new(types).unwrap();

            let result = encoder.hash(&json!({"v": value}));
            if value < 256 {
                prop_assert!(result.is_ok());
            } else {
                let out_of_bounds = matches!(result, Err(TypedDataError::OutOfBounds { .. }));
                prop_assert!(out_of_bounds);
            }
        }
    }
}
