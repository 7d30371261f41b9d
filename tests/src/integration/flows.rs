//! # Integration Test Flows
//!
//! 1. **Keys → Address → ABI**: a derived address travels through call data
//!    and comes back in the `41` hex form
//! 2. **Typed data → Signing**: the typed-data digest is signed and the
//!    signer recovered
//! 3. **Wallet payload**: the JSON payload re-hashes to the same digest
//! 4. **Batch verification**: mixed valid and forged signatures

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use tk_02_address_codec::Address;
    use tk_03_signing_engine::{
        derive_address, recover_address, recover_message_signer, sign, LegacyHeader,
        MessageConvention, SigningApi, VerificationRequest,
    };
    use tk_04_abi_coder::{AbiCoderApi, AbiConfig, AbiFunction, AbiParam};
    use tk_05_typed_data::{
        get_payload, hash_typed_data, TypedDataDomain, TypedDataField, TypedDataTypes,
        DOMAIN_TYPE_NAME,
    };
    use tronkit::{Toolkit, ToolkitConfig};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const PRIVATE_KEY: &str = "da146374a75310b9666e834ee4ad0866d6f4035967bfc76217c5a495fff9f0d0";
    const BASE58: &str = "TPL66VK2gCXNCD7EJg9pgJRfqcRazjhUZY";
    const HEX21: &str = "41928c9af0651632157ef27a2cf17ca72c575a4d21";

    fn key() -> Vec<u8> {
        hex::decode(PRIVATE_KEY).unwrap()
    }

    fn order_types() -> TypedDataTypes {
        let mut types = TypedDataTypes::new();
        types.insert(
            "Order".into(),
            vec![
                TypedDataField::new("maker", "address"),
                TypedDataField::new("amounts", "uint256[]"),
                TypedDataField::new("fees", "Fee[2]"),
                TypedDataField::new("salt", "bytes32"),
            ],
        );
        types.insert(
            "Fee".into(),
            vec![
                TypedDataField::new("recipient", "address"),
                TypedDataField::new("bps", "uint16"),
            ],
        );
        types
    }

    fn order_domain() -> TypedDataDomain {
        TypedDataDomain::default()
            .with_name("Exchange")
            .with_version("2")
            .with_chain_id("0x2b6653dc")
            .with_verifying_contract(BASE58)
    }

    fn order_value() -> Value {
        json!({
            "maker": BASE58,
            "amounts": [1, "1000000000000000000000", "0xff"],
            "fees": [
                {"recipient": HEX21, "bps": 30},
                {"recipient": "0x928c9af0651632157ef27a2cf17ca72c575a4d21", "bps": 5}
            ],
            "salt": format!("0x{}", "11".repeat(32)),
        })
    }

    // =============================================================================
    // KEYS → ADDRESS → ABI
    // =============================================================================

    #[test]
    fn test_derived_address_through_call_data() {
        let toolkit = Toolkit::default();
        let address = toolkit.signing().derive_address(&key()).unwrap();
        assert_eq!(address.to_base58(), BASE58);

        let transfer = AbiFunction::new("transfer").with_inputs(vec![
            AbiParam::new("to", "address"),
            AbiParam::new("value", "uint256"),
        ]);
        let call = toolkit
            .abi()
            .encode_call(&transfer, &[json!(address.to_base58()), json!(1_000_000)])
            .unwrap();
        assert_eq!(&call[..4], &[0xa9, 0x05, 0x9c, 0xbb]);

        // Read the arguments back as outputs, selector included.
        let reader = Toolkit::new(
            ToolkitConfig::default().with_abi(AbiConfig::default().with_ignore_method_hash(true)),
        )
        .unwrap();
        let mirror = AbiFunction::new("transfer").with_outputs(transfer.inputs.clone());
        let decoded = reader.abi().decode_params_v2_by_abi(&mirror, &call).unwrap();

        assert_eq!(decoded.to_json(), json!({"to": HEX21, "value": 1_000_000}));
    }

    #[test]
    fn test_zero_address_forms() {
        let zero = Address::from_hash20([0u8; 20]);
        assert_eq!(zero.to_base58(), "T9yD14Nj9j7xAB4dbGeiX9h8unkKHxuWwb");
        assert_eq!(zero.to_hex21(), format!("41{}", "0".repeat(40)));
        assert_eq!(Address::parse(&zero.to_abi_hex20()).unwrap(), zero);
    }

    // =============================================================================
    // TYPED DATA → SIGNING
    // =============================================================================

    #[test]
    fn test_typed_data_signer_recovered() {
        let digest = hash_typed_data(&order_domain(), &order_types(), &order_value()).unwrap();
        let signature = sign(&digest, &key()).unwrap();

        assert_eq!(
            recover_address(&digest, &signature).unwrap(),
            derive_address(&key()).unwrap()
        );

        let toolkit = Toolkit::default();
        let rendered = toolkit
            .sign_typed_data(&order_domain(), &order_types(), &order_value(), &key())
            .unwrap();
        assert_eq!(rendered, signature.to_message_hex());
        assert!(toolkit
            .verify_typed_data(&order_domain(), &order_types(), &order_value(), &rendered, HEX21)
            .unwrap());
    }

    #[test]
    fn test_payload_rehashes_to_same_digest() {
        let payload = get_payload(&order_domain(), &order_types(), &order_value()).unwrap();
        assert_eq!(payload["primaryType"], "Order");
        assert_eq!(payload["domain"]["chainId"], "728126428");

        let types: TypedDataTypes = serde_json::from_value(payload["types"].clone()).unwrap();
        assert!(types.contains_key(DOMAIN_TYPE_NAME));
        let domain: TypedDataDomain = serde_json::from_value(payload["domain"].clone()).unwrap();

        assert_eq!(
            hash_typed_data(&domain, &types, &payload["message"]).unwrap(),
            hash_typed_data(&order_domain(), &order_types(), &order_value()).unwrap()
        );
    }

    #[test]
    fn test_domain_changes_digest() {
        let base = hash_typed_data(&order_domain(), &order_types(), &order_value()).unwrap();
        let other_chain = order_domain().with_chain_id(1);

        assert_ne!(
            hash_typed_data(&other_chain, &order_types(), &order_value()).unwrap(),
            base
        );
    }

    // =============================================================================
    // MESSAGES AND BATCHES
    // =============================================================================

    #[test]
    fn test_message_signers_recovered_under_each_convention() {
        let signer = derive_address(&key()).unwrap();
        for convention in [MessageConvention::FixedHeader, MessageConvention::LengthPrefixed] {
            for header in [LegacyHeader::Tron, LegacyHeader::Ethereum] {
                let signature = tk_03_signing_engine::sign_message(
                    b"integration",
                    &key(),
                    convention,
                    header,
                )
                .unwrap();
                assert_eq!(
                    recover_message_signer(b"integration", &signature, convention, header)
                        .unwrap(),
                    signer
                );
            }
        }
    }

    #[test]
    fn test_batch_verification_flags_forgeries() {
        let toolkit = Toolkit::default();
        let signer = toolkit.signing().derive_address(&key()).unwrap();
        let other_key = toolkit.signing().generate_private_key();

        let requests: Vec<VerificationRequest> = (0u8..8)
            .map(|i| {
                let digest = [i; 32];
                let signing_key = if i % 3 == 0 { other_key.to_vec() } else { key() };
                VerificationRequest {
                    message_hash: digest,
                    signature: sign(&digest, &signing_key).unwrap(),
                    expected_signer: Some(signer),
                }
            })
            .collect();

        let result = toolkit.signing().verify_batch(&requests);
        assert_eq!(result.invalid_count, 3);
        assert_eq!(result.valid_count, 5);
        assert!(!result.all_valid);
        for (i, outcome) in result.results.iter().enumerate() {
            assert_eq!(outcome.valid, i % 3 != 0, "request {i}");
        }
    }
}
