//! # Base58check
//!
//! `base58(payload || sha256(sha256(payload))[..4])`.

use crate::{AddressError, ADDRESS_BYTES, ADDRESS_PREFIX_BYTE, BASE58_ADDRESS_LEN};
use shared_crypto::double_sha256;

const CHECKSUM_LEN: usize = 4;

/// Encode a payload with its 4-byte double-SHA-256 checksum.
pub fn to_base58check(payload: &[u8]) -> String {
    let checksum = double_sha256(payload);
    let mut data = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum[..CHECKSUM_LEN]);
    bs58::encode(data).into_string()
}

/// Decode a base58check string and verify its checksum, returning the payload.
pub fn from_base58check(input: &str) -> Result<Vec<u8>, AddressError> {
    let mut data = bs58::decode(input)
        .into_vec()
        .map_err(|_| AddressError::InvalidBase58(input.to_string()))?;

    if data.len() <= CHECKSUM_LEN {
        return Err(AddressError::TooShort { len: data.len() });
    }

    let checksum = data.split_off(data.len() - CHECKSUM_LEN);
    let expected = double_sha256(&data);
    if checksum[..] != expected[..CHECKSUM_LEN] {
        return Err(AddressError::ChecksumMismatch(input.to_string()));
    }

    Ok(data)
}

/// Soft check: right length, right version byte, valid checksum.
pub fn is_valid(input: &str) -> bool {
    if input.len() != BASE58_ADDRESS_LEN {
        return false;
    }
    match from_base58check(input) {
        Ok(payload) => payload.len() == ADDRESS_BYTES && payload[0] == ADDRESS_PREFIX_BYTE,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const KNOWN_BASE58: &str = "TPL66VK2gCXNCD7EJg9pgJRfqcRazjhUZY";
    const KNOWN_HEX: &str = "41928c9af0651632157ef27a2cf17ca72c575a4d21";

    #[test]
    fn test_known_vector() {
        let raw = tk_01_byte_codec::hex_to_bytes(KNOWN_HEX).unwrap();
        assert_eq!(to_base58check(&raw), KNOWN_BASE58);
        assert_eq!(from_base58check(KNOWN_BASE58).unwrap(), raw);
    }

    #[test]
    fn test_zero_address_vector() {
        let mut raw = [0u8; 21];
        raw[0] = ADDRESS_PREFIX_BYTE;
        assert_eq!(to_base58check(&raw), "T9yD14Nj9j7xAB4dbGeiX9h8unkKHxuWwb");
    }

    #[test]
    fn test_checksum_mismatch_rejected() {
        let tampered = "TPL66VK2gCXNCD7EJg9pgJRfqcRazjhUZZ";
        assert_eq!(
            from_base58check(tampered),
            Err(AddressError::ChecksumMismatch(tampered.to_string()))
        );
        assert!(!is_valid(tampered));
    }

    #[test]
    fn test_short_payload_rejected() {
        // "2" decodes to a single byte.
        assert_eq!(from_base58check("2"), Err(AddressError::TooShort { len: 1 }));
    }

    #[test]
    fn test_non_base58_rejected() {
        assert!(matches!(
            from_base58check("T0OIl"),
            Err(AddressError::InvalidBase58(_))
        ));
    }

    #[test]
    fn test_is_valid() {
        assert!(is_valid(KNOWN_BASE58));
        assert!(!is_valid(""));
        assert!(!is_valid(&KNOWN_BASE58[1..]));
    }

    #[test]
    fn test_is_valid_rejects_foreign_version_byte() {
        let mut raw = tk_01_byte_codec::hex_to_bytes(KNOWN_HEX).unwrap();
        raw[0] = 0x00;
        let foreign = to_base58check(&raw);

        assert!(from_base58check(&foreign).is_ok());
        assert!(!is_valid(&foreign));
    }

    proptest! {
        #[test]
        fn prop_base58check_roundtrip(hash in proptest::array::uniform20(any::<u8>())) {
            let mut raw = vec![ADDRESS_PREFIX_BYTE];
            raw.extend_from_slice(&hash);
            let encoded = to_base58check(&raw);

            prop_assert!(is_valid(&encoded));
            prop_assert_eq!(from_base58check(&encoded).unwrap(), raw);
        }
    }
}
