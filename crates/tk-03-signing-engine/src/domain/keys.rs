//! # Key Derivation
//!
//! Private scalar → uncompressed public point → account address.

use super::errors::SigningError;
use shared_crypto::{keccak256, Secp256k1KeyPair};
use tk_01_byte_codec::{bytes_to_hex, hex_to_bytes, strip_0x};
use tk_02_address_codec::Address;

/// Draw a fresh private scalar, always 32 bytes wide.
pub fn gen_private_key() -> [u8; 32] {
    Secp256k1KeyPair::generate().to_bytes()
}

/// Fresh private key as 64 lowercase hex chars.
pub fn gen_private_key_hex() -> String {
    bytes_to_hex(&gen_private_key())
}

/// Import a big-endian scalar of at most 32 bytes, left-padding short input.
pub fn keypair_from_slice(private_key: &[u8]) -> Result<Secp256k1KeyPair, SigningError> {
    Ok(Secp256k1KeyPair::from_slice(private_key)?)
}

/// Import a hex scalar (optional `0x`). Odd-length and short input is
/// left-padded with zeros to 64 chars before decoding.
pub fn keypair_from_hex(private_key: &str) -> Result<Secp256k1KeyPair, SigningError> {
    let body = strip_0x(private_key.trim());
    let padded = format!("{body:0>64}");
    keypair_from_slice(&hex_to_bytes(&padded)?)
}

/// Uncompressed public key `04 || x || y`.
pub fn derive_public_key(private_key: &[u8]) -> Result<[u8; 65], SigningError> {
    Ok(*keypair_from_slice(private_key)?.public_key().as_bytes())
}

/// Address of a public key. A leading `04` tag on a 65-byte key is dropped
/// before hashing.
pub fn compute_address(public_key: &[u8]) -> Address {
    let coordinates = if public_key.len() == 65 {
        &public_key[1..]
    } else {
        public_key
    };
    let hash = keccak256(coordinates);
    let mut hash20 = [0u8; 20];
    hash20.copy_from_slice(&hash[12..]);
    Address::from_hash20(hash20)
}

/// Address controlled by a private key.
pub fn derive_address(private_key: &[u8]) -> Result<Address, SigningError> {
    Ok(compute_address(&derive_public_key(private_key)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_crypto::CryptoError;

    const KEY: &str = "da146374a75310b9666e834ee4ad0866d6f4035967bfc76217c5a495fff9f0d0";

    #[test]
    fn test_known_address() {
        let key = hex::decode(KEY).unwrap();
        let address = derive_address(&key).unwrap();

        assert_eq!(address.to_base58(), "TPL66VK2gCXNCD7EJg9pgJRfqcRazjhUZY");
        assert_eq!(
            address.to_hex21(),
            "41928c9af0651632157ef27a2cf17ca72c575a4d21"
        );
    }

    #[test]
    fn test_scalar_one_address() {
        let address = derive_address(&[1u8]).unwrap();
        assert_eq!(address.to_base58(), "TMVQGm1qAQYVdetCeGRRkTWYYrLXuHK2HC");
    }

    #[test]
    fn test_hex_import_pads_short_scalars() {
        let short = keypair_from_hex("0x1").unwrap();
        let full = keypair_from_hex(&format!("{}1", "0".repeat(63))).unwrap();

        assert_eq!(short.to_bytes(), full.to_bytes());
        assert_eq!(short.to_bytes()[31], 1);
    }

    #[test]
    fn test_compute_address_accepts_untagged_key() {
        let key = hex::decode(KEY).unwrap();
        let public = derive_public_key(&key).unwrap();

        assert_eq!(public[0], 0x04);
        assert_eq!(compute_address(&public), compute_address(&public[1..]));
    }

    #[test]
    fn test_generated_keys_are_full_width() {
        let key = gen_private_key_hex();
        assert_eq!(key.len(), 64);
        assert!(keypair_from_hex(&key).is_ok());
    }

    #[test]
    fn test_zero_key_rejected() {
        assert_eq!(
            derive_address(&[0u8; 32]),
            Err(SigningError::Crypto(CryptoError::InvalidPrivateKey))
        );
    }

    #[test]
    fn test_derivation_is_stable() {
        let key = hex::decode(KEY).unwrap();
        assert_eq!(derive_address(&key), derive_address(&key));
    }
}
