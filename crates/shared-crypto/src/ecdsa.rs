//! # ECDSA Keys (secp256k1)
//!
//! Private keys, uncompressed public keys and recoverable digest signing.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Signatures are emitted in low-S form with the matching recovery id
//! - Secret scalars are zeroized on drop by k256's `SigningKey`

use crate::{CryptoError, Hash};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Uncompressed secp256k1 public key (65 bytes: `0x04 || x || y`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secp256k1PublicKey([u8; 65]);

impl Secp256k1PublicKey {
    /// Parse a SEC1 encoded point (compressed or uncompressed).
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let verifying_key =
            VerifyingKey::from_sec1_bytes(bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self::from_verifying_key(&verifying_key))
    }

    /// Build from a k256 verifying key.
    pub fn from_verifying_key(key: &VerifyingKey) -> Self {
        // Uncompressed SEC1 encoding is always 65 bytes; each coordinate is
        // emitted at full 32-byte width.
        let encoded = key.to_encoded_point(false);
        let mut bytes = [0u8; 65];
        bytes.copy_from_slice(encoded.as_bytes());
        Self(bytes)
    }

    /// Get raw uncompressed bytes.
    pub fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }

    /// The 64 coordinate bytes without the `0x04` tag.
    pub fn coordinates(&self) -> &[u8] {
        &self.0[1..]
    }
}

/// ECDSA signature (64 bytes, r||s format) with its recovery id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secp256k1Signature {
    bytes: [u8; 64],
    recovery_id: u8,
}

impl Secp256k1Signature {
    /// Create from `r || s` bytes and a recovery id (0 or 1).
    pub fn from_parts(bytes: [u8; 64], recovery_id: u8) -> Self {
        Self { bytes, recovery_id }
    }

    /// Get raw `r || s` bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.bytes
    }

    /// The recovery id (0 or 1).
    pub fn recovery_id(&self) -> u8 {
        self.recovery_id
    }
}

/// secp256k1 ECDSA keypair.
pub struct Secp256k1KeyPair {
    signing_key: SigningKey,
}

impl Secp256k1KeyPair {
    /// Generate random keypair from the OS-seeded thread RNG.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_bytes((&bytes).into()).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Create from a big-endian scalar of at most 32 bytes.
    ///
    /// Shorter inputs are left-padded with zeros before validation.
    pub fn from_slice(scalar: &[u8]) -> Result<Self, CryptoError> {
        if scalar.len() > 32 {
            return Err(CryptoError::InvalidKeyLength {
                expected: 32,
                actual: scalar.len(),
            });
        }
        let mut bytes = [0u8; 32];
        bytes[32 - scalar.len()..].copy_from_slice(scalar);
        let keypair = Self::from_bytes(bytes);
        bytes.zeroize();
        keypair
    }

    /// Get public key (uncompressed, 65 bytes).
    pub fn public_key(&self) -> Secp256k1PublicKey {
        Secp256k1PublicKey::from_verifying_key(self.signing_key.verifying_key())
    }

    /// Sign a 32-byte digest (deterministic RFC 6979, low-S).
    pub fn sign_prehash(&self, digest: &Hash) -> Result<Secp256k1Signature, CryptoError> {
        let (sig, recid): (Signature, _) = self
            .signing_key
            .sign_prehash_recoverable(digest)
            .map_err(|_| CryptoError::SigningFailed)?;
        let bytes: [u8; 64] = sig.to_bytes().into();
        Ok(Secp256k1Signature::from_parts(bytes, recid.to_byte()))
    }

    /// Get secret key bytes (always 32 bytes, zero-padded).
    pub fn to_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes().into()
    }
}

// The wrapped `SigningKey` wipes its scalar when dropped.
impl ZeroizeOnDrop for Secp256k1KeyPair {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keccak256;

    #[test]
    fn test_public_key_is_uncompressed() {
        let keypair = Secp256k1KeyPair::generate();
        let public = keypair.public_key();

        assert_eq!(public.as_bytes()[0], 0x04);
        assert_eq!(public.coordinates().len(), 64);
    }

    #[test]
    fn test_known_public_key() {
        let secret =
            hex::decode("da146374a75310b9666e834ee4ad0866d6f4035967bfc76217c5a495fff9f0d0")
                .unwrap();
        let keypair = Secp256k1KeyPair::from_slice(&secret).unwrap();

        assert_eq!(
            hex::encode(keypair.public_key().as_bytes()),
            "047fe68d5cb89b25c37c9240c22c6e732bbccfc7fe3e5ddfe378ae4373e3c58263\
             30a4cda815e94fd777e74594865e119e2d397a88bb4dd10bd24ca2b2864bceec"
        );
    }

    #[test]
    fn test_deterministic_signatures() {
        let keypair = Secp256k1KeyPair::from_bytes([0xABu8; 32]).unwrap();
        let digest = keccak256(b"deterministic test");

        let sig1 = keypair.sign_prehash(&digest).unwrap();
        let sig2 = keypair.sign_prehash(&digest).unwrap();

        assert_eq!(sig1, sig2);
        assert!(sig1.recovery_id() <= 1);
    }

    #[test]
    fn test_short_scalar_is_left_padded() {
        let keypair = Secp256k1KeyPair::from_slice(&[0x01]).unwrap();
        let mut expected = [0u8; 32];
        expected[31] = 1;

        assert_eq!(keypair.to_bytes(), expected);
    }

    #[test]
    fn test_zero_key_rejected() {
        assert_eq!(
            Secp256k1KeyPair::from_bytes([0u8; 32]).err(),
            Some(CryptoError::InvalidPrivateKey)
        );
    }

    #[test]
    fn test_oversized_scalar_rejected() {
        let result = Secp256k1KeyPair::from_slice(&[1u8; 33]);
        assert!(matches!(
            result,
            Err(CryptoError::InvalidKeyLength { actual: 33, .. })
        ));
    }

    #[test]
    fn test_secret_wiped_on_drop() {
        fn assert_zeroize_on_drop<T: ZeroizeOnDrop>() {}
        assert_zeroize_on_drop::<SigningKey>();
        assert_zeroize_on_drop::<Secp256k1KeyPair>();
    }

    #[test]
    fn test_roundtrip_bytes() {
        let original = Secp256k1KeyPair::generate();
        let bytes = original.to_bytes();
        let restored = Secp256k1KeyPair::from_bytes(bytes).unwrap();

        assert_eq!(original.public_key(), restored.public_key());
    }

    #[test]
    fn test_public_key_from_compressed() {
        let keypair = Secp256k1KeyPair::generate();
        let uncompressed = keypair.public_key();
        let compressed = keypair.signing_key.verifying_key().to_encoded_point(true);

        let parsed = Secp256k1PublicKey::from_sec1_bytes(compressed.as_bytes()).unwrap();
        assert_eq!(parsed, uncompressed);
    }
}
