//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of this subsystem.

use crate::domain::entities::{BatchVerificationResult, EcdsaSignature, VerificationRequest};
use crate::domain::errors::SigningError;
use shared_crypto::Hash;
use tk_02_address_codec::Address;

/// Primary Signing API.
///
/// Private keys are passed as big-endian scalars of at most 32 bytes.
/// Implementations must be thread-safe (`Send + Sync`).
pub trait SigningApi: Send + Sync {
    // =========================================================================
    // Keys
    // =========================================================================

    /// Draw a fresh 32-byte private key.
    fn generate_private_key(&self) -> [u8; 32];

    /// Uncompressed public key `04 || x || y`.
    fn derive_public_key(&self, private_key: &[u8]) -> Result<[u8; 65], SigningError>;

    /// Address controlled by a private key.
    fn derive_address(&self, private_key: &[u8]) -> Result<Address, SigningError>;

    // =========================================================================
    // Digests
    // =========================================================================

    /// Deterministically sign a 32-byte digest.
    fn sign_digest(
        &self,
        message_hash: &Hash,
        private_key: &[u8],
    ) -> Result<EcdsaSignature, SigningError>;

    /// SHA-256 raw bytes and sign the result.
    fn sign_bytes(&self, bytes: &[u8], private_key: &[u8])
        -> Result<EcdsaSignature, SigningError>;

    /// Recover the signer of a digest.
    fn recover_address(
        &self,
        message_hash: &Hash,
        signature: &EcdsaSignature,
    ) -> Result<Address, SigningError>;

    /// Check a digest signature against an address in any form.
    fn verify_digest(&self, message_hash: &Hash, signature: &EcdsaSignature, expected: &str)
        -> bool;

    /// Verify many digest signatures in parallel.
    fn verify_batch(&self, requests: &[VerificationRequest]) -> BatchVerificationResult;

    // =========================================================================
    // Messages (configured convention)
    // =========================================================================

    /// Digest of a message under the configured convention.
    fn hash_message(&self, message: &[u8]) -> Hash;

    /// Sign a message under the configured convention.
    fn sign_message(
        &self,
        message: &[u8],
        private_key: &[u8],
    ) -> Result<EcdsaSignature, SigningError>;

    /// Check a message signature under the configured convention.
    fn verify_message(&self, message: &[u8], signature: &EcdsaSignature, expected: &str) -> bool;

    /// Recover a message signer under the configured convention.
    fn recover_message_signer(
        &self,
        message: &[u8],
        signature: &EcdsaSignature,
    ) -> Result<Address, SigningError>;
}
