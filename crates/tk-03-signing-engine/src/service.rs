//! # Signing Service
//!
//! Application service layer that implements the `SigningApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`SigningApi`)
//! - Applies `SigningConfig` to message operations
//! - Delegates cryptographic operations to domain layer

use crate::domain::config::SigningConfig;
use crate::domain::entities::{BatchVerificationResult, EcdsaSignature, VerificationRequest};
use crate::domain::errors::SigningError;
use crate::domain::{ecdsa, keys, message};
use crate::ports::inbound::SigningApi;
use shared_crypto::Hash;
use tk_01_byte_codec::bytes_to_hex;
use tk_02_address_codec::Address;
use tracing::{debug, warn};

/// Signing Service.
#[derive(Clone, Debug, Default)]
pub struct SigningService {
    config: SigningConfig,
}

impl SigningService {
    /// Create a new signing service.
    pub fn new(config: SigningConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SigningConfig {
        &self.config
    }
}

impl SigningApi for SigningService {
    fn generate_private_key(&self) -> [u8; 32] {
        keys::gen_private_key()
    }

    fn derive_public_key(&self, private_key: &[u8]) -> Result<[u8; 65], SigningError> {
        keys::derive_public_key(private_key)
    }

    fn derive_address(&self, private_key: &[u8]) -> Result<Address, SigningError> {
        keys::derive_address(private_key)
    }

    fn sign_digest(
        &self,
        message_hash: &Hash,
        private_key: &[u8],
    ) -> Result<EcdsaSignature, SigningError> {
        let signature = ecdsa::sign(message_hash, private_key)?;
        debug!(digest = %bytes_to_hex(message_hash), "Signed digest");
        Ok(signature)
    }

    fn sign_bytes(
        &self,
        bytes: &[u8],
        private_key: &[u8],
    ) -> Result<EcdsaSignature, SigningError> {
        let signature = ecdsa::sign_bytes(bytes, private_key)?;
        debug!(len = bytes.len(), "Signed raw bytes");
        Ok(signature)
    }

    fn recover_address(
        &self,
        message_hash: &Hash,
        signature: &EcdsaSignature,
    ) -> Result<Address, SigningError> {
        ecdsa::recover_address(message_hash, signature)
    }

    fn verify_digest(
        &self,
        message_hash: &Hash,
        signature: &EcdsaSignature,
        expected: &str,
    ) -> bool {
        let valid = ecdsa::verify(message_hash, signature, expected);
        if !valid {
            warn!(
                digest = %bytes_to_hex(message_hash),
                expected,
                "Signature does not match expected signer"
            );
        }
        valid
    }

    fn verify_batch(&self, requests: &[VerificationRequest]) -> BatchVerificationResult {
        let result = ecdsa::verify_batch(requests);
        debug!(
            total = requests.len(),
            valid = result.valid_count,
            invalid = result.invalid_count,
            "Batch verification complete"
        );
        result
    }

    fn hash_message(&self, message: &[u8]) -> Hash {
        message::hash_message_with(message, self.config.convention, self.config.legacy_header)
    }

    fn sign_message(
        &self,
        message: &[u8],
        private_key: &[u8],
    ) -> Result<EcdsaSignature, SigningError> {
        debug!(
            convention = ?self.config.convention,
            header = ?self.config.legacy_header,
            "Signing message"
        );
        self.sign_digest(&self.hash_message(message), private_key)
    }

    fn verify_message(&self, message: &[u8], signature: &EcdsaSignature, expected: &str) -> bool {
        self.verify_digest(&self.hash_message(message), signature, expected)
    }

    fn recover_message_signer(
        &self,
        message: &[u8],
        signature: &EcdsaSignature,
    ) -> Result<Address, SigningError> {
        self.recover_address(&self.hash_message(message), signature)
    }
}
