//! # Domain Entities
//!
//! Core data structures for signing and verification.

use super::errors::SigningError;
use serde::{Deserialize, Serialize};
use shared_crypto::{Hash, Secp256k1Signature};
use tk_01_byte_codec::{bytes_to_hex, hex_to_bytes};
use tk_02_address_codec::Address;

/// Length of a serialized signature: `r || s || v`.
pub const SIGNATURE_BYTES: usize = 65;

// =============================================================================
// ECDSA Signature (secp256k1)
// =============================================================================

/// ECDSA signature on the secp256k1 curve.
///
/// `r` and `s` are always carried at full 32-byte width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcdsaSignature {
    /// R component (32 bytes)
    pub r: [u8; 32],
    /// S component (32 bytes)
    pub s: [u8; 32],
    /// Recovery ID (0, 1, 27, or 28)
    pub v: u8,
}

impl EcdsaSignature {
    /// Parse 65 raw bytes `r || s || v`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SigningError> {
        if bytes.len() != SIGNATURE_BYTES {
            return Err(SigningError::InvalidFormat);
        }
        let v = bytes[64];
        if !matches!(v, 0 | 1 | 27 | 28) {
            return Err(SigningError::InvalidRecoveryId(v));
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Ok(Self { r, s, v })
    }

    /// Parse either textual form (optional `0x`, 130 hex chars).
    pub fn from_hex(input: &str) -> Result<Self, SigningError> {
        Self::from_bytes(&hex_to_bytes(input)?)
    }

    /// Recovery id folded to 0 or 1.
    pub fn recovery_id(&self) -> u8 {
        if self.v >= 27 {
            self.v - 27
        } else {
            self.v
        }
    }

    /// Raw bytes with the recovery id in 0/1 form.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_BYTES] {
        let mut bytes = [0u8; SIGNATURE_BYTES];
        bytes[..32].copy_from_slice(&self.r);
        bytes[32..64].copy_from_slice(&self.s);
        bytes[64] = self.recovery_id();
        bytes
    }

    /// Transaction form: `r || s || id` as bare hex, id `00` or `01`.
    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.to_bytes())
    }

    /// Message form: `0x || r || s || v`, v `1b` or `1c`.
    pub fn to_message_hex(&self) -> String {
        format!(
            "0x{}{}{:02x}",
            bytes_to_hex(&self.r),
            bytes_to_hex(&self.s),
            self.recovery_id() + 27
        )
    }
}

impl From<Secp256k1Signature> for EcdsaSignature {
    fn from(sig: Secp256k1Signature) -> Self {
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&sig.as_bytes()[..32]);
        s.copy_from_slice(&sig.as_bytes()[32..]);
        Self {
            r,
            s,
            v: sig.recovery_id(),
        }
    }
}

// =============================================================================
// Verification Request/Result Types
// =============================================================================

/// Request to verify an ECDSA signature.
#[derive(Clone, Debug)]
pub struct VerificationRequest {
    /// The hash of the message that was signed
    pub message_hash: Hash,
    /// The signature to verify
    pub signature: EcdsaSignature,
    /// Optional expected signer address (if provided, verification checks recovered address)
    pub expected_signer: Option<Address>,
}

/// Result of signature verification.
#[derive(Clone, Debug)]
pub struct VerificationResult {
    /// Whether the signature is valid
    pub valid: bool,
    /// The recovered address (if verification succeeded)
    pub recovered_address: Option<Address>,
    /// Error details (if verification failed)
    pub error: Option<SigningError>,
}

impl VerificationResult {
    /// Create a successful verification result.
    pub fn valid(recovered_address: Address) -> Self {
        Self {
            valid: true,
            recovered_address: Some(recovered_address),
            error: None,
        }
    }

    /// Create a failed verification result.
    pub fn invalid(error: SigningError) -> Self {
        Self {
            valid: false,
            recovered_address: None,
            error: Some(error),
        }
    }
}

/// Result of batch verification.
#[derive(Clone, Debug)]
pub struct BatchVerificationResult {
    /// Individual results for each request, in request order
    pub results: Vec<VerificationResult>,
    /// Whether all verifications passed
    pub all_valid: bool,
    /// Count of valid signatures
    pub valid_count: usize,
    /// Count of invalid signatures
    pub invalid_count: usize,
}

impl BatchVerificationResult {
    /// Create a batch result from individual results.
    pub fn from_results(results: Vec<VerificationResult>) -> Self {
        let valid_count = results.iter().filter(|r| r.valid).count();
        let invalid_count = results.len() - valid_count;
        let all_valid = invalid_count == 0;

        Self {
            results,
            all_valid,
            valid_count,
            invalid_count,
        }
    }
}
