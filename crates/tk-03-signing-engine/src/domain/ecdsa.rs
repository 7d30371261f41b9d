//! # ECDSA Signing and Recovery (secp256k1)
//!
//! Pure domain logic for digest signing, public-key recovery and signer
//! checks.
//!
//! ## Security Notes
//!
//! - **Deterministic Nonces**: RFC 6979, so a digest and key always yield the same signature
//! - **Scalar Range Validation**: R and S must be in [1, n-1]
//! - **High-S Input**: accepted and folded to low-S with the recovery id flipped
//! - **Constant-Time Operations**: Uses `subtle` crate for side-channel resistance

use super::entities::{
    BatchVerificationResult, EcdsaSignature, VerificationRequest, VerificationResult,
};
use super::errors::SigningError;
use super::keys::{compute_address, keypair_from_slice};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use rayon::prelude::*;
use shared_crypto::{sha256, Hash, Secp256k1PublicKey};
use subtle::{Choice, ConstantTimeEq};
use tk_02_address_codec::Address;

/// secp256k1 curve order n
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Half of the secp256k1 curve order, rounded down.
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

// =============================================================================
// SIGNING
// =============================================================================

/// Sign a 32-byte digest with a private scalar (≤ 32 bytes, left-padded).
pub fn sign(message_hash: &Hash, private_key: &[u8]) -> Result<EcdsaSignature, SigningError> {
    let keypair = keypair_from_slice(private_key)?;
    Ok(keypair.sign_prehash(message_hash)?.into())
}

/// SHA-256 the bytes, then sign the digest. This is how raw transaction
/// bytes are signed: the digest doubles as the transaction id.
pub fn sign_bytes(bytes: &[u8], private_key: &[u8]) -> Result<EcdsaSignature, SigningError> {
    sign(&sha256(bytes), private_key)
}

// =============================================================================
// RECOVERY AND VERIFICATION
// =============================================================================

/// Recover the signer address from a signature over a digest.
pub fn recover_address(
    message_hash: &Hash,
    signature: &EcdsaSignature,
) -> Result<Address, SigningError> {
    let mut recovery_id = parse_recovery_id(signature.v)?;

    if !is_valid_scalar(&signature.r) || !is_valid_scalar(&signature.s) {
        return Err(SigningError::InvalidFormat);
    }

    // Fold high-S into the lower half; the mirrored R point flips the parity.
    let s = if is_high_s(&signature.s) {
        recovery_id ^= 1;
        invert_s(&signature.s)
    } else {
        signature.s
    };

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&signature.r);
    sig_bytes[32..].copy_from_slice(&s);
    let sig = Signature::from_slice(&sig_bytes).map_err(|_| SigningError::InvalidFormat)?;
    let recovery_id = RecoveryId::try_from(recovery_id)
        .map_err(|_| SigningError::InvalidRecoveryId(signature.v))?;

    let recovered_key = VerifyingKey::recover_from_prehash(message_hash, &sig, recovery_id)
        .map_err(|_| SigningError::RecoveryFailed)?;

    let public = Secp256k1PublicKey::from_verifying_key(&recovered_key);
    Ok(compute_address(public.as_bytes()))
}

/// Recover the signer and compare it, case-insensitively in canonical hex,
/// with `expected` given in any address form.
pub fn verify(message_hash: &Hash, signature: &EcdsaSignature, expected: &str) -> bool {
    let Ok(expected_hex) = tk_02_address_codec::to_hex(expected) else {
        return false;
    };
    match recover_address(message_hash, signature) {
        Ok(recovered) => recovered.to_hex21().eq_ignore_ascii_case(&expected_hex),
        Err(_) => false,
    }
}

/// Recover the signer and fail with `SignatureMismatch` unless it is `expected`.
pub fn ensure_signer(
    message_hash: &Hash,
    signature: &EcdsaSignature,
    expected: &Address,
) -> Result<Address, SigningError> {
    let recovered = recover_address(message_hash, signature)?;
    if recovered != *expected {
        return Err(SigningError::SignatureMismatch {
            expected: *expected,
            actual: recovered,
        });
    }
    Ok(recovered)
}

/// Recover the signer, checking it against `expected` when given.
pub fn verify_signature(
    message_hash: &Hash,
    signature: &EcdsaSignature,
    expected: Option<Address>,
) -> VerificationResult {
    let recovered = match expected {
        Some(expected) => ensure_signer(message_hash, signature, &expected),
        None => recover_address(message_hash, signature),
    };
    match recovered {
        Ok(address) => VerificationResult::valid(address),
        Err(e) => VerificationResult::invalid(e),
    }
}

/// Verify many signatures in parallel. Results keep request order.
pub fn verify_batch(requests: &[VerificationRequest]) -> BatchVerificationResult {
    let results: Vec<VerificationResult> = requests
        .par_iter()
        .map(|req| verify_signature(&req.message_hash, &req.signature, req.expected_signer))
        .collect();

    BatchVerificationResult::from_results(results)
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Constant-time `s > n/2`.
fn is_high_s(s: &[u8; 32]) -> bool {
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let s_byte = s[i];
        let h_byte = SECP256K1_HALF_ORDER[i];

        let not_decided = !(less | greater);
        let byte_less = Choice::from((s_byte < h_byte) as u8);
        let byte_greater = Choice::from((s_byte > h_byte) as u8);

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    greater.into()
}

/// Check that a scalar is in [1, n-1], in constant time.
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let mut is_zero = Choice::from(1u8);
    for &byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }

    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let s_byte = scalar[i];
        let n_byte = SECP256K1_ORDER[i];

        let not_decided = !(less | greater);
        let byte_less = Choice::from((s_byte < n_byte) as u8);
        let byte_greater = Choice::from((s_byte > n_byte) as u8);

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    (!is_zero & less).into()
}

/// Fold v to a 0/1 recovery id. Valid v values: 0, 1, 27, 28
fn parse_recovery_id(v: u8) -> Result<u8, SigningError> {
    match v {
        0 | 27 => Ok(0),
        1 | 28 => Ok(1),
        _ => Err(SigningError::InvalidRecoveryId(v)),
    }
}

/// s' = n - s
pub fn invert_s(s: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;

    for i in (0..32).rev() {
        let diff = (SECP256K1_ORDER[i] as i32) - (s[i] as i32) - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }

    result
}
