//! # Signing Errors

use shared_crypto::CryptoError;
use thiserror::Error;
use tk_01_byte_codec::CodecError;
use tk_02_address_codec::{Address, AddressError};

/// Errors that can occur while signing, recovering or verifying.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SigningError {
    /// The signature format is invalid (wrong length, zero or out-of-range scalar)
    #[error("Invalid signature format")]
    InvalidFormat,

    /// Invalid recovery ID (v must be 0, 1, 27, or 28)
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Failed to recover public key from signature
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Recovered signer does not match expected signer
    #[error("Signature mismatch: expected {expected}, recovered {actual}")]
    SignatureMismatch { expected: Address, actual: Address },

    /// Key or signature material failed hex decoding
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Key material rejected by the curve arithmetic
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Expected signer address could not be parsed
    #[error(transparent)]
    Address(#[from] AddressError),
}
