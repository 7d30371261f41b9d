//! # Address Errors
//!
//! Every variant is an invalid-address condition; the variant names the
//! check that failed.

use thiserror::Error;

/// Address decoding errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddressError {
    /// Input contains characters outside the base58 alphabet
    #[error("Invalid address: {0:?} is not base58")]
    InvalidBase58(String),

    /// Decoded payload is too short to carry a checksum
    #[error("Invalid address: decoded length {len} leaves no payload after the checksum")]
    TooShort { len: usize },

    /// Trailing checksum does not match the payload
    #[error("Invalid address: checksum mismatch for {0:?}")]
    ChecksumMismatch(String),

    /// Payload is not 21 bytes
    #[error("Invalid address: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Leading byte is not the network version byte
    #[error("Invalid address: version byte 0x{0:02x} does not match the network")]
    InvalidPrefix(u8),

    /// Hex form could not be decoded
    #[error("Invalid address: malformed hex {0:?}")]
    InvalidHex(String),
}
