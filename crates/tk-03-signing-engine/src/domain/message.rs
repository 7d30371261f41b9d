//! # Message Hashing Conventions
//!
//! Two incompatible ways to turn an off-chain message into a signing digest.
//! They deliberately produce different hashes for identical input, so the
//! caller always names the convention.
//!
//! - **Fixed header** (legacy): `keccak256(header || message)`, where the
//!   header already ends in the literal `32`.
//! - **Length prefixed**: `keccak256(prefix || decimal(len) || message)`.
//!
//! The TRON legacy header starts with `0x19` even though the bytes that
//! follow spell a 24-character string. Verifiers in the wild depend on the
//! exact bytes, so they are kept as-is.

use super::ecdsa::{recover_address, sign, verify};
use super::entities::EcdsaSignature;
use super::errors::SigningError;
use serde::{Deserialize, Serialize};
use shared_crypto::{Hash, Keccak256Hasher};
use tk_01_byte_codec::hex_to_bytes;
use tk_02_address_codec::Address;

/// Legacy TRON personal-sign header.
pub const TRON_MESSAGE_HEADER: &str = "\x19TRON Signed Message:\n32";

/// Legacy header shared with Ethereum wallets.
pub const ETH_MESSAGE_HEADER: &str = "\x19Ethereum Signed Message:\n32";

/// Prefix of the length-prefixed convention.
pub const TRON_MESSAGE_PREFIX: &str = "\x19TRON Signed Message:\n";

/// Header used by the fixed-header convention.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegacyHeader {
    #[default]
    Tron,
    Ethereum,
}

impl LegacyHeader {
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            LegacyHeader::Tron => TRON_MESSAGE_HEADER.as_bytes(),
            LegacyHeader::Ethereum => ETH_MESSAGE_HEADER.as_bytes(),
        }
    }
}

/// Which message-hashing convention to apply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageConvention {
    /// Legacy fixed header
    FixedHeader,
    /// Prefix, decimal length, message
    #[default]
    LengthPrefixed,
}

/// Legacy digest: `keccak256(header || message)`.
pub fn hash_message_fixed_header(message: &[u8], header: LegacyHeader) -> Hash {
    let mut hasher = Keccak256Hasher::new();
    hasher.update(header.as_bytes()).update(message);
    hasher.finalize()
}

/// Legacy digest of a hex-encoded message (optional `0x`).
pub fn hash_legacy_hex(message_hex: &str, header: LegacyHeader) -> Result<Hash, SigningError> {
    Ok(hash_message_fixed_header(&hex_to_bytes(message_hex)?, header))
}

/// Length-prefixed digest: `keccak256(prefix || decimal(len) || message)`.
pub fn hash_message(message: &[u8]) -> Hash {
    let length = message.len().to_string();
    let mut hasher = Keccak256Hasher::new();
    hasher
        .update(TRON_MESSAGE_PREFIX.as_bytes())
        .update(length.as_bytes())
        .update(message);
    hasher.finalize()
}

/// Digest under an explicit convention. `header` only applies to
/// [`MessageConvention::FixedHeader`].
pub fn hash_message_with(
    message: &[u8],
    convention: MessageConvention,
    header: LegacyHeader,
) -> Hash {
    match convention {
        MessageConvention::FixedHeader => hash_message_fixed_header(message, header),
        MessageConvention::LengthPrefixed => hash_message(message),
    }
}

/// Sign a message. Render with [`EcdsaSignature::to_message_hex`].
pub fn sign_message(
    message: &[u8],
    private_key: &[u8],
    convention: MessageConvention,
    header: LegacyHeader,
) -> Result<EcdsaSignature, SigningError> {
    sign(&hash_message_with(message, convention, header), private_key)
}

/// Check a message signature against an address in any form.
pub fn verify_message(
    message: &[u8],
    signature: &EcdsaSignature,
    expected: &str,
    convention: MessageConvention,
    header: LegacyHeader,
) -> bool {
    verify(
        &hash_message_with(message, convention, header),
        signature,
        expected,
    )
}

/// Recover the address that signed a message.
pub fn recover_message_signer(
    message: &[u8],
    signature: &EcdsaSignature,
    convention: MessageConvention,
    header: LegacyHeader,
) -> Result<Address, SigningError> {
    recover_address(&hash_message_with(message, convention, header), signature)
}
