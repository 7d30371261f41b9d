//! # Address Value Type
//!
//! One tagged value carrying the raw 21 bytes; every textual shape is a
//! projection computed on demand.

use crate::base58check::{from_base58check, is_valid, to_base58check};
use crate::{AddressError, ADDRESS_BYTES, ADDRESS_PREFIX, ADDRESS_PREFIX_BYTE};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tk_01_byte_codec::{bytes_to_hex, hex_to_bytes, is_hex, strip_0x};

/// Account address: version byte `0x41` followed by a 20-byte hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_BYTES]);

impl Address {
    /// Wrap raw bytes, checking the version byte.
    pub fn from_raw(raw: [u8; ADDRESS_BYTES]) -> Result<Self, AddressError> {
        if raw[0] != ADDRESS_PREFIX_BYTE {
            return Err(AddressError::InvalidPrefix(raw[0]));
        }
        Ok(Self(raw))
    }

    /// Wrap a raw byte slice (must be exactly 21 bytes).
    pub fn from_slice(raw: &[u8]) -> Result<Self, AddressError> {
        let raw: [u8; ADDRESS_BYTES] =
            raw.try_into().map_err(|_| AddressError::InvalidLength {
                expected: ADDRESS_BYTES,
                actual: raw.len(),
            })?;
        Self::from_raw(raw)
    }

    /// Prefix a 20-byte account hash with the network version byte.
    pub fn from_hash20(hash: [u8; 20]) -> Self {
        let mut raw = [0u8; ADDRESS_BYTES];
        raw[0] = ADDRESS_PREFIX_BYTE;
        raw[1..].copy_from_slice(&hash);
        Self(raw)
    }

    /// Decode a base58check string.
    pub fn from_base58(input: &str) -> Result<Self, AddressError> {
        Self::from_slice(&from_base58check(input)?)
    }

    /// Decode `41` + 40 hex chars or `0x` + 40 hex chars.
    pub fn from_hex(input: &str) -> Result<Self, AddressError> {
        let lowered = input.to_ascii_lowercase();
        let normalized = match lowered.strip_prefix("0x") {
            Some(body) => format!("{ADDRESS_PREFIX}{body}"),
            None => lowered,
        };
        let raw =
            hex_to_bytes(&normalized).map_err(|_| AddressError::InvalidHex(input.to_string()))?;
        Self::from_slice(&raw)
    }

    /// Accept any of the three representations.
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        let trimmed = input.trim();
        if trimmed.starts_with("0x") || trimmed.starts_with("0X") || is_hex(trimmed) {
            Self::from_hex(trimmed)
        } else {
            Self::from_base58(trimmed)
        }
    }

    /// Raw 21 bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_BYTES] {
        &self.0
    }

    /// The 20-byte account hash (version byte stripped).
    pub fn hash20(&self) -> [u8; 20] {
        let mut hash = [0u8; 20];
        hash.copy_from_slice(&self.0[1..]);
        hash
    }

    /// base58check string.
    pub fn to_base58(&self) -> String {
        to_base58check(&self.0)
    }

    /// Lowercase hex of all 21 bytes (`41…`).
    pub fn to_hex21(&self) -> String {
        bytes_to_hex(&self.0)
    }

    /// ABI form: `0x` + 40 hex chars, version byte stripped.
    pub fn to_abi_hex20(&self) -> String {
        format!("0x{}", bytes_to_hex(&self.0[1..]))
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_base58())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// STRING HELPERS
// =============================================================================

/// Normalize any representation to the 21-byte hex form (`41…`).
pub fn to_hex(input: &str) -> Result<String, AddressError> {
    Address::parse(input).map(|a| a.to_hex21())
}

/// Normalize any representation to base58check.
pub fn from_hex(input: &str) -> Result<String, AddressError> {
    Address::parse(input).map(|a| a.to_base58())
}

/// Normalize any representation to the ABI form (`0x` + 40 hex chars).
pub fn to_hex_for_abi(input: &str) -> Result<String, AddressError> {
    Address::parse(input).map(|a| a.to_abi_hex20())
}

/// Soft check over any representation. Hex inputs are validated through
/// their base58check projection so both shapes obey the same rules.
pub fn is_address(input: &str) -> bool {
    let body = strip_0x(input);
    if is_hex(input) && body.len() == 2 * ADDRESS_BYTES {
        return match hex_to_bytes(body) {
            Ok(raw) => is_valid(&to_base58check(&raw)),
            Err(_) => false,
        };
    }
    is_valid(input)
}
