//! # Address Codec (TK-02)
//!
//! Converts between the three shapes an account address takes:
//!
//! | Shape | Example | Used by |
//! |-------|---------|---------|
//! | base58check | `TPL66VK2gCXNCD7EJg9pgJRfqcRazjhUZY` | users, wallets |
//! | 21-byte hex | `41928c9af0651632157ef27a2cf17ca72c575a4d21` | node RPC |
//! | ABI hex | `0x928c9af0651632157ef27a2cf17ca72c575a4d21` | ABI word coder |
//!
//! All three are projections of one [`Address`] value holding the raw
//! 21 bytes (version byte `0x41` followed by the 20-byte account hash).
//!
//! ## Invariants
//!
//! - Decoding any representation of an encoded address yields the same 21 bytes.
//! - A checksum mismatch is always rejected.

pub mod address;
pub mod base58check;
pub mod errors;

pub use address::{from_hex, is_address, to_hex, to_hex_for_abi, Address};
pub use base58check::{from_base58check, is_valid, to_base58check};
pub use errors::AddressError;

/// Network version byte prepended to every account hash.
pub const ADDRESS_PREFIX_BYTE: u8 = 0x41;

/// Hex form of [`ADDRESS_PREFIX_BYTE`].
pub const ADDRESS_PREFIX: &str = "41";

/// Raw address length: version byte plus 20-byte hash.
pub const ADDRESS_BYTES: usize = 21;

/// Length of a base58check address string.
pub const BASE58_ADDRESS_LEN: usize = 34;
