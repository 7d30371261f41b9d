//! # Byte Codec (TK-01)
//!
//! Low-level conversions shared by the address, ABI and typed-data layers:
//!
//! - `bytes`: hex ⇄ bytes ⇄ UTF-8 with tolerant `0x` handling and word padding
//! - `integer`: arbitrary-sign 256-bit integers parsed from JSON values and
//!   packed into two's-complement ABI words
//!
//! Nothing in this crate knows about addresses or types; it is pure plumbing.

pub mod bytes;
pub mod errors;
pub mod integer;

pub use bytes::{
    bytes_to_hex, bytes_to_hex_prefixed, decode_fixed, hex_to_bytes, hex_to_utf8, is_hex,
    left_pad_32, right_pad_32, strip_0x, utf8_to_hex, Word, WORD_SIZE,
};
pub use errors::CodecError;
pub use integer::Integer;
pub use primitive_types::U256;
