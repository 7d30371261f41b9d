//! # Hex and Byte Conversions

use crate::CodecError;

/// Width of an ABI word in bytes.
pub const WORD_SIZE: usize = 32;

/// A single 32-byte ABI word.
pub type Word = [u8; WORD_SIZE];

/// Strip a leading `0x`/`0X` if present.
pub fn strip_0x(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// True when `s` (after an optional `0x`) is a non-empty, even-length hex string.
pub fn is_hex(s: &str) -> bool {
    let body = strip_0x(s);
    !body.is_empty() && body.len() % 2 == 0 && body.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Decode a hex string, tolerating a `0x` prefix. The empty string decodes to no bytes.
pub fn hex_to_bytes(s: &str) -> Result<Vec<u8>, CodecError> {
    hex::decode(strip_0x(s)).map_err(|_| CodecError::InvalidHex(s.to_string()))
}

/// Decode a hex string into exactly `N` bytes.
pub fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], CodecError> {
    let bytes = hex_to_bytes(s)?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| CodecError::InvalidLength {
        expected: N,
        actual: bytes.len(),
    })
}

/// Lowercase hex without prefix.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Lowercase hex with a `0x` prefix.
pub fn bytes_to_hex_prefixed(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Hex of the UTF-8 bytes of `s` (no prefix).
pub fn utf8_to_hex(s: &str) -> String {
    hex::encode(s.as_bytes())
}

/// Decode hex into a UTF-8 string.
pub fn hex_to_utf8(s: &str) -> Result<String, CodecError> {
    String::from_utf8(hex_to_bytes(s)?).map_err(|_| CodecError::InvalidUtf8)
}

/// Left-pad up to one word (big-endian numbers, addresses).
pub fn left_pad_32(bytes: &[u8]) -> Result<Word, CodecError> {
    if bytes.len() > WORD_SIZE {
        return Err(CodecError::InvalidLength {
            expected: WORD_SIZE,
            actual: bytes.len(),
        });
    }
    let mut word = [0u8; WORD_SIZE];
    word[WORD_SIZE - bytes.len()..].copy_from_slice(bytes);
    Ok(word)
}

/// Right-pad up to one word (`bytesN` values).
pub fn right_pad_32(bytes: &[u8]) -> Result<Word, CodecError> {
    if bytes.len() > WORD_SIZE {
        return Err(CodecError::InvalidLength {
            expected: WORD_SIZE,
            actual: bytes.len(),
        });
    }
    let mut word = [0u8; WORD_SIZE];
    word[..bytes.len()].copy_from_slice(bytes);
    Ok(word)
}
