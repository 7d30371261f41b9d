//! # Integers
//!
//! ABI and typed-data integers arrive as JSON numbers, decimal strings, hex
//! strings or negative decimals. `Integer` normalizes them to a sign and a
//! 256-bit magnitude so width checks and two's-complement packing happen in
//! one place.

use crate::{CodecError, Word};
use primitive_types::U256;
use serde_json::Value;
use std::fmt;

/// A signed integer with a 256-bit magnitude.
///
/// Zero is never negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Integer {
    negative: bool,
    magnitude: U256,
}

impl Integer {
    /// Build from sign and magnitude.
    pub fn new(negative: bool, magnitude: U256) -> Self {
        Self {
            negative: negative && !magnitude.is_zero(),
            magnitude,
        }
    }

    /// Non-negative integer.
    pub fn from_u256(magnitude: U256) -> Self {
        Self::new(false, magnitude)
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn magnitude(&self) -> U256 {
        self.magnitude
    }

    /// Parse `123`, `-123`, `0x7b` or `-0x7b`.
    pub fn parse(input: &str) -> Result<Self, CodecError> {
        let trimmed = input.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let magnitude = if let Some(hex) = body
            .strip_prefix("0x")
            .or_else(|| body.strip_prefix("0X"))
        {
            if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(CodecError::InvalidInteger(input.to_string()));
            }
            if hex.trim_start_matches('0').len() > 64 {
                return Err(CodecError::IntegerOverflow(input.to_string()));
            }
            U256::from_str_radix(hex, 16)
                .map_err(|_| CodecError::InvalidInteger(input.to_string()))?
        } else {
            if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
                return Err(CodecError::InvalidInteger(input.to_string()));
            }
            U256::from_dec_str(body).map_err(|_| CodecError::IntegerOverflow(input.to_string()))?
        };

        Ok(Self::new(negative, magnitude))
    }

    /// Read a JSON number or numeric string.
    ///
    /// Floating point numbers are accepted only when they carry no fraction
    /// and sit inside the exactly representable range.
    pub fn from_json(value: &Value) -> Result<Self, CodecError> {
        match value {
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Ok(Self::from_u256(U256::from(u)))
                } else if let Some(i) = n.as_i64() {
                    Ok(Self::new(i < 0, U256::from(i.unsigned_abs())))
                } else {
                    match n.as_f64() {
                        Some(f) if f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 => {
                            Ok(Self::new(f < 0.0, U256::from(f.abs() as u64)))
                        }
                        _ => Err(CodecError::InvalidInteger(n.to_string())),
                    }
                }
            }
            Value::String(s) => Self::parse(s),
            other => Err(CodecError::InvalidInteger(other.to_string())),
        }
    }

    /// Whether the value fits an `intN` (`signed`) or `uintN` of `bits` width.
    pub fn fits(&self, signed: bool, bits: usize) -> bool {
        if bits == 0 || bits > 256 {
            return false;
        }
        if !signed {
            return !self.negative && self.magnitude.bits() <= bits;
        }
        let limit = U256::one() << (bits - 1);
        if self.negative {
            self.magnitude <= limit
        } else {
            self.magnitude < limit
        }
    }

    /// Big-endian two's-complement word.
    pub fn to_word(&self) -> Word {
        let value = if self.negative {
            (!self.magnitude).overflowing_add(U256::one()).0
        } else {
            self.magnitude
        };
        let mut word = [0u8; 32];
        value.to_big_endian(&mut word);
        word
    }

    /// Read a word, interpreting the top bit as a sign when `signed`.
    pub fn from_word(word: &Word, signed: bool) -> Self {
        let raw = U256::from_big_endian(word);
        if signed && word[0] & 0x80 != 0 {
            let magnitude = (!raw).overflowing_add(U256::one()).0;
            Self::new(true, magnitude)
        } else {
            Self::from_u256(raw)
        }
    }

    /// Read the low `bits` of a word as an `intN`/`uintN`, discarding the
    /// higher bits and sign-extending from bit `bits - 1` when `signed`.
    pub fn from_word_width(word: &Word, signed: bool, bits: usize) -> Self {
        if bits == 0 || bits >= 256 {
            return Self::from_word(word, signed);
        }
        let modulus = U256::one() << bits;
        let value = U256::from_big_endian(word) & (modulus - U256::one());
        if signed && value.bit(bits - 1) {
            Self::new(true, modulus - value)
        } else {
            Self::from_u256(value)
        }
    }

    /// JSON number when it fits 64 bits, decimal string otherwise.
    pub fn to_json(&self) -> Value {
        let u64_max = U256::from(u64::MAX);
        if !self.negative && self.magnitude <= u64_max {
            return Value::from(self.magnitude.low_u64());
        }
        if self.negative && self.magnitude <= U256::from(i64::MAX as u64) + U256::one() {
            let m = self.magnitude.low_u64();
            let v = if m == 1u64 << 63 {
                i64::MIN
            } else {
                -(m as i64)
            };
            return Value::from(v);
        }
        Value::String(self.to_string())
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-{}", self.magnitude)
        } else {
            write!(f, "{}", self.magnitude)
        }
    }
}
