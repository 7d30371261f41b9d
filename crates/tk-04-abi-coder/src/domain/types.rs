//! # Type Expressions
//!
//! ABI type strings are parsed once into a [`TypeExpr`] tree. Array suffixes
//! apply left to right, so `T[2][]` is a dynamic array of `T[2]`.
//!
//! Accepted syntax:
//!
//! ```text
//! type   := base suffix*
//! base   := primitive | "tuple(" fields ")" | "(" fields ")"
//! fields := ε | field ("," field)*
//! field  := type ident?
//! suffix := "[" digits? "]"
//! ```

use super::errors::AbiError;
use std::fmt;

/// Leaf ABI types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    Address,
    Bool,
    String,
    Bytes,
    /// `bytes1` .. `bytes32`
    FixedBytes(usize),
    /// `int8` .. `int256`
    Int(usize),
    /// `uint8` .. `uint256`
    Uint(usize),
    /// Chain-specific token id, an alias of `uint256`
    TrcToken,
}

impl Primitive {
    /// Recognize a primitive type name. `int`/`uint` alias the 256-bit widths.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "address" => return Some(Primitive::Address),
            "bool" => return Some(Primitive::Bool),
            "string" => return Some(Primitive::String),
            "bytes" => return Some(Primitive::Bytes),
            "trcToken" => return Some(Primitive::TrcToken),
            "int" => return Some(Primitive::Int(256)),
            "uint" => return Some(Primitive::Uint(256)),
            _ => {}
        }

        if let Some(size) = name.strip_prefix("bytes") {
            return parse_width(size)
                .filter(|n| (1..=32).contains(n))
                .map(Primitive::FixedBytes);
        }
        if let Some(bits) = name.strip_prefix("uint") {
            return parse_width(bits)
                .filter(|n| is_int_width(*n))
                .map(Primitive::Uint);
        }
        if let Some(bits) = name.strip_prefix("int") {
            return parse_width(bits)
                .filter(|n| is_int_width(*n))
                .map(Primitive::Int);
        }
        None
    }

    /// `trcToken` folded to `uint256`; every other primitive is unchanged.
    pub fn canonical(self) -> Self {
        match self {
            Primitive::TrcToken => Primitive::Uint(256),
            other => other,
        }
    }
}

fn parse_width(digits: &str) -> Option<usize> {
    if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    digits.parse().ok()
}

fn is_int_width(bits: usize) -> bool {
    bits % 8 == 0 && (8..=256).contains(&bits)
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Address => f.write_str("address"),
            Primitive::Bool => f.write_str("bool"),
            Primitive::String => f.write_str("string"),
            Primitive::Bytes => f.write_str("bytes"),
            Primitive::FixedBytes(n) => write!(f, "bytes{n}"),
            Primitive::Int(n) => write!(f, "int{n}"),
            Primitive::Uint(n) => write!(f, "uint{n}"),
            Primitive::TrcToken => f.write_str("trcToken"),
        }
    }
}

/// A tuple component, optionally named.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TupleField {
    pub name: Option<String>,
    pub ty: TypeExpr,
}

/// Parsed ABI type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeExpr {
    Primitive(Primitive),
    Tuple(Vec<TupleField>),
    /// Element type and fixed length (`None` for dynamic arrays)
    Array(Box<TypeExpr>, Option<usize>),
}

impl TypeExpr {
    /// Parse a full type string such as `tuple(address to,uint256)[2][]`.
    pub fn parse(input: &str) -> Result<Self, AbiError> {
        let mut parser = Parser::new(input.trim());
        let ty = parser.parse_type()?;
        parser.expect_end()?;
        Ok(ty)
    }

    /// Apply a bracket suffix such as `[2][]` to an already-built type.
    pub fn with_array_suffix(self, suffix: &str) -> Result<Self, AbiError> {
        let mut parser = Parser::new(suffix.trim());
        let ty = parser.parse_suffixes(self)?;
        parser.expect_end()?;
        Ok(ty)
    }

    /// Same tree with `trcToken` folded to `uint256`.
    pub fn canonical(&self) -> Self {
        match self {
            TypeExpr::Primitive(p) => TypeExpr::Primitive(p.canonical()),
            TypeExpr::Tuple(fields) => TypeExpr::Tuple(
                fields
                    .iter()
                    .map(|f| TupleField {
                        name: f.name.clone(),
                        ty: f.ty.canonical(),
                    })
                    .collect(),
            ),
            TypeExpr::Array(elem, size) => TypeExpr::Array(Box::new(elem.canonical()), *size),
        }
    }
}

/// Canonical signature form: tuples render as `(a,b)`, names are dropped.
impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Primitive(p) => write!(f, "{p}"),
            TypeExpr::Tuple(fields) => {
                f.write_str("(")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", field.ty)?;
                }
                f.write_str(")")
            }
            TypeExpr::Array(elem, Some(n)) => write!(f, "{elem}[{n}]"),
            TypeExpr::Array(elem, None) => write!(f, "{elem}[]"),
        }
    }
}

// =============================================================================
// RECURSIVE-DESCENT PARSER
// =============================================================================

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.src.len() - trimmed.len();
    }

    fn ident(&mut self) -> &'a str {
        let rest = self.rest();
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
            .unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn error(&self) -> AbiError {
        AbiError::InvalidTypeString(self.src.to_string())
    }

    fn expect_end(&self) -> Result<(), AbiError> {
        if self.pos == self.src.len() {
            Ok(())
        } else {
            Err(self.error())
        }
    }

    fn parse_type(&mut self) -> Result<TypeExpr, AbiError> {
        let base = if self.eat("tuple(") || self.eat("(") {
            self.parse_fields()?
        } else {
            let name = self.ident();
            if name.is_empty() {
                return Err(self.error());
            }
            let primitive =
                Primitive::parse(name).ok_or_else(|| AbiError::UnknownType(name.to_string()))?;
            TypeExpr::Primitive(primitive)
        };
        self.parse_suffixes(base)
    }

    fn parse_fields(&mut self) -> Result<TypeExpr, AbiError> {
        let mut fields = Vec::new();
        self.skip_ws();
        if self.eat(")") {
            return Ok(TypeExpr::Tuple(fields));
        }
        loop {
            self.skip_ws();
            let ty = self.parse_type()?;
            self.skip_ws();
            let name = self.ident();
            fields.push(TupleField {
                name: (!name.is_empty()).then(|| name.to_string()),
                ty,
            });
            self.skip_ws();
            if self.eat(",") {
                continue;
            }
            if self.eat(")") {
                return Ok(TypeExpr::Tuple(fields));
            }
            return Err(self.error());
        }
    }

    fn parse_suffixes(&mut self, mut ty: TypeExpr) -> Result<TypeExpr, AbiError> {
        while self.eat("[") {
            let rest = self.rest();
            let digits = rest.find(']').map(|end| &rest[..end]).ok_or_else(|| self.error())?;
            let size = if digits.is_empty() {
                None
            } else {
                match parse_width(digits) {
                    Some(n) => Some(n),
                    None => return Err(self.error()),
                }
            };
            self.pos += digits.len() + 1;
            ty = TypeExpr::Array(Box::new(ty), size);
        }
        Ok(ty)
    }
}
