//! # Typed Data Encoder
//!
//! ## Construction
//!
//! 1. Every field name is unique within its struct.
//! 2. A field's base type (array suffix stripped) is a primitive leaf or a
//!    declared struct other than the declaring one.
//! 3. The primary type is the only struct no other struct references.
//! 4. The reference graph is acyclic.
//! 5. Each struct's full type is its own `Name(type name,...)` followed by
//!    every transitively referenced struct's, sorted by name.
//!
//! ## Encoding
//!
//! Primitives encode to one 32-byte word. Arrays hash the concatenation of
//! their element words (struct elements hashed first). Structs encode as
//! `type_hash || field words`, with struct-typed fields hashed.

use super::entities::{TypedDataField, TypedDataTypes};
use super::errors::TypedDataError;
use parking_lot::RwLock;
use serde_json::Value;
use shared_crypto::{keccak256, Hash};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use tk_01_byte_codec::{hex_to_bytes, right_pad_32, Integer, Word};
use tk_02_address_codec::Address;
use tk_04_abi_coder::Primitive;
use tracing::{debug, warn};

/// Cached encoder for one type string.
#[derive(Debug)]
pub enum FieldEncoder {
    Primitive(Primitive),
    Array {
        element_type: String,
        element: Arc<FieldEncoder>,
        element_is_struct: bool,
        length: Option<usize>,
    },
    Struct {
        name: String,
        type_hash: Hash,
    },
}

impl FieldEncoder {
    /// Encode `value`. Primitive and array encoders yield one word; struct
    /// encoders yield `type_hash || field words`.
    pub fn encode(&self, ctx: &TypedDataEncoder, value: &Value) -> Result<Vec<u8>, TypedDataError> {
        match self {
            FieldEncoder::Primitive(p) => Ok(encode_primitive(*p, value)?.to_vec()),
            FieldEncoder::Array {
                element_type,
                element,
                element_is_struct,
                length,
            } => {
                let items = value.as_array().ok_or_else(|| TypedDataError::InvalidValue {
                    ty: format!("{element_type}[]"),
                    reason: format!("expected array, got {value}"),
                })?;
                if let Some(n) = length {
                    if items.len() != *n {
                        return Err(TypedDataError::InvalidValue {
                            ty: format!("{element_type}[{n}]"),
                            reason: format!("array length mismatch: got {}", items.len()),
                        });
                    }
                }
                let mut words = Vec::with_capacity(items.len() * 32);
                for item in items {
                    let encoded = element.encode(ctx, item)?;
                    if *element_is_struct {
                        words.extend_from_slice(&keccak256(&encoded));
                    } else {
                        words.extend_from_slice(&encoded);
                    }
                }
                Ok(keccak256(&words).to_vec())
            }
            FieldEncoder::Struct { name, type_hash } => {
                let object = value.as_object().ok_or_else(|| TypedDataError::InvalidValue {
                    ty: name.clone(),
                    reason: format!("expected object, got {value}"),
                })?;
                let fields = ctx
                    .types
                    .get(name)
                    .ok_or_else(|| TypedDataError::UnknownType(name.clone()))?;

                let mut out = Vec::with_capacity(32 * (fields.len() + 1));
                out.extend_from_slice(type_hash);
                for field in fields {
                    let item = object.get(&field.name).ok_or_else(|| {
                        TypedDataError::InvalidValue {
                            ty: name.clone(),
                            reason: format!("missing field {}", field.name),
                        }
                    })?;
                    let encoded = ctx.get_encoder(&field.kind)?.encode(ctx, item)?;
                    if ctx.types.contains_key(&field.kind) {
                        out.extend_from_slice(&keccak256(&encoded));
                    } else {
                        out.extend_from_slice(&encoded);
                    }
                }
                Ok(out)
            }
        }
    }
}

fn invalid(ty: Primitive, reason: impl Into<String>) -> TypedDataError {
    TypedDataError::InvalidValue {
        ty: ty.to_string(),
        reason: reason.into(),
    }
}

fn expect_str(ty: Primitive, value: &Value) -> Result<&str, TypedDataError> {
    value
        .as_str()
        .ok_or_else(|| invalid(ty, format!("expected string, got {value}")))
}

fn encode_primitive(ty: Primitive, value: &Value) -> Result<Word, TypedDataError> {
    match ty {
        Primitive::Address => {
            let address = Address::parse(expect_str(ty, value)?)?;
            let mut word = [0u8; 32];
            word[12..].copy_from_slice(&address.hash20());
            Ok(word)
        }
        Primitive::Bool => {
            let flag = value
                .as_bool()
                .ok_or_else(|| invalid(ty, format!("expected bool, got {value}")))?;
            let mut word = [0u8; 32];
            word[31] = flag as u8;
            Ok(word)
        }
        Primitive::String => Ok(keccak256(expect_str(ty, value)?.as_bytes())),
        Primitive::Bytes => {
            let bytes = hex_to_bytes(expect_str(ty, value)?)
                .map_err(|e| invalid(ty, e.to_string()))?;
            Ok(keccak256(&bytes))
        }
        Primitive::FixedBytes(n) => {
            let bytes = hex_to_bytes(expect_str(ty, value)?)
                .map_err(|e| invalid(ty, e.to_string()))?;
            if bytes.len() != n {
                return Err(invalid(
                    ty,
                    format!("invalid length: expected {n} bytes, got {}", bytes.len()),
                ));
            }
            right_pad_32(&bytes).map_err(|e| invalid(ty, e.to_string()))
        }
        Primitive::Int(bits) => encode_integer(ty, value, true, bits),
        Primitive::Uint(bits) => encode_integer(ty, value, false, bits),
        Primitive::TrcToken => encode_integer(ty, value, false, 256),
    }
}

fn encode_integer(
    ty: Primitive,
    value: &Value,
    signed: bool,
    bits: usize,
) -> Result<Word, TypedDataError> {
    let int = Integer::from_json(value).map_err(|e| invalid(ty, e.to_string()))?;
    if !int.fits(signed, bits) {
        return Err(TypedDataError::OutOfBounds {
            ty: ty.to_string(),
            value: int.to_string(),
        });
    }
    Ok(int.to_word())
}

/// `Name(type1 name1,type2 name2)`
fn encode_struct_type(name: &str, fields: &[TypedDataField]) -> String {
    let inner: Vec<String> = fields
        .iter()
        .map(|f| format!("{} {}", f.kind, f.name))
        .collect();
    format!("{name}({})", inner.join(","))
}

/// Split `T[2][]` into `T` and validate the bracket suffix.
fn base_type(kind: &str) -> Result<&str, TypedDataError> {
    let (base, mut suffix) = match kind.find('[') {
        Some(i) => kind.split_at(i),
        None => (kind, ""),
    };
    while !suffix.is_empty() {
        let close = suffix
            .find(']')
            .filter(|_| suffix.starts_with('['))
            .ok_or_else(|| TypedDataError::UnknownType(kind.to_string()))?;
        let digits = &suffix[1..close];
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TypedDataError::UnknownType(kind.to_string()));
        }
        suffix = &suffix[close + 1..];
    }
    if base.is_empty() {
        return Err(TypedDataError::UnknownType(kind.to_string()));
    }
    Ok(base)
}

/// Encoder for one typed-data schema.
///
/// Immutable after construction; the field-encoder cache only grows and
/// every entry is a pure function of the schema.
#[derive(Debug)]
pub struct TypedDataEncoder {
    types: TypedDataTypes,
    primary_type: String,
    full_types: BTreeMap<String, String>,
    encoders: RwLock<HashMap<String, Arc<FieldEncoder>>>,
}

impl TypedDataEncoder {
    /// Validate a schema and precompute full type strings.
    pub fn new(types: TypedDataTypes) -> Result<Self, TypedDataError> {
        Self::build(types).inspect_err(|e| warn!(error = %e, "Rejected typed-data schema"))
    }

    fn build(types: TypedDataTypes) -> Result<Self, TypedDataError> {
        let mut links: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        let mut parents: BTreeMap<&str, usize> = types.keys().map(|k| (k.as_str(), 0)).collect();

        for (name, fields) in &types {
            let children = links.entry(name.as_str()).or_default();
            let mut seen = BTreeSet::new();
            for field in fields {
                if !seen.insert(field.name.as_str()) {
                    return Err(TypedDataError::DuplicateField {
                        type_name: name.clone(),
                        field: field.name.clone(),
                    });
                }
                let base = base_type(&field.kind)?;
                if base == name {
                    return Err(TypedDataError::CircularType(name.clone()));
                }
                if Primitive::parse(base).is_some() {
                    continue;
                }
                let Some(count) = parents.get_mut(base) else {
                    return Err(TypedDataError::UnknownType(base.to_string()));
                };
                if children.insert(base) {
                    *count += 1;
                }
            }
        }

        let roots: Vec<String> = parents
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(name, _)| name.to_string())
            .collect();
        let primary_type = match roots.as_slice() {
            [] if types.is_empty() => return Err(TypedDataError::NoPrimaryType),
            // Every struct has a parent, so the graph closes on itself.
            [] => {
                let cyclic = find_cycle(&links).unwrap_or_else(|| {
                    types.keys().next().cloned().unwrap_or_default()
                });
                return Err(TypedDataError::CircularType(cyclic));
            }
            [primary] => primary.clone(),
            _ => return Err(TypedDataError::AmbiguousPrimaryType(roots.clone())),
        };

        if let Some(cyclic) = find_cycle(&links) {
            return Err(TypedDataError::CircularType(cyclic));
        }

        let mut full_types = BTreeMap::new();
        for (name, fields) in &types {
            let mut deps = BTreeSet::new();
            collect_dependencies(&links, name, &mut deps);
            let mut full = encode_struct_type(name, fields);
            for dep in deps {
                full.push_str(&encode_struct_type(dep, &types[dep]));
            }
            full_types.insert(name.clone(), full);
        }

        debug!(primary_type = %primary_type, structs = types.len(), "Built typed-data encoder");
        Ok(Self {
            types,
            primary_type,
            full_types,
            encoders: RwLock::new(HashMap::new()),
        })
    }

    pub fn primary_type(&self) -> &str {
        &self.primary_type
    }

    pub fn types(&self) -> &TypedDataTypes {
        &self.types
    }

    /// Full type string of a struct: its own signature plus every dependency's.
    pub fn encode_type(&self, name: &str) -> Result<&str, TypedDataError> {
        self.full_types
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| TypedDataError::UnknownType(name.to_string()))
    }

    /// `keccak256(encode_type(name))`
    pub fn type_hash(&self, name: &str) -> Result<Hash, TypedDataError> {
        Ok(keccak256(self.encode_type(name)?.as_bytes()))
    }

    /// Resolve (and cache) the encoder for a type string.
    pub fn get_encoder(&self, kind: &str) -> Result<Arc<FieldEncoder>, TypedDataError> {
        if let Some(encoder) = self.encoders.read().get(kind) {
            return Ok(Arc::clone(encoder));
        }
        let encoder = Arc::new(self.build_encoder(kind)?);
        Ok(Arc::clone(
            self.encoders
                .write()
                .entry(kind.to_string())
                .or_insert(encoder),
        ))
    }

    fn build_encoder(&self, kind: &str) -> Result<FieldEncoder, TypedDataError> {
        if let Some(body) = kind.strip_suffix(']') {
            let open = body
                .rfind('[')
                .ok_or_else(|| TypedDataError::UnknownType(kind.to_string()))?;
            let (element_type, digits) = (&body[..open], &body[open + 1..]);
            let length = if digits.is_empty() {
                None
            } else {
                Some(
                    digits
                        .parse::<usize>()
                        .map_err(|_| TypedDataError::UnknownType(kind.to_string()))?,
                )
            };
            return Ok(FieldEncoder::Array {
                element_type: element_type.to_string(),
                element: self.get_encoder(element_type)?,
                element_is_struct: self.types.contains_key(element_type),
                length,
            });
        }
        if let Some(primitive) = Primitive::parse(kind) {
            return Ok(FieldEncoder::Primitive(primitive));
        }
        if self.types.contains_key(kind) {
            return Ok(FieldEncoder::Struct {
                name: kind.to_string(),
                type_hash: self.type_hash(kind)?,
            });
        }
        Err(TypedDataError::UnknownType(kind.to_string()))
    }

    /// Encode a value of any declared or primitive type.
    pub fn encode_data(&self, kind: &str, value: &Value) -> Result<Vec<u8>, TypedDataError> {
        self.get_encoder(kind)?.encode(self, value)
    }

    /// `keccak256(encode_data(name, value))`
    pub fn hash_struct(&self, name: &str, value: &Value) -> Result<Hash, TypedDataError> {
        Ok(keccak256(&self.encode_data(name, value)?))
    }

    /// Encode a value of the primary type.
    pub fn encode(&self, value: &Value) -> Result<Vec<u8>, TypedDataError> {
        self.encode_data(&self.primary_type, value)
    }

    /// Hash a value of the primary type.
    pub fn hash(&self, value: &Value) -> Result<Hash, TypedDataError> {
        self.hash_struct(&self.primary_type, value)
    }
}

fn find_cycle(links: &BTreeMap<&str, BTreeSet<&str>>) -> Option<String> {
    fn visit<'a>(
        node: &'a str,
        links: &BTreeMap<&'a str, BTreeSet<&'a str>>,
        on_path: &mut BTreeSet<&'a str>,
        done: &mut BTreeSet<&'a str>,
    ) -> Option<String> {
        if done.contains(node) {
            return None;
        }
        if !on_path.insert(node) {
            return Some(node.to_string());
        }
        for child in links.get(node).into_iter().flatten() {
            if let Some(cyclic) = visit(child, links, on_path, done) {
                return Some(cyclic);
            }
        }
        on_path.remove(node);
        done.insert(node);
        None
    }

    let mut on_path = BTreeSet::new();
    let mut done = BTreeSet::new();
    links
        .keys()
        .find_map(|node| visit(node, links, &mut on_path, &mut done))
}

fn collect_dependencies<'a>(
    links: &BTreeMap<&'a str, BTreeSet<&'a str>>,
    name: &str,
    deps: &mut BTreeSet<&'a str>,
) {
    for child in links.get(name).into_iter().flatten() {
        if deps.insert(child) {
            collect_dependencies(links, child, deps);
        }
    }
}
