//! # ABI Parameter Coder (TK-04)
//!
//! Encodes and decodes contract call parameters. Word packing is delegated to
//! an external ABI coder behind the [`WordCoder`] port; this crate owns type
//! parsing, address rewriting between the base58/`41…` and `0x…` shapes, and
//! the chain-specific `trcToken` alias.
//!
//! ## Two calling styles
//!
//! | Style | Entry points | Address rewriting |
//! |-------|--------------|-------------------|
//! | Positional (v1) | `encode_params`, `decode_params` | top-level `address` parameters |
//! | Schema-driven (v2) | `encode_params_v2_by_abi`, `decode_params_v2_by_abi` | every `address` leaf, through tuples and arrays |

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::ethabi_coder::EthabiWordCoder;
pub use domain::abi::{AbiFunction, AbiParam};
pub use domain::config::AbiConfig;
pub use domain::errors::AbiError;
pub use domain::params::{decode_params, encode_params};
pub use domain::types::{Primitive, TupleField, TypeExpr};
pub use domain::v2::{decode_params_v2_by_abi, encode_params_v2_by_abi, DecodedOutputs};
pub use ports::inbound::AbiCoderApi;
pub use ports::outbound::WordCoder;
pub use service::AbiCoderService;
