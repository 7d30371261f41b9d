//! # TronKit
//!
//! Client-side toolkit for a base58check-addressed secp256k1 ledger.
//!
//! | Crate | Concern |
//! |-------|---------|
//! | [`bytes`] | hex/UTF-8 conversion, word padding, integers |
//! | [`address`] | base58check and hex address forms |
//! | [`signing`] | keys, digest signing, recovery, message hashing |
//! | [`abi`] | contract parameter coding |
//! | [`typed_data`] | structured-data hashing with a domain separator |
//! | [`telemetry`] | log subscriber setup |
//!
//! [`Toolkit`] wires the services from one [`ToolkitConfig`] and signs
//! typed data end to end:
//!
//! ```rust,ignore
//! let toolkit = Toolkit::new(ToolkitConfig::from_env()?)?;
//! toolkit.init_logging()?;
//! let signature = toolkit.sign_typed_data(&domain, &types, &message, &key)?;
//! ```

pub mod config;
pub mod errors;
pub mod toolkit;

pub use config::ToolkitConfig;
pub use errors::ToolkitError;
pub use toolkit::Toolkit;

pub use shared_crypto as crypto;
pub use tk_01_byte_codec as bytes;
pub use tk_02_address_codec as address;
pub use tk_03_signing_engine as signing;
pub use tk_04_abi_coder as abi;
pub use tk_05_typed_data as typed_data;
pub use tk_telemetry as telemetry;

pub use tk_02_address_codec::Address;
pub use tk_03_signing_engine::{EcdsaSignature, SigningApi, SigningService};
pub use tk_04_abi_coder::{AbiCoderApi, AbiCoderService, AbiFunction, AbiParam};
pub use tk_05_typed_data::{TypedDataDomain, TypedDataEncoder, TypedDataField, TypedDataTypes};
