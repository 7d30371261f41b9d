//! # Signing Engine (TK-03)
//!
//! secp256k1 key generation, public-key → address derivation, deterministic
//! digest signing, public-key recovery and the two message-hashing
//! conventions.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure cryptographic logic, no I/O
//! - **Ports Layer** (`ports/`): The inbound `SigningApi` trait
//! - **Service Layer** (`service.rs`): Applies `SigningConfig` and logs
//!
//! ## Security Notes
//!
//! - Signatures are RFC 6979 deterministic and emitted in low-S form
//! - High-S signatures from other signers are normalized before recovery
//! - Private keys are never logged

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::config::SigningConfig;
pub use domain::ecdsa::{
    ensure_signer, invert_s, recover_address, sign, sign_bytes, verify, verify_batch,
    verify_signature,
};
pub use domain::entities::{
    BatchVerificationResult, EcdsaSignature, VerificationRequest, VerificationResult,
};
pub use domain::errors::SigningError;
pub use domain::keys::{
    compute_address, derive_address, derive_public_key, gen_private_key, gen_private_key_hex,
    keypair_from_hex, keypair_from_slice,
};
pub use domain::message::{
    hash_legacy_hex, hash_message, hash_message_fixed_header, hash_message_with,
    recover_message_signer, sign_message, verify_message, LegacyHeader, MessageConvention,
    ETH_MESSAGE_HEADER, TRON_MESSAGE_HEADER, TRON_MESSAGE_PREFIX,
};
pub use ports::inbound::SigningApi;
pub use service::SigningService;
