//! # Toolkit
//!
//! Composition root. Builds each subsystem service from its config section
//! and exposes the flows that span more than one subsystem.

use crate::config::ToolkitConfig;
use crate::errors::ToolkitError;
use serde_json::Value;
use tk_01_byte_codec::bytes_to_hex;
use tk_03_signing_engine::{EcdsaSignature, SigningApi, SigningService};
use tk_04_abi_coder::AbiCoderService;
use tk_05_typed_data::{hash_typed_data, TypedDataDomain, TypedDataTypes};
use tk_telemetry::{component_span, init_logging};
use tracing::{debug, warn};

/// Wired toolkit services.
#[derive(Debug)]
pub struct Toolkit {
    config: ToolkitConfig,
    signing: SigningService,
    abi: AbiCoderService,
}

impl Default for Toolkit {
    fn default() -> Self {
        Self::wire(ToolkitConfig::default())
    }
}

impl Toolkit {
    /// Validate `config` and wire the services.
    pub fn new(config: ToolkitConfig) -> Result<Self, ToolkitError> {
        config.validate()?;
        Ok(Self::wire(config))
    }

    /// Load the configuration from the environment and wire the services.
    pub fn from_env() -> Result<Self, ToolkitError> {
        Self::new(ToolkitConfig::from_env()?)
    }

    fn wire(config: ToolkitConfig) -> Self {
        Self {
            signing: SigningService::new(config.signing),
            abi: AbiCoderService::with_config(config.abi),
            config,
        }
    }

    /// Install the global log subscriber described by the telemetry section.
    pub fn init_logging(&self) -> Result<(), ToolkitError> {
        init_logging(&self.config.telemetry)?;
        Ok(())
    }

    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    pub fn signing(&self) -> &SigningService {
        &self.signing
    }

    pub fn abi(&self) -> &AbiCoderService {
        &self.abi
    }

    /// Sign the typed-data digest; returns `0x || r || s || v` with
    /// `v` in `{1b, 1c}`.
    pub fn sign_typed_data(
        &self,
        domain: &TypedDataDomain,
        types: &TypedDataTypes,
        value: &Value,
        private_key: &[u8],
    ) -> Result<String, ToolkitError> {
        let _span = component_span!("sign_typed_data", component = "tronkit").entered();
        let digest = hash_typed_data(domain, types, value)?;
        let signature = self.signing.sign_digest(&digest, private_key)?;
        debug!(digest = %bytes_to_hex(&digest), "Signed typed data");
        Ok(signature.to_message_hex())
    }

    /// Check a typed-data signature against an address in any form.
    pub fn verify_typed_data(
        &self,
        domain: &TypedDataDomain,
        types: &TypedDataTypes,
        value: &Value,
        signature: &str,
        address: &str,
    ) -> Result<bool, ToolkitError> {
        let _span = component_span!("verify_typed_data", component = "tronkit").entered();
        let digest = hash_typed_data(domain, types, value)?;
        let signature = EcdsaSignature::from_hex(signature)?;
        let valid = self.signing.verify_digest(&digest, &signature, address);
        if !valid {
            warn!(digest = %bytes_to_hex(&digest), expected = %address, "Typed-data signature mismatch");
        }
        Ok(valid)
    }

    /// Sign a message under the configured convention; returns the
    /// `0x`-prefixed message signature.
    pub fn sign_message(&self, message: &[u8], private_key: &[u8]) -> Result<String, ToolkitError> {
        Ok(self.signing.sign_message(message, private_key)?.to_message_hex())
    }

    /// Check a message signature under the configured convention.
    pub fn verify_message(
        &self,
        message: &[u8],
        signature: &str,
        address: &str,
    ) -> Result<bool, ToolkitError> {
        let signature = EcdsaSignature::from_hex(signature)?;
        Ok(self.signing.verify_message(message, &signature, address))
    }
}
