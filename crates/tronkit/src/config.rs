//! # Toolkit Configuration
//!
//! One record for every subsystem's settings. Each section keeps its own
//! defaults, so a partial config file or environment is enough.

use crate::errors::ToolkitError;
use serde::{Deserialize, Serialize};
use std::env;
use tk_03_signing_engine::{LegacyHeader, MessageConvention, SigningConfig};
use tk_04_abi_coder::AbiConfig;
use tk_telemetry::TelemetryConfig;

/// Complete toolkit configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Logging configuration.
    pub telemetry: TelemetryConfig,
    /// Message-signing defaults.
    pub signing: SigningConfig,
    /// ABI coding defaults.
    pub abi: AbiConfig,
}

fn flag(key: &str) -> Result<Option<bool>, ToolkitError> {
    env::var(key).ok().map(|v| parse_flag(key, &v)).transpose()
}

impl ToolkitConfig {
    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - Everything `TelemetryConfig::from_env` reads
    /// - `TK_MESSAGE_CONVENTION`: `legacy` or `v2` (default: v2)
    /// - `TK_LEGACY_HEADER`: `tron` or `ethereum` (default: tron)
    /// - `TK_IGNORE_METHOD_HASH`: Drop selectors when decoding (default: false)
    /// - `TK_STRICT_ABI_ARGS`: Reject missing arguments (default: false)
    pub fn from_env() -> Result<Self, ToolkitError> {
        let mut signing = SigningConfig::default();
        if let Ok(value) = env::var("TK_MESSAGE_CONVENTION") {
            signing = signing.with_convention(parse_convention(&value)?);
        }
        if let Ok(value) = env::var("TK_LEGACY_HEADER") {
            signing = signing.with_legacy_header(parse_header(&value)?);
        }

        let mut abi = AbiConfig::default();
        if let Some(ignore) = flag("TK_IGNORE_METHOD_HASH")? {
            abi = abi.with_ignore_method_hash(ignore);
        }
        if let Some(strict) = flag("TK_STRICT_ABI_ARGS")? {
            abi = abi.with_strict_arguments(strict);
        }

        let config = Self {
            telemetry: TelemetryConfig::from_env(),
            signing,
            abi,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_telemetry(mut self, telemetry: TelemetryConfig) -> Self {
        self.telemetry = telemetry;
        self
    }

    pub fn with_signing(mut self, signing: SigningConfig) -> Self {
        self.signing = signing;
        self
    }

    pub fn with_abi(mut self, abi: AbiConfig) -> Self {
        self.abi = abi;
        self
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ToolkitError> {
        self.telemetry.validate()?;
        Ok(())
    }
}

fn parse_convention(value: &str) -> Result<MessageConvention, ToolkitError> {
    match value.trim().to_lowercase().as_str() {
        "legacy" | "fixed_header" => Ok(MessageConvention::FixedHeader),
        "v2" | "length_prefixed" => Ok(MessageConvention::LengthPrefixed),
        other => Err(ToolkitError::Config(format!(
            "unknown message convention: {other}"
        ))),
    }
}

fn parse_header(value: &str) -> Result<LegacyHeader, ToolkitError> {
    match value.trim().to_lowercase().as_str() {
        "tron" => Ok(LegacyHeader::Tron),
        "ethereum" | "eth" => Ok(LegacyHeader::Ethereum),
        other => Err(ToolkitError::Config(format!("unknown legacy header: {other}"))),
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ToolkitError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ToolkitError::Config(format!("invalid {key}: {other}"))),
    }
}
