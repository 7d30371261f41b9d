//! Umbrella error over every subsystem.

use thiserror::Error;
use tk_01_byte_codec::CodecError;
use tk_02_address_codec::AddressError;
use tk_03_signing_engine::SigningError;
use tk_04_abi_coder::AbiError;
use tk_05_typed_data::TypedDataError;
use tk_telemetry::TelemetryError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ToolkitError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Signing(#[from] SigningError),

    #[error(transparent)]
    Abi(#[from] AbiError),

    #[error(transparent)]
    TypedData(#[from] TypedDataError),

    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
}
