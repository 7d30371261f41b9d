//! # TronKit Telemetry
//!
//! Structured logging for the toolkit crates. Every crate logs through
//! `tracing`; this crate installs the subscriber that renders those events.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tk_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `TK_LOG_LEVEL` | `info` | Log filter (falls back to `RUST_LOG`) |
//! | `TK_JSON_LOGS` | `false` | JSON output |
//! | `TK_LOG_TARGET` | `true` | Include event targets |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Global subscriber already installed: {0}")]
    AlreadyInitialized(String),
}

/// Span carrying the toolkit component name.
///
/// ```rust,ignore
/// let _span = component_span!("sign_typed_data", component = "tronkit").entered();
/// ```
#[macro_export]
macro_rules! component_span {
    ($name:expr, $($field:tt)*) => {
        tracing::debug_span!($name, $($field)*)
    };
}
