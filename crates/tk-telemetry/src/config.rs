//! Telemetry configuration from environment variables.

use crate::TelemetryError;
use serde::{Deserialize, Serialize};
use std::env;

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration for structured logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Filter directive: a bare level (`info`) or an `EnvFilter` expression
    /// (`tk_05_typed_data=debug,warn`)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Whether to include the event target
    pub with_target: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            with_target: true,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `TK_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `TK_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `TK_LOG_TARGET`: Include event targets (default: true)
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("TK_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            json_logs: env::var("TK_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),

            with_target: env::var("TK_LOG_TARGET")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),
        }
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_json_logs(mut self, json_logs: bool) -> Self {
        self.json_logs = json_logs;
        self
    }

    /// Reject empty filters and unknown bare levels.
    pub fn validate(&self) -> Result<(), TelemetryError> {
        let level = self.log_level.trim();
        if level.is_empty() {
            return Err(TelemetryError::Config("log_level must not be empty".into()));
        }
        let is_directive = level.contains('=') || level.contains(',');
        if !is_directive && !LEVELS.contains(&level.to_lowercase().as_str()) {
            return Err(TelemetryError::Config(format!(
                "unknown log level: {level}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.log_level, "info");
        assert!(!config.json_logs);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(TelemetryConfig::default()
            .with_log_level("DEBUG")
            .validate()
            .is_ok());
        assert!(TelemetryConfig::default()
            .with_log_level("tk_04_abi_coder=trace,warn")
            .validate()
            .is_ok());
        assert!(TelemetryConfig::default()
            .with_log_level("loud")
            .validate()
            .is_err());
        assert!(TelemetryConfig::default()
            .with_log_level(" ")
            .validate()
            .is_err());
    }

    #[test]
    fn test_partial_config_file() {
        let config: TelemetryConfig = serde_json::from_str(r#"{"json_logs": true}"#).unwrap();
        assert!(config.json_logs);
        assert_eq!(config.log_level, "info");
    }
}
