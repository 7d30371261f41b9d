//! Signing service configuration.

use super::message::{LegacyHeader, MessageConvention};
use serde::{Deserialize, Serialize};

/// Defaults applied by `SigningService` to message signing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigningConfig {
    /// Message-hashing convention used when the caller does not pick one
    pub convention: MessageConvention,
    /// Header used by the fixed-header convention
    pub legacy_header: LegacyHeader,
}

impl SigningConfig {
    /// Builder-style method to set the message convention
    pub fn with_convention(mut self, convention: MessageConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Builder-style method to set the legacy header
    pub fn with_legacy_header(mut self, header: LegacyHeader) -> Self {
        self.legacy_header = header;
        self
    }
}
