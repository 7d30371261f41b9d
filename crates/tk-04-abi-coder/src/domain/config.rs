//! ABI coder configuration.

use serde::{Deserialize, Serialize};

/// Defaults applied by `AbiCoderService`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbiConfig {
    /// Drop a leading 4-byte selector when decoding data that carries one
    pub ignore_method_hash: bool,
    /// Reject missing schema-driven arguments instead of padding them
    pub strict_arguments: bool,
}

impl AbiConfig {
    pub fn with_ignore_method_hash(mut self, ignore: bool) -> Self {
        self.ignore_method_hash = ignore;
        self
    }

    pub fn with_strict_arguments(mut self, strict: bool) -> Self {
        self.strict_arguments = strict;
        self
    }
}
