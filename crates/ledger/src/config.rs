//! Ledger configuration.

use common::{LedgerError, LedgerResult};
use serde::{Deserialize, Serialize};

/// Default ledger capacity.
pub const DEFAULT_MAX_SIZE: usize = 50;

/// Ledger configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Whether `add` records anything.
    pub enabled: bool,
    /// Maximum number of retained entries.
    #[serde(alias = "maxSize")]
    pub max_size: usize,
}

impl LedgerConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for a ledger that never records.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Set whether the ledger records entries.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the capacity.
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Check the configuration before a ledger is built from it.
    pub fn validate(&self) -> LedgerResult<()> {
        if self.max_size == 0 {
            return Err(LedgerError::invalid_config(
                "max_size must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}
