//! Application configuration
//!
//! Every section has working defaults; a JSON file only needs the fields it
//! wants to override.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chain::STRIKE_WINDOW_CHOICES;
use crate::core::{OpcError, OpcResult};
use crate::data::CacheConfig;
use crate::payoff::PayoffConfig;

/// Chain display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Strikes shown on each side of the money
    /// Default: 5
    pub num_strikes: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            num_strikes: STRIKE_WINDOW_CHOICES[0],
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OpcConfig {
    pub payoff: PayoffConfig,
    pub display: DisplayConfig,
    pub cache: CacheConfig,
}

impl OpcConfig {
    /// Read a JSON config file; missing sections fall back to defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> OpcResult<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;

        tracing::info!("Loaded config from {:?}", path.as_ref());
        Ok(config)
    }

    pub fn validate(&self) -> OpcResult<()> {
        self.payoff.sweep.validate()?;
        if self.display.num_strikes == 0 {
            return Err(OpcError::invalid_input("display.num_strikes must be at least 1"));
        }
        Ok(())
    }
}
