//! Runtime configuration
//!
//! Defaults, then an optional JSON file, then the `MIXTIPS_STORE`
//! environment variable. Command-line flags are applied last by the CLI.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::advisory::{Advisor, AdvisoryThresholds};
use crate::error::{MixError, Result};

/// Environment variable overriding [`Config::store_path`]
pub const STORE_ENV: &str = "MIXTIPS_STORE";

/// Default record file, relative to the working directory
pub const DEFAULT_STORE_FILE: &str = "mixtips_records.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON file holding submission records
    pub store_path: PathBuf,
    /// Healthy bands for the advice rules
    pub thresholds: AdvisoryThresholds,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            store_path: PathBuf::from(DEFAULT_STORE_FILE),
            thresholds: AdvisoryThresholds::default(),
        }
    }
}

impl Config {
    /// Build the effective configuration
    ///
    /// Reads `path` when given, then applies the environment override.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_store_override(std::env::var_os(STORE_ENV)))
    }

    /// Parse a JSON config file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| MixError::Config {
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;

        serde_json::from_str(&content).map_err(|e| MixError::Config {
            reason: format!("invalid config {}: {}", path.display(), e),
        })
    }

    /// Replace the store path if `value` is set and non-empty
    pub fn with_store_override(mut self, value: Option<OsString>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.store_path = PathBuf::from(value);
        }
        self
    }

    /// Advisor using the configured thresholds
    pub fn advisor(&self) -> Advisor {
        Advisor::with_thresholds(self.thresholds)
    }
}
