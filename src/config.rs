//! Configuration loading
//!
//! Tax parameters can be overridden with a TOML file:
//!
//! ```toml
//! [tax]
//! rate = "0.20"
//! exemption_threshold = "20000.00"
//! ```
//!
//! Lookup order: explicit path, `CAPITAL_GAINS_CONFIG`, then
//! `<config dir>/capital-gains/config.toml`. Without any file the built-in
//! defaults apply.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::CapitalGainsError;
use crate::tax::position::{DEFAULT_EXEMPTION_THRESHOLD, DEFAULT_TAX_RATE};
use crate::tax::{Amount, TaxRules};

pub const CONFIG_ENV_VAR: &str = "CAPITAL_GAINS_CONFIG";

/// Top-level configuration file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tax: TaxConfig,
}

/// `[tax]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TaxConfig {
    pub rate: Decimal,
    pub exemption_threshold: Decimal,
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            rate: DEFAULT_TAX_RATE,
            exemption_threshold: DEFAULT_EXEMPTION_THRESHOLD,
        }
    }
}

impl Config {
    pub fn parse_toml(content: &str) -> Result<Self, CapitalGainsError> {
        toml::from_str(content).map_err(|e| CapitalGainsError::ConfigError(e.to_string()))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::parse_toml(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Find and load the configuration, falling back to defaults
    ///
    /// An explicitly requested file must exist; the per-user default file is
    /// only read when present.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Self::load(PathBuf::from(path));
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Validated tax rules
    pub fn tax_rules(&self) -> Result<TaxRules, CapitalGainsError> {
        let rate = self.tax.rate;
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(CapitalGainsError::ConfigError(format!(
                "tax.rate must be between 0 and 1 (got {})",
                rate
            )));
        }

        let threshold = self.tax.exemption_threshold;
        if threshold < Decimal::ZERO {
            return Err(CapitalGainsError::ConfigError(format!(
                "tax.exemption_threshold must not be negative (got {})",
                threshold
            )));
        }

        Ok(TaxRules {
            rate,
            exemption_threshold: Amount::of(threshold),
        })
    }
}

/// Per-user config file location
pub fn default_config_path() -> Option<PathBuf> {
    dir_spec::config_home().map(|dir| dir.join("capital-gains").join("config.toml"))
}
