//! # Runner Configuration
//!
//! Runtime parameters read from the environment.

use anyhow::{Context, Result};
use std::env;

/// Demo runner configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Multiplier applied to every demo transaction's gas limit.
    pub gas_limit_scale: u64,
    /// Pretty-print the JSON report.
    pub pretty_json: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            gas_limit_scale: 1,
            pretty_json: true,
        }
    }
}

impl RunnerConfig {
    /// Load configuration from environment variables.
    ///
    /// - `MVM_GAS_LIMIT_SCALE`: gas limit multiplier (default: 1)
    /// - `MVM_PRETTY_JSON`: pretty-print output (default: true)
    ///
    /// # Errors
    ///
    /// Fails if `MVM_GAS_LIMIT_SCALE` is not a non-negative integer.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(scale) = lookup("MVM_GAS_LIMIT_SCALE") {
            config.gas_limit_scale = scale
                .trim()
                .parse()
                .with_context(|| format!("MVM_GAS_LIMIT_SCALE must be an integer, got {scale:?}"))?;
        }
        if let Some(pretty) = lookup("MVM_PRETTY_JSON") {
            config.pretty_json = pretty.to_lowercase() != "false" && pretty != "0";
        }
        Ok(config)
    }
}
