//! Engine configuration
//!
//! Only caller-facing knobs live here. The algorithmic constants (iteration
//! counts, thresholds, score tiers) are fixed in the modules that use them.

use crate::SizhuError;
use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable overriding `cluster_count`
pub const CLUSTER_COUNT_ENV: &str = "SIZHU_CLUSTER_COUNT";
/// Environment variable overriding `frequency_top_n`
pub const FREQUENCY_TOP_N_ENV: &str = "SIZHU_FREQUENCY_TOP_N";

pub const DEFAULT_CLUSTER_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// k used when clustering without an explicit k
    pub cluster_count: usize,

    /// Keep only the top N combinations per pillar in reports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_top_n: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cluster_count: DEFAULT_CLUSTER_COUNT,
            frequency_top_n: None,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cluster_count(mut self, k: usize) -> Self {
        self.cluster_count = k;
        self
    }

    pub fn with_frequency_top_n(mut self, n: usize) -> Self {
        self.frequency_top_n = Some(n);
        self
    }

    /// Defaults overridden by `SIZHU_CLUSTER_COUNT` / `SIZHU_FREQUENCY_TOP_N`
    pub fn from_env() -> Result<Self, SizhuError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Parse a JSON document; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SizhuError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SizhuError::config_error("json", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SizhuError> {
        if self.cluster_count == 0 {
            return Err(SizhuError::config_error("cluster_count", "cluster_count must be at least 1")
                .with_suggestion("Use the default of 5 clusters"));
        }
        if self.frequency_top_n == Some(0) {
            return Err(SizhuError::config_error("frequency_top_n", "frequency_top_n must be at least 1")
                .with_suggestion("Leave it unset to keep every combination"));
        }
        Ok(())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SizhuError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(CLUSTER_COUNT_ENV) {
            config.cluster_count = parse_count(CLUSTER_COUNT_ENV, &raw)?;
        }
        if let Some(raw) = lookup(FREQUENCY_TOP_N_ENV) {
            config.frequency_top_n = Some(parse_count(FREQUENCY_TOP_N_ENV, &raw)?);
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_count(key: &str, raw: &str) -> Result<usize, SizhuError> {
    raw.trim().parse::<usize>().map_err(|_| {
        SizhuError::config_error(key, format!("'{}' is not a non-negative integer", raw))
    })
}
