//! Engine configuration: policy constants and the default reserve profile

use crate::context::{MinReserveProfile, TransitionContext};
use amm_math::BPS_SCALE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default ceiling on fee_bps + protocol_fee_bps (10%)
pub const MAX_FEE_BPS: u16 = 1_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

/// Policy constants every validator must agree on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolPolicy {
    /// Ceiling on fee_bps + protocol_fee_bps
    pub max_fee_bps: u16,
}

impl PoolPolicy {
    /// Effective ceiling on the total fee
    ///
    /// A 100% fee leaves nothing to swap, so the ceiling stays below
    /// `BPS_SCALE` whatever `max_fee_bps` says.
    pub fn fee_ceiling(&self) -> u64 {
        (self.max_fee_bps as u64).min(BPS_SCALE - 1)
    }
}

impl Default for PoolPolicy {
    fn default() -> Self {
        Self {
            max_fee_bps: MAX_FEE_BPS,
        }
    }
}

/// On-disk configuration (TOML)
///
/// ```toml
/// [policy]
/// max_fee_bps = 1000
///
/// [min_reserve]
/// base = 689600
/// per_asset_cost = 120680
/// per_byte_cost = 4310
/// buffer_bps = 1000
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub policy: PoolPolicy,
    pub min_reserve: MinReserveProfile,
}

impl EngineConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        log::debug!("loaded engine config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Context for a transaction valid at `current_time`
    pub fn context(&self, current_time: u64, authorized: bool) -> TransitionContext {
        TransitionContext::new(current_time, authorized, self.min_reserve)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.policy.max_fee_bps as u64 >= BPS_SCALE {
            return Err(ConfigError::Invalid("policy.max_fee_bps must be below 10000"));
        }
        if self.min_reserve.buffer_bps as u64 > BPS_SCALE {
            return Err(ConfigError::Invalid("min_reserve.buffer_bps must not exceed 10000"));
        }
        Ok(())
    }
}
