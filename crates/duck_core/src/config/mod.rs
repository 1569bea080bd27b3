//! # Engine Configuration
//!
//! Every scorer weight and strategy constant lives here instead of inline.
//!
//! ## Usage
//! ```rust
//! use duck_core::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let cautious = EngineConfig::cautious();
//! let from_env = EngineConfig::from_env_or_default();
//! assert!(config.validate().is_ok());
//! ```
//!
//! ## Environment Variables
//!
//! - `DUCK_ENGINE_PROFILE`: preset (`cautious`, `aggressive`, anything else = default)
//! - `DUCK_BASE_LAT` / `DUCK_BASE_LON`: home base override in decimal degrees

mod scoring_config;
mod strategy_config;

pub use scoring_config::{ClassWeights, ClassificationThresholds, ScoringConfig};
pub use strategy_config::{StrategyConfig, SUCCESS_CEILING, SUCCESS_FLOOR};

use std::env;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, ValidationError};
use crate::models::Coordinate;

pub const PROFILE_ENV: &str = "DUCK_ENGINE_PROFILE";
pub const BASE_LAT_ENV: &str = "DUCK_BASE_LAT";
pub const BASE_LON_ENV: &str = "DUCK_BASE_LON";

/// Home base all distances are measured from.
pub const DEFAULT_BASE: Coordinate = Coordinate { latitude: 46.2044, longitude: 6.1432 };

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_base")]
    pub base: Coordinate,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub strategy: StrategyConfig,
}

fn default_base() -> Coordinate {
    DEFAULT_BASE
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { base: DEFAULT_BASE, scoring: ScoringConfig::default(), strategy: StrategyConfig::default() }
    }
}

impl EngineConfig {
    /// Heavier threat penalty, prefers stealth and traps.
    pub fn cautious() -> Self {
        let mut cfg = Self::default();
        cfg.strategy.threat_weight = 30.0;
        cfg.strategy.aggression_offset = -0.15;
        cfg.scoring.risk_discount = 0.3;
        cfg
    }

    /// Lighter threat penalty, prefers assault and suppression.
    pub fn aggressive() -> Self {
        let mut cfg = Self::default();
        cfg.strategy.threat_weight = 12.0;
        cfg.strategy.aggression_offset = 0.15;
        cfg.scoring.risk_discount = 0.1;
        cfg
    }

    pub fn from_profile(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "cautious" => Self::cautious(),
            "aggressive" => Self::aggressive(),
            _ => Self::default(),
        }
    }

    /// Preset from `DUCK_ENGINE_PROFILE`, then base overrides from
    /// `DUCK_BASE_LAT` / `DUCK_BASE_LON`. Unparseable overrides are ignored.
    pub fn from_env_or_default() -> Self {
        let mut cfg = Self::from_profile(&env::var(PROFILE_ENV).unwrap_or_default());
        if let Some(lat) = env_f64(BASE_LAT_ENV) {
            cfg.base.latitude = lat;
        }
        if let Some(lon) = env_f64(BASE_LON_ENV) {
            cfg.base.longitude = lon;
        }
        if let Err(err) = cfg.base.check_range() {
            warn!(%err, "base coordinate override out of range; using default base");
            cfg.base = DEFAULT_BASE;
        }
        cfg
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(yaml)
            .map_err(|e| ValidationError::InvalidConfig(format!("unreadable YAML: {}", e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| ValidationError::InvalidConfig(format!("cannot encode YAML: {}", e)).into())
    }

    pub fn validate(&self) -> Result<()> {
        self.base
            .check_range()
            .map_err(|e| ValidationError::InvalidConfig(format!("base: {}", e)))?;
        self.scoring.validate().map_err(ValidationError::InvalidConfig)?;
        self.strategy.validate().map_err(ValidationError::InvalidConfig)?;
        Ok(())
    }
}

fn env_f64(key: &str) -> Option<f64> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            warn!(key, value = %raw, "ignoring non-numeric override");
            None
        }
    }
}
