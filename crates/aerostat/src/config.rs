//! Configuration management for aerostat.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.
//!
//! The only tunable behavior in this crate is the trace-correction heuristic;
//! its thresholds live here so operators can tighten or relax anomaly
//! detection without a rebuild.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config directory name.
const CONFIG_DIR_NAME: &str = "aerostat";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `AEROSTAT_`, sections separated
///    by `__`, e.g. `AEROSTAT_TRACE__MAX_SPEED_MPS`)
/// 2. TOML config file at `~/.config/aerostat/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Trace-correction configuration.
    pub trace: TraceConfig,
}

/// Thresholds for the GPS trace anomaly-correction heuristic.
///
/// A sample is plausible relative to a neighbor when the great-circle
/// distance between them is within `tolerance_m` plus the ground covered at
/// `max_speed_mps` over the elapsed time. Defaults are sized for hot-air
/// balloon flight: ~60 m/s is far beyond any credible ground speed, and the
/// 500 m base tolerance absorbs ordinary GPS jitter between close samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Maximum plausible ground speed in meters per second.
    pub max_speed_mps: f64,
    /// Base distance tolerance in meters, independent of elapsed time.
    pub tolerance_m: f64,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            max_speed_mps: 60.0,
            tolerance_m: 500.0,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `AEROSTAT_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("AEROSTAT_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.trace.max_speed_mps.is_finite() || self.trace.max_speed_mps <= 0.0 {
            return Err(Error::ConfigValidation {
                message: format!(
                    "max_speed_mps must be a positive finite number, got {}",
                    self.trace.max_speed_mps
                ),
            });
        }

        if !self.trace.tolerance_m.is_finite() || self.trace.tolerance_m < 0.0 {
            return Err(Error::ConfigValidation {
                message: format!(
                    "tolerance_m must be a non-negative finite number, got {}",
                    self.trace.tolerance_m
                ),
            });
        }

        Ok(())
    }
}
