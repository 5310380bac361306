#![forbid(unsafe_code)]

//! Tunable parameters for the reorder engine.
//!
//! [`ReorderConfig`] groups gesture and autoscroll settings into one struct
//! that can be built in code or, with the `config-files` feature, loaded from
//! TOML or JSON.
//!
//! ```toml
//! [gesture]
//! long_press_ms = 400
//! long_press_slop = 8.0
//!
//! [autoscroll]
//! edge_threshold = 60.0
//! max_rate = 1200.0
//! ```
//!
//! Missing fields keep their defaults.

#[cfg(feature = "config-files")]
use std::path::Path;

use reorder_core::GestureConfig;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::error::ConfigError;

/// Edge autoscroll parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoscrollConfig {
    /// Master switch (default: true).
    pub enabled: bool,
    /// Distance (points) from a viewport edge inside which scrolling starts
    /// (default: 44.0).
    pub edge_threshold: f32,
    /// Scroll speed gained per point of penetration into the edge zone,
    /// in 1/s (default: 12.0).
    pub rate_gain: f32,
    /// Upper bound on scroll speed in points per second (default: 900.0).
    pub max_rate: f32,
    /// Requested spacing of autoscroll ticks (default: 16ms).
    #[serde(rename = "tick_interval_ms", with = "reorder_core::duration_ms")]
    pub tick_interval: Duration,
}

impl Default for AutoscrollConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            edge_threshold: 44.0,
            rate_gain: 12.0,
            max_rate: 900.0,
            tick_interval: Duration::from_millis(16),
        }
    }
}

/// Top-level configuration for a [`ReorderSession`](crate::ReorderSession).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReorderConfig {
    pub gesture: GestureConfig,
    pub autoscroll: AutoscrollConfig,
}

impl ReorderConfig {
    /// Check every parameter is within its accepted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let slop = self.gesture.long_press_slop;
        if !slop.is_finite() || slop < 0.0 {
            return Err(ConfigError::invalid(
                "gesture.long_press_slop",
                format!("must be finite and >= 0 (got {slop})"),
            ));
        }

        let scroll = &self.autoscroll;
        if !scroll.edge_threshold.is_finite() || scroll.edge_threshold < 0.0 {
            return Err(ConfigError::invalid(
                "autoscroll.edge_threshold",
                format!("must be finite and >= 0 (got {})", scroll.edge_threshold),
            ));
        }
        if !scroll.rate_gain.is_finite() || scroll.rate_gain <= 0.0 {
            return Err(ConfigError::invalid(
                "autoscroll.rate_gain",
                format!("must be finite and > 0 (got {})", scroll.rate_gain),
            ));
        }
        if !scroll.max_rate.is_finite() || scroll.max_rate <= 0.0 {
            return Err(ConfigError::invalid(
                "autoscroll.max_rate",
                format!("must be finite and > 0 (got {})", scroll.max_rate),
            ));
        }
        if scroll.tick_interval.is_zero() {
            return Err(ConfigError::invalid(
                "autoscroll.tick_interval",
                "must be > 0",
            ));
        }
        Ok(())
    }

    /// Parse from a TOML string and validate.
    #[cfg(feature = "config-files")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-files")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Parse from a JSON string and validate.
    #[cfg(feature = "config-files")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config-files")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }
}
