//! Session configuration with serde-friendly defaults.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::observation::SignalScale;
use crate::error::{LocatorError, LocatorResult};

/// Configuration for a locator session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocatorConfig {
    /// Feature-vector length N; the last slot carries the heading
    #[serde(default = "default_feature_len")]
    pub feature_len: usize,

    /// Tick budget in milliseconds; a faster tick sleeps the remainder,
    /// a slower tick runs long with no catch-up
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Display-unit multiplier converting model grid units to pixels
    #[serde(default = "default_display_scale")]
    pub display_scale: i32,

    /// RSSI treated as zero signal (dBm)
    #[serde(default = "default_min_rssi")]
    pub min_rssi_dbm: i32,

    /// RSSI treated as full signal (dBm)
    #[serde(default = "default_max_rssi")]
    pub max_rssi_dbm: i32,

    /// Number of normalized signal levels (levels map onto 0..levels-1)
    #[serde(default = "default_signal_levels")]
    pub signal_levels: i32,
}

fn default_feature_len() -> usize {
    76
}

fn default_tick_ms() -> u64 {
    200
}

fn default_display_scale() -> i32 {
    50
}

fn default_min_rssi() -> i32 {
    -100
}

fn default_max_rssi() -> i32 {
    -55
}

fn default_signal_levels() -> i32 {
    100
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            feature_len: default_feature_len(),
            tick_ms: default_tick_ms(),
            display_scale: default_display_scale(),
            min_rssi_dbm: default_min_rssi(),
            max_rssi_dbm: default_max_rssi(),
            signal_levels: default_signal_levels(),
        }
    }
}

impl LocatorConfig {
    /// Set the tick budget
    pub fn with_tick_ms(mut self, tick_ms: u64) -> Self {
        self.tick_ms = tick_ms;
        self
    }

    /// Set the feature-vector length
    pub fn with_feature_len(mut self, feature_len: usize) -> Self {
        self.feature_len = feature_len;
        self
    }

    /// Set the display-unit multiplier
    pub fn with_display_scale(mut self, display_scale: i32) -> Self {
        self.display_scale = display_scale;
        self
    }

    /// The tick budget as a [`Duration`]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// The RSSI normalization parameters
    pub fn signal_scale(&self) -> SignalScale {
        SignalScale {
            min_rssi_dbm: self.min_rssi_dbm,
            max_rssi_dbm: self.max_rssi_dbm,
            levels: self.signal_levels,
        }
    }

    /// Validate internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::Config`] on an unusable configuration.
    pub fn validate(&self) -> LocatorResult<()> {
        if self.feature_len < 2 {
            return Err(LocatorError::config(format!(
                "feature_len must be at least 2 (one signal slot plus heading), got {}",
                self.feature_len
            )));
        }
        if self.tick_ms == 0 {
            return Err(LocatorError::config("tick_ms must be non-zero"));
        }
        if self.display_scale == 0 {
            return Err(LocatorError::config("display_scale must be non-zero"));
        }
        if self.max_rssi_dbm <= self.min_rssi_dbm {
            return Err(LocatorError::config(format!(
                "max_rssi_dbm ({}) must exceed min_rssi_dbm ({})",
                self.max_rssi_dbm, self.min_rssi_dbm
            )));
        }
        if self.signal_levels < 2 {
            return Err(LocatorError::config(format!(
                "signal_levels must be at least 2, got {}",
                self.signal_levels
            )));
        }
        Ok(())
    }
}
