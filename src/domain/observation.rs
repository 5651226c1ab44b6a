//! Wireless signal observations and vendor signal-level normalization.

use serde::{Deserialize, Serialize};

/// One wireless signal reading from a single scan.
///
/// Identifiers are not guaranteed unique within a scan in general; where
/// duplicates occur, the feature builder lets the last observation win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalObservation {
    /// Network identifier (SSID)
    pub ssid: String,

    /// Raw received signal strength in dBm, vendor scale (roughly -100..0)
    pub rssi_dbm: i32,
}

impl SignalObservation {
    /// Create a new observation
    pub fn new(ssid: impl Into<String>, rssi_dbm: i32) -> Self {
        Self {
            ssid: ssid.into(),
            rssi_dbm,
        }
    }
}

/// Parameters of the monotonic RSSI -> signal-level mapping.
///
/// Mirrors the Android `WifiManager.calculateSignalLevel` contract: RSSI is
/// clamped into `[min_rssi_dbm, max_rssi_dbm]` and mapped linearly onto
/// `0..levels-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalScale {
    /// RSSI at or below which the level is 0 (dBm)
    pub min_rssi_dbm: i32,

    /// RSSI at or above which the level is `levels - 1` (dBm)
    pub max_rssi_dbm: i32,

    /// Number of discrete levels
    pub levels: i32,
}

impl Default for SignalScale {
    fn default() -> Self {
        Self {
            min_rssi_dbm: -100,
            max_rssi_dbm: -55,
            levels: 100,
        }
    }
}

impl SignalScale {
    /// Normalize a raw RSSI reading onto `0..levels-1`.
    pub fn level(&self, rssi_dbm: i32) -> i32 {
        if rssi_dbm <= self.min_rssi_dbm {
            0
        } else if rssi_dbm >= self.max_rssi_dbm {
            self.levels - 1
        } else {
            let input_range = self.max_rssi_dbm - self.min_rssi_dbm;
            let output_range = self.levels - 1;
            (rssi_dbm - self.min_rssi_dbm) * output_range / input_range
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_and_ceiling_clamp() {
        let scale = SignalScale::default();
        assert_eq!(scale.level(-100), 0);
        assert_eq!(scale.level(-120), 0);
        assert_eq!(scale.level(-55), 99);
        assert_eq!(scale.level(0), 99);
    }

    #[test]
    fn mapping_is_monotonic() {
        let scale = SignalScale::default();
        let mut prev = scale.level(-100);
        for rssi in -99..=-55 {
            let level = scale.level(rssi);
            assert!(level >= prev, "level decreased at {rssi} dBm");
            prev = level;
        }
    }

    #[test]
    fn midpoint_maps_linearly() {
        let scale = SignalScale::default();
        // (-77 - -100) * 99 / 45 = 50
        assert_eq!(scale.level(-77), 50);
    }

    #[test]
    fn custom_scale_with_unit_slope() {
        // One level per dBm: level(r) = r + 100.
        let scale = SignalScale {
            min_rssi_dbm: -100,
            max_rssi_dbm: -1,
            levels: 100,
        };
        assert_eq!(scale.level(-60), 40);
        assert_eq!(scale.level(-90), 10);
    }

    #[test]
    fn observation_constructor() {
        let obs = SignalObservation::new("eduroam", -67);
        assert_eq!(obs.ssid, "eduroam");
        assert_eq!(obs.rssi_dbm, -67);
    }
}
