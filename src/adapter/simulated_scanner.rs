//! Deterministic synthetic scan source for demos and timing tests.

use crate::domain::observation::SignalObservation;
use crate::error::LocatorResult;
use crate::port::scan_port::WifiScanPort;

/// Emits a slowly-drifting RSSI reading per configured identifier.
///
/// Each call advances an internal counter so successive scans differ, but
/// the sequence is fully deterministic for a given identifier list.
pub struct SimulatedScanner {
    ssids: Vec<String>,
    scan_count: u64,
    radio_enabled: bool,
}

impl SimulatedScanner {
    /// Create a scanner emitting one observation per identifier.
    pub fn new(ssids: Vec<String>) -> Self {
        Self {
            ssids,
            scan_count: 0,
            radio_enabled: true,
        }
    }

    /// Toggle the simulated radio.
    pub fn set_radio_enabled(&mut self, enabled: bool) {
        self.radio_enabled = enabled;
    }

    /// Number of scans performed so far.
    pub fn scan_count(&self) -> u64 {
        self.scan_count
    }
}

impl WifiScanPort for SimulatedScanner {
    fn radio_enabled(&self) -> bool {
        self.radio_enabled
    }

    fn scan(&mut self) -> LocatorResult<Vec<SignalObservation>> {
        self.scan_count += 1;
        let t = self.scan_count as f64;

        Ok(self
            .ssids
            .iter()
            .enumerate()
            .map(|(i, ssid)| {
                // A -70 dBm baseline with a +/-10 dBm per-AP swing.
                let swing = 10.0 * (t * 0.05 + i as f64).sin();
                SignalObservation::new(ssid.clone(), (-70.0 + swing).round() as i32)
            })
            .collect())
    }
}
