//! The driving port for wireless observation acquisition.

use crate::domain::observation::SignalObservation;
use crate::error::LocatorResult;

/// Port that abstracts the platform wireless scanning backend.
///
/// A scan yields zero or more observations; identifiers are treated as
/// unique per scan (later duplicates overwrite earlier ones downstream).
pub trait WifiScanPort: Send {
    /// Whether the wireless radio is currently enabled.
    ///
    /// When this returns `false` the tick skips estimation entirely and
    /// redraws the last known position.
    fn radio_enabled(&self) -> bool;

    /// Return the current batch of observations.
    fn scan(&mut self) -> LocatorResult<Vec<SignalObservation>>;
}
