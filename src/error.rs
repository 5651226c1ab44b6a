//! Error types for the indoor-locator crate.

use thiserror::Error;

/// Result type alias for locator operations
pub type LocatorResult<T> = Result<T, LocatorError>;

/// Errors that can occur while loading assets, estimating position,
/// or drawing the indicator.
#[derive(Error, Debug)]
pub enum LocatorError {
    /// Configuration or asset validation error
    #[error("configuration error: {0}")]
    Config(String),

    /// A feature slot index is outside the usable range
    #[error("feature slot {slot} out of bounds for vector of length {len} (last slot is reserved for heading)")]
    SlotOutOfBounds {
        /// The offending slot index
        slot: usize,
        /// The configured feature-vector length
        len: usize,
    },

    /// Two identifiers map to the same feature slot
    #[error("duplicate feature slot {slot}: claimed by both '{first}' and '{second}'")]
    DuplicateSlot {
        /// The slot claimed twice
        slot: usize,
        /// Identifier that claimed the slot first
        first: String,
        /// Identifier that claimed the slot again
        second: String,
    },

    /// The wireless radio is off or the scan query failed
    #[error("wireless scan unavailable: {0}")]
    SensorUnavailable(String),

    /// The predictive model invocation failed
    #[error("model inference failed: {0}")]
    Inference(String),

    /// The predictive model returned fewer outputs than the core needs
    #[error("model returned {got} outputs, need at least {need}")]
    ShortOutput {
        /// Number of outputs actually returned
        got: usize,
        /// Minimum number of outputs required
        need: usize,
    },

    /// The drawing surface could not be acquired or presented
    #[error("draw failed: {0}")]
    Draw(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LocatorError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        LocatorError::Config(msg.into())
    }

    /// Create a sensor-unavailable error
    pub fn sensor<S: Into<String>>(msg: S) -> Self {
        LocatorError::SensorUnavailable(msg.into())
    }

    /// Create an inference error
    pub fn inference<S: Into<String>>(msg: S) -> Self {
        LocatorError::Inference(msg.into())
    }

    /// Create a draw error
    pub fn draw<S: Into<String>>(msg: S) -> Self {
        LocatorError::Draw(msg.into())
    }
}
