//! # indoor-locator
//!
//! WiFi fingerprint indoor positioning with a fixed-rate floor-plan
//! render loop.
//!
//! The crate turns ambient WiFi scan results into a 2D position estimate
//! via a pretrained predictive model, and continuously renders the
//! estimate as a moving, rotating marker:
//!
//! - **Domain types**: [`SignalObservation`], [`FeatureIndex`],
//!   [`FeatureVectorBuilder`], [`PositionState`]
//! - **Ports**: [`WifiScanPort`], [`PredictiveModel`], [`RenderSurface`] --
//!   traits abstracting the radio, the model backend, and the draw target
//! - **Render loop**: [`RenderLoop`] -- a dedicated thread running
//!   estimate-then-draw ticks on a fixed 200 ms budget
//!
//! # Example
//!
//! ```rust,no_run
//! use indoor_locator::{
//!     adapter::{BufferSurface, LinearModel, SimulatedScanner},
//!     Bitmap, Color, FeatureIndex, FeatureScaler, LocatorConfig, LocatorSession,
//! };
//!
//! let config = LocatorConfig::default();
//! let index = FeatureIndex::load("train_idx.json", config.feature_len)?;
//! let scaler = FeatureScaler::identity(config.feature_len);
//! let model = LinearModel::load("model.json", config.feature_len)?;
//! let scanner = SimulatedScanner::new(vec!["AP1".into(), "AP2".into()]);
//! let surface = BufferSurface::new(800, 600);
//! let icon = Bitmap::solid(24, 24, Color::BLACK);
//!
//! let mut session = LocatorSession::new(
//!     config,
//!     index,
//!     scaler,
//!     Box::new(scanner),
//!     Box::new(model),
//!     Box::new(surface),
//!     icon,
//! )?;
//!
//! session.surface_ready();
//! session.set_heading(90); // sensor callback, any thread
//! session.surface_destroyed();
//! # Ok::<(), indoor_locator::LocatorError>(())
//! ```

pub mod adapter;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
pub mod render;
pub mod session;

// Re-export main types for convenience.
pub use adapter::{BufferSurface, DrawCall, LinearModel, SimulatedScanner, SurfaceProbe};
pub use config::LocatorConfig;
pub use domain::features::{FeatureIndex, FeatureScaler, FeatureVector, FeatureVectorBuilder};
pub use domain::observation::{SignalObservation, SignalScale};
pub use domain::position::PositionState;
pub use error::{LocatorError, LocatorResult};
pub use port::model_port::{PredictiveModel, MIN_MODEL_OUTPUTS};
pub use port::render_port::{Bitmap, Canvas, Color, RenderSurface};
pub use port::scan_port::WifiScanPort;
pub use render::indicator::IndicatorRenderer;
pub use render::render_loop::{LoopState, RenderLoop, TickDriver};
pub use render::transform::Transform2D;
pub use session::LocatorSession;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
