//! The session root: one explicitly constructed context object owning the
//! feature index, model, ports, shared state, and the render loop.
//!
//! Nothing here is process-global; a session is created with its assets,
//! driven by surface lifecycle events, and torn down by dropping it.

use std::sync::Arc;

use tracing::info;

use crate::config::LocatorConfig;
use crate::domain::features::{FeatureIndex, FeatureScaler, FeatureVectorBuilder};
use crate::domain::position::PositionState;
use crate::error::LocatorResult;
use crate::port::model_port::PredictiveModel;
use crate::port::render_port::{Bitmap, Color, RenderSurface};
use crate::port::scan_port::WifiScanPort;
use crate::render::indicator::IndicatorRenderer;
use crate::render::render_loop::{LoopState, RenderLoop, TickDriver};

/// A fully wired positioning session.
pub struct LocatorSession {
    state: Arc<PositionState>,
    render_loop: RenderLoop,
}

impl LocatorSession {
    /// Wire up a session from validated configuration, loaded assets, and
    /// the three port implementations.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration or when the scaler's coefficient
    /// count does not match the index's feature length.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: LocatorConfig,
        index: FeatureIndex,
        scaler: FeatureScaler,
        scanner: Box<dyn WifiScanPort>,
        model: Box<dyn PredictiveModel>,
        surface: Box<dyn RenderSurface>,
        icon: Bitmap,
    ) -> LocatorResult<Self> {
        config.validate()?;

        let state = Arc::new(PositionState::new(config.display_scale));
        let builder =
            FeatureVectorBuilder::new(Arc::new(index), scaler, config.signal_scale())?;
        let renderer = IndicatorRenderer::new(icon, Color::WHITE);
        let driver = TickDriver::new(
            scanner,
            model,
            surface,
            builder,
            renderer,
            Arc::clone(&state),
        );

        info!(
            feature_len = config.feature_len,
            tick_ms = config.tick_ms,
            "locator session created"
        );

        Ok(Self {
            state,
            render_loop: RenderLoop::new(config.tick_interval(), driver),
        })
    }

    /// Surface-ready event: start the estimate-then-draw loop.
    pub fn surface_ready(&mut self) {
        self.render_loop.surface_ready();
    }

    /// Surface-destroyed event: stop the loop and join its thread.
    pub fn surface_destroyed(&mut self) {
        self.render_loop.surface_destroyed();
    }

    /// Orientation-sensor entry point; safe from any thread.
    pub fn set_heading(&self, heading_deg: i32) {
        self.state.set_heading(heading_deg);
    }

    /// Current heading in degrees `[0, 360)`.
    pub fn heading(&self) -> i32 {
        self.state.heading()
    }

    /// Current estimate in drawing-space pixels.
    pub fn position_px(&self) -> (i32, i32) {
        self.state.position_px()
    }

    /// Current render-loop lifecycle state.
    pub fn loop_state(&self) -> LoopState {
        self.render_loop.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::adapter::{BufferSurface, LinearModel, SimulatedScanner};

    fn test_session(feature_len: usize, scaler_len: usize) -> LocatorResult<LocatorSession> {
        let mut slots = HashMap::new();
        slots.insert("AP1".to_string(), 0);
        let index = FeatureIndex::from_map(slots, feature_len)?;
        let model = LinearModel::from_parts(
            vec![vec![0.0; feature_len], vec![0.0; feature_len]],
            vec![1.0, 2.0],
            feature_len,
        )?;

        LocatorSession::new(
            LocatorConfig::default()
                .with_feature_len(feature_len)
                .with_tick_ms(10),
            index,
            FeatureScaler::identity(scaler_len),
            Box::new(SimulatedScanner::new(vec!["AP1".into()])),
            Box::new(model),
            Box::new(BufferSurface::new(400, 400)),
            Bitmap::solid(8, 8, Color::BLACK),
        )
    }

    #[test]
    fn session_starts_stopped_and_zeroed() {
        let session = test_session(3, 3).unwrap();
        assert_eq!(session.loop_state(), LoopState::Stopped);
        assert_eq!(session.position_px(), (0, 0));
        assert_eq!(session.heading(), 0);
    }

    #[test]
    fn mismatched_scaler_is_rejected() {
        assert!(test_session(3, 76).is_err());
    }

    #[test]
    fn heading_updates_outside_the_loop() {
        let session = test_session(3, 3).unwrap();
        session.set_heading(180);
        assert_eq!(session.heading(), 180);
    }

    #[test]
    fn full_surface_lifecycle() {
        let mut session = test_session(3, 3).unwrap();
        session.surface_ready();
        assert_eq!(session.loop_state(), LoopState::Running);
        session.surface_destroyed();
        assert_eq!(session.loop_state(), LoopState::Stopped);
    }
}
