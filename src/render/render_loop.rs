//! The fixed-budget estimate-then-draw loop.
//!
//! One dedicated thread runs the tick cycle sequentially: scan, build the
//! feature vector, call the model, update the shared state, draw. A tick
//! that finishes under the budget sleeps the remainder (monotonic clock);
//! a slow tick simply runs long and the next one starts immediately --
//! there is no catch-up and no frame skipping. Stopping is cooperative:
//! the flag is checked once per tick boundary.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::domain::features::FeatureVectorBuilder;
use crate::domain::position::PositionState;
use crate::error::{LocatorError, LocatorResult};
use crate::port::model_port::{PredictiveModel, MIN_MODEL_OUTPUTS};
use crate::port::render_port::RenderSurface;
use crate::port::scan_port::WifiScanPort;
use crate::render::indicator::IndicatorRenderer;

/// Lifecycle of the render loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// No loop thread exists.
    Stopped,
    /// The loop thread is ticking.
    Running,
    /// The stop flag is set; the thread exits after its current tick.
    Stopping,
}

/// Everything one tick needs, owned by the loop thread while running.
pub struct TickDriver {
    scanner: Box<dyn WifiScanPort>,
    model: Box<dyn PredictiveModel>,
    surface: Box<dyn RenderSurface>,
    builder: FeatureVectorBuilder,
    renderer: IndicatorRenderer,
    state: Arc<PositionState>,
}

impl TickDriver {
    /// Bundle the ports and domain components for the loop thread.
    pub fn new(
        scanner: Box<dyn WifiScanPort>,
        model: Box<dyn PredictiveModel>,
        surface: Box<dyn RenderSurface>,
        builder: FeatureVectorBuilder,
        renderer: IndicatorRenderer,
        state: Arc<PositionState>,
    ) -> Self {
        Self {
            scanner,
            model,
            surface,
            builder,
            renderer,
            state,
        }
    }

    /// The shared position state this driver updates.
    pub fn state(&self) -> &Arc<PositionState> {
        &self.state
    }

    /// Run one estimate-then-draw cycle.
    ///
    /// Estimation failures keep the previous position; the draw happens
    /// unconditionally so the marker stays on screen.
    pub fn tick(&mut self) {
        match self.estimate() {
            Ok(Some((x, y))) => self.state.update(x, y),
            Ok(None) => debug!("radio disabled, redrawing last known position"),
            Err(err) => debug!(%err, "estimate unavailable, keeping previous position"),
        }

        if let Err(err) = self.draw() {
            warn!(%err, "draw skipped");
        }
    }

    /// Produce this tick's position estimate in model grid units.
    ///
    /// Returns `Ok(None)` when the radio is disabled (not an error).
    fn estimate(&mut self) -> LocatorResult<Option<(i32, i32)>> {
        if !self.scanner.radio_enabled() {
            return Ok(None);
        }

        let observations = self.scanner.scan()?;
        let features = self.builder.build(&observations, self.state.heading());
        let output = self.model.predict(&features)?;
        if output.len() < MIN_MODEL_OUTPUTS {
            return Err(LocatorError::ShortOutput {
                got: output.len(),
                need: MIN_MODEL_OUTPUTS,
            });
        }

        Ok(Some((output[0].round() as i32, output[1].round() as i32)))
    }

    /// Acquire the surface, draw the indicator, present.
    fn draw(&mut self) -> LocatorResult<()> {
        let canvas = self.surface.acquire()?;
        self.renderer.draw(&self.state, canvas);
        self.surface.present()
    }
}

/// State machine owning the loop thread: Stopped -> Running -> Stopping
/// -> Stopped.
pub struct RenderLoop {
    tick_interval: Duration,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<TickDriver>>,
    driver: Option<TickDriver>,
}

impl RenderLoop {
    /// Create a stopped loop holding the driver until the surface is ready.
    pub fn new(tick_interval: Duration, driver: TickDriver) -> Self {
        Self {
            tick_interval,
            stop: Arc::new(AtomicBool::new(false)),
            handle: None,
            driver: Some(driver),
        }
    }

    /// The configured tick budget.
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LoopState {
        match (&self.handle, self.stop.load(Ordering::Relaxed)) {
            (None, _) => LoopState::Stopped,
            (Some(_), false) => LoopState::Running,
            (Some(_), true) => LoopState::Stopping,
        }
    }

    /// Surface-ready event: spawn the timed loop (Stopped -> Running).
    pub fn surface_ready(&mut self) {
        if self.handle.is_some() {
            warn!("render loop already running, ignoring surface-ready");
            return;
        }
        let Some(mut driver) = self.driver.take() else {
            error!("render loop has no driver (previous thread panicked?)");
            return;
        };

        self.stop.store(false, Ordering::Relaxed);
        let stop = Arc::clone(&self.stop);
        let interval = self.tick_interval;

        self.handle = Some(thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                let started = Instant::now();
                driver.tick();
                if let Some(remaining) = interval.checked_sub(started.elapsed()) {
                    thread::sleep(remaining);
                }
                // A slow tick runs long; the next one starts immediately.
            }
            driver
        }));

        info!(tick_ms = self.tick_interval.as_millis() as u64, "render loop started");
    }

    /// Surface-destroyed event: flag the loop, join the thread
    /// (Running -> Stopping -> Stopped).
    ///
    /// The flag is observed at the next tick boundary, so a slow model
    /// call can delay shutdown by up to one tick.
    pub fn surface_destroyed(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        self.stop.store(true, Ordering::Relaxed);
        match handle.join() {
            Ok(driver) => {
                self.driver = Some(driver);
                info!("render loop stopped");
            }
            Err(_) => error!("render loop thread panicked"),
        }
    }
}

impl Drop for RenderLoop {
    fn drop(&mut self) {
        self.surface_destroyed();
    }
}
