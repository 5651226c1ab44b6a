//! The shared position/heading state read by the renderer.
//!
//! Position (x, y) is written only by the loop thread, once per model
//! call. Heading is the one field mutated outside the tick cycle: an
//! external orientation sensor writes it at arbitrary times, and the
//! feature builder reads it when assembling model input. All three fields
//! are atomics so the cross-thread heading traffic needs no lock.

use std::sync::atomic::{AtomicI32, Ordering};

/// Current best estimate of location and heading.
#[derive(Debug)]
pub struct PositionState {
    x_px: AtomicI32,
    y_px: AtomicI32,
    heading_deg: AtomicI32,
    display_scale: i32,
}

impl PositionState {
    /// Create a zeroed state with the given display-unit multiplier.
    pub fn new(display_scale: i32) -> Self {
        Self {
            x_px: AtomicI32::new(0),
            y_px: AtomicI32::new(0),
            heading_deg: AtomicI32::new(0),
            display_scale,
        }
    }

    /// Store a model-space position, converting grid units to pixels.
    pub fn update(&self, x: i32, y: i32) {
        self.x_px.store(x * self.display_scale, Ordering::Relaxed);
        self.y_px.store(y * self.display_scale, Ordering::Relaxed);
    }

    /// Store a new heading, normalized into `[0, 360)`.
    ///
    /// Safe to call from any thread (sensor-callback entry point).
    pub fn set_heading(&self, heading_deg: i32) {
        self.heading_deg
            .store(heading_deg.rem_euclid(360), Ordering::Relaxed);
    }

    /// Current heading in degrees, `[0, 360)`.
    pub fn heading(&self) -> i32 {
        self.heading_deg.load(Ordering::Relaxed)
    }

    /// Current position in drawing-space pixels.
    pub fn position_px(&self) -> (i32, i32) {
        (
            self.x_px.load(Ordering::Relaxed),
            self.y_px.load(Ordering::Relaxed),
        )
    }

    /// The configured grid-to-pixel multiplier.
    pub fn display_scale(&self) -> i32 {
        self.display_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_zeroed() {
        let state = PositionState::new(50);
        assert_eq!(state.position_px(), (0, 0));
        assert_eq!(state.heading(), 0);
    }

    #[test]
    fn update_applies_display_scale() {
        let state = PositionState::new(50);
        state.update(4, 5);
        assert_eq!(state.position_px(), (200, 250));
    }

    #[test]
    fn heading_round_trips_over_full_range() {
        let state = PositionState::new(1);
        for h in 0..360 {
            state.set_heading(h);
            assert_eq!(state.heading(), h);
        }
    }

    #[test]
    fn heading_normalizes_out_of_range_values() {
        let state = PositionState::new(1);
        state.set_heading(360);
        assert_eq!(state.heading(), 0);
        state.set_heading(-90);
        assert_eq!(state.heading(), 270);
        state.set_heading(725);
        assert_eq!(state.heading(), 5);
    }

    #[test]
    fn heading_is_independent_of_position() {
        let state = PositionState::new(10);
        state.set_heading(135);
        state.update(3, 7);
        assert_eq!(state.heading(), 135);
        assert_eq!(state.position_px(), (30, 70));
    }
}
