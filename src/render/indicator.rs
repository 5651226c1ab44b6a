//! Draws the position marker onto an acquired canvas.
//!
//! Rendering is a pure function of [`PositionState`] plus the target:
//! translate the icon center to the origin, rotate by the current heading,
//! translate to the estimated pixel position, blit.

use crate::domain::position::PositionState;
use crate::port::render_port::{Bitmap, Canvas, Color};
use crate::render::transform::Transform2D;

/// Renders the indicator icon for the current position state.
#[derive(Debug, Clone)]
pub struct IndicatorRenderer {
    icon: Bitmap,
    background: Color,
}

impl IndicatorRenderer {
    /// Create a renderer for the given marker icon and background color.
    pub fn new(icon: Bitmap, background: Color) -> Self {
        Self { icon, background }
    }

    /// The marker icon.
    pub fn icon(&self) -> &Bitmap {
        &self.icon
    }

    /// The composed icon transform for the given state.
    pub fn indicator_transform(&self, state: &PositionState) -> Transform2D {
        let (x_px, y_px) = state.position_px();
        Transform2D::identity()
            .post_translate(
                -(self.icon.width() as f32) / 2.0,
                -(self.icon.height() as f32) / 2.0,
            )
            .post_rotate_deg(state.heading() as f32)
            .post_translate(x_px as f32, y_px as f32)
    }

    /// Clear the canvas and draw the marker.
    pub fn draw(&self, state: &PositionState, canvas: &mut dyn Canvas) {
        canvas.clear(self.background);
        canvas.draw_bitmap(&self.icon, &self.indicator_transform(state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_center_lands_on_scaled_position() {
        let renderer = IndicatorRenderer::new(Bitmap::solid(10, 10, Color::BLACK), Color::WHITE);
        let state = PositionState::new(50);
        state.update(4, 5);
        state.set_heading(90);

        let transform = renderer.indicator_transform(&state);
        let center = transform.apply(renderer.icon().center());
        assert!((center.0 - 200.0).abs() < 1e-3);
        assert!((center.1 - 250.0).abs() < 1e-3);
    }

    #[test]
    fn center_position_is_rotation_invariant() {
        let renderer = IndicatorRenderer::new(Bitmap::solid(16, 24, Color::BLACK), Color::WHITE);
        let state = PositionState::new(10);
        state.update(7, 3);

        for heading in [0, 45, 90, 180, 270, 359] {
            state.set_heading(heading);
            let center = renderer
                .indicator_transform(&state)
                .apply(renderer.icon().center());
            assert!(
                (center.0 - 70.0).abs() < 1e-3 && (center.1 - 30.0).abs() < 1e-3,
                "center drifted at heading {heading}: {center:?}"
            );
        }
    }

    #[test]
    fn zero_heading_keeps_native_orientation() {
        let renderer = IndicatorRenderer::new(Bitmap::solid(10, 10, Color::BLACK), Color::WHITE);
        let state = PositionState::new(1);
        state.update(100, 100);

        // With no rotation, the icon's top-left corner sits half a size
        // up-left of the position.
        let transform = renderer.indicator_transform(&state);
        let corner = transform.apply((0.0, 0.0));
        assert!((corner.0 - 95.0).abs() < 1e-3);
        assert!((corner.1 - 95.0).abs() < 1e-3);
    }
}
