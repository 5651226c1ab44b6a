//! Rendering: the affine transform, the indicator draw routine, and the
//! fixed-budget render loop.

pub mod indicator;
pub mod render_loop;
pub mod transform;
