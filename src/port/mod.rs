//! Ports abstracting the external collaborators: the wireless radio, the
//! predictive model backend, and the drawing surface.

pub mod model_port;
pub mod render_port;
pub mod scan_port;
