//! Adapters implementing the ports: a synthetic scan source, a JSON
//! affine model, and an in-memory render surface.

pub mod buffer_surface;
pub mod linear_model;
pub mod simulated_scanner;

pub use buffer_surface::{BufferSurface, DrawCall, SurfaceProbe};
pub use linear_model::LinearModel;
pub use simulated_scanner::SimulatedScanner;
