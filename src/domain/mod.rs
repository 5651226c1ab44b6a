//! Domain types: signal observations, feature-vector layout, and the
//! shared position state.

pub mod features;
pub mod observation;
pub mod position;
