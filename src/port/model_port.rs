//! The predictive model collaborator contract.

use crate::domain::features::FeatureVector;
use crate::error::LocatorResult;

/// Minimum number of model outputs the core consumes (x, then y).
pub const MIN_MODEL_OUTPUTS: usize = 2;

/// Opaque pretrained model mapping a feature vector to a position.
///
/// Invocation is synchronous and pure with respect to the loaded
/// parameters; it may be computationally expensive, so it runs on the
/// dedicated loop thread, never concurrently with itself. A failed or
/// malformed prediction discards that tick's estimate and leaves the
/// previous position untouched.
pub trait PredictiveModel: Send {
    /// Predict from one feature vector. The output must have at least
    /// [`MIN_MODEL_OUTPUTS`] elements: x and y in model grid units.
    fn predict(&self, features: &FeatureVector) -> LocatorResult<Vec<f32>>;
}
