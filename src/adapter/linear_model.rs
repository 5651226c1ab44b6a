//! Affine prediction model loaded from a JSON artifact.
//!
//! Computes `y = W * x + b` over the feature vector. This is the shipped
//! stand-in for heavier inference backends; anything implementing
//! [`PredictiveModel`] can take its place.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::domain::features::FeatureVector;
use crate::error::{LocatorError, LocatorResult};
use crate::port::model_port::{PredictiveModel, MIN_MODEL_OUTPUTS};

/// On-disk artifact: `{"weights": [[...], ...], "bias": [...]}`.
#[derive(Debug, Deserialize)]
struct LinearModelArtifact {
    weights: Vec<Vec<f32>>,
    bias: Vec<f32>,
}

/// A dense affine model over the feature vector.
#[derive(Debug, Clone)]
pub struct LinearModel {
    weights: Vec<Vec<f32>>,
    bias: Vec<f32>,
    input_len: usize,
}

impl LinearModel {
    /// Load and validate a model artifact.
    ///
    /// # Errors
    ///
    /// Fails if the file is unreadable or malformed, or the shapes do not
    /// match `input_len` / the minimum output count.
    pub fn load(path: impl AsRef<Path>, input_len: usize) -> LocatorResult<Self> {
        let file = File::open(path)?;
        let artifact: LinearModelArtifact = serde_json::from_reader(BufReader::new(file))?;
        Self::from_parts(artifact.weights, artifact.bias, input_len)
    }

    /// Build a model from in-memory weights and bias.
    pub fn from_parts(
        weights: Vec<Vec<f32>>,
        bias: Vec<f32>,
        input_len: usize,
    ) -> LocatorResult<Self> {
        if weights.len() != bias.len() {
            return Err(LocatorError::config(format!(
                "model has {} weight rows but {} bias terms",
                weights.len(),
                bias.len()
            )));
        }
        if weights.len() < MIN_MODEL_OUTPUTS {
            return Err(LocatorError::config(format!(
                "model produces {} outputs, need at least {MIN_MODEL_OUTPUTS}",
                weights.len()
            )));
        }
        for (row_idx, row) in weights.iter().enumerate() {
            if row.len() != input_len {
                return Err(LocatorError::config(format!(
                    "weight row {row_idx} has {} columns, input vector has {input_len}",
                    row.len()
                )));
            }
        }
        Ok(Self {
            weights,
            bias,
            input_len,
        })
    }

    /// Number of model outputs.
    pub fn output_len(&self) -> usize {
        self.bias.len()
    }
}

impl PredictiveModel for LinearModel {
    fn predict(&self, features: &FeatureVector) -> LocatorResult<Vec<f32>> {
        if features.len() != self.input_len {
            return Err(LocatorError::inference(format!(
                "feature vector has {} elements, model expects {}",
                features.len(),
                self.input_len
            )));
        }

        Ok(self
            .weights
            .iter()
            .zip(&self.bias)
            .map(|(row, b)| {
                row.iter()
                    .zip(features.as_slice())
                    .map(|(w, x)| w * x)
                    .sum::<f32>()
                    + b
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use std::sync::Arc;

    use crate::domain::features::{FeatureIndex, FeatureScaler, FeatureVectorBuilder};
    use crate::domain::observation::SignalScale;

    fn vector_of(values: &[f32]) -> FeatureVector {
        // Build through the public builder: zero observations, then the
        // scaler's offset injects the requested values.
        let index = Arc::new(FeatureIndex::from_map(HashMap::new(), values.len()).unwrap());
        let scaler = FeatureScaler::new(vec![0.0; values.len()], values.to_vec()).unwrap();
        let builder = FeatureVectorBuilder::new(index, scaler, SignalScale::default()).unwrap();
        builder.build(&[], 0)
    }

    #[test]
    fn computes_affine_map() {
        let model = LinearModel::from_parts(
            vec![vec![1.0, 0.0, 0.0], vec![0.0, 2.0, 0.0]],
            vec![0.5, -1.0],
            3,
        )
        .unwrap();

        let output = model.predict(&vector_of(&[3.0, 4.0, 90.0])).unwrap();
        assert_eq!(output, vec![3.5, 7.0]);
    }

    #[test]
    fn rejects_shape_mismatches_at_build() {
        assert!(LinearModel::from_parts(vec![vec![1.0]], vec![0.0, 0.0], 1).is_err());
        assert!(LinearModel::from_parts(vec![vec![1.0], vec![1.0]], vec![0.0, 0.0], 2).is_err());
        assert!(LinearModel::from_parts(vec![vec![1.0]], vec![0.0], 1).is_err());
    }

    #[test]
    fn rejects_wrong_input_length_at_predict() {
        let model =
            LinearModel::from_parts(vec![vec![1.0, 1.0], vec![1.0, 1.0]], vec![0.0, 0.0], 2)
                .unwrap();
        assert!(matches!(
            model.predict(&vector_of(&[1.0, 2.0, 3.0])),
            Err(LocatorError::Inference(_))
        ));
    }

    #[test]
    fn loads_from_json_artifact() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"weights": [[0.1, 0.0], [0.0, 0.1]], "bias": [0.0, 0.0]}}"#
        )
        .unwrap();

        let model = LinearModel::load(file.path(), 2).unwrap();
        assert_eq!(model.output_len(), 2);
        let output = model.predict(&vector_of(&[40.0, 90.0])).unwrap();
        assert!((output[0] - 4.0).abs() < 1e-5);
        assert!((output[1] - 9.0).abs() < 1e-5);
    }
}
