//! Feature-vector layout: identifier-to-slot index, per-slot scaling,
//! and the builder that turns a scan into model input.
//!
//! The vector layout is fixed at load time: every known identifier owns
//! one slot, the last slot is reserved for the current heading, and all
//! other slots stay at the additive identity (0) until an observation
//! fills them.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::observation::{SignalObservation, SignalScale};
use crate::error::{LocatorError, LocatorResult};

// ---------------------------------------------------------------------------
// FeatureIndex
// ---------------------------------------------------------------------------

/// Immutable mapping from network identifier to feature-vector slot.
///
/// Loaded exactly once per session from a JSON object of the form
/// `{"AP1": 0, "AP2": 1, ...}` and never mutated afterwards. Unknown
/// identifiers are ignored on lookup, never inserted.
#[derive(Debug, Clone)]
pub struct FeatureIndex {
    slots: HashMap<String, usize>,
    feature_len: usize,
}

impl FeatureIndex {
    /// Load the index from a JSON file.
    ///
    /// # Errors
    ///
    /// Fails if the file is unreadable, the JSON is malformed, a slot is
    /// out of bounds for `feature_len` (the last slot is reserved for the
    /// heading), or two identifiers claim the same slot.
    pub fn load(path: impl AsRef<Path>, feature_len: usize) -> LocatorResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), feature_len)
    }

    /// Load the index from any reader producing the JSON object.
    pub fn from_reader(reader: impl Read, feature_len: usize) -> LocatorResult<Self> {
        let slots: HashMap<String, usize> = serde_json::from_reader(reader)?;
        Self::from_map(slots, feature_len)
    }

    /// Build and validate the index from an in-memory map.
    pub fn from_map(slots: HashMap<String, usize>, feature_len: usize) -> LocatorResult<Self> {
        if feature_len < 2 {
            return Err(LocatorError::config(format!(
                "feature_len must be at least 2, got {feature_len}"
            )));
        }

        let mut claimed: Vec<Option<&str>> = vec![None; feature_len];
        for (ssid, &slot) in &slots {
            if slot >= feature_len - 1 {
                return Err(LocatorError::SlotOutOfBounds {
                    slot,
                    len: feature_len,
                });
            }
            if let Some(first) = claimed[slot] {
                return Err(LocatorError::DuplicateSlot {
                    slot,
                    first: first.to_string(),
                    second: ssid.clone(),
                });
            }
            claimed[slot] = Some(ssid);
        }

        Ok(Self { slots, feature_len })
    }

    /// Resolve an identifier to its slot, if known.
    pub fn lookup(&self, ssid: &str) -> Option<usize> {
        self.slots.get(ssid).copied()
    }

    /// Number of known identifiers.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the index knows no identifiers at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The fixed feature-vector length N this index was validated against.
    pub fn feature_len(&self) -> usize {
        self.feature_len
    }
}

// ---------------------------------------------------------------------------
// FeatureScaler
// ---------------------------------------------------------------------------

/// Fixed per-slot affine transform applied to the assembled vector:
/// `y[i] = x[i] * scale[i] + offset[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureScaler {
    scale: Vec<f32>,
    offset: Vec<f32>,
}

impl FeatureScaler {
    /// An identity transform of the given length.
    pub fn identity(len: usize) -> Self {
        Self {
            scale: vec![1.0; len],
            offset: vec![0.0; len],
        }
    }

    /// Build a scaler from explicit coefficient vectors.
    ///
    /// # Errors
    ///
    /// Fails if the two vectors differ in length.
    pub fn new(scale: Vec<f32>, offset: Vec<f32>) -> LocatorResult<Self> {
        if scale.len() != offset.len() {
            return Err(LocatorError::config(format!(
                "scaler coefficient lengths differ: {} scale vs {} offset",
                scale.len(),
                offset.len()
            )));
        }
        Ok(Self { scale, offset })
    }

    /// Load coefficients from a JSON file of the form
    /// `{"scale": [...], "offset": [...]}` and validate against N.
    pub fn load(path: impl AsRef<Path>, feature_len: usize) -> LocatorResult<Self> {
        let file = File::open(path)?;
        let scaler: FeatureScaler = serde_json::from_reader(BufReader::new(file))?;
        if scaler.scale.len() != scaler.offset.len() {
            return Err(LocatorError::config(format!(
                "scaler coefficient lengths differ: {} scale vs {} offset",
                scaler.scale.len(),
                scaler.offset.len()
            )));
        }
        if scaler.len() != feature_len {
            return Err(LocatorError::config(format!(
                "scaler has {} coefficients, feature vector needs {feature_len}",
                scaler.len()
            )));
        }
        Ok(scaler)
    }

    /// Number of per-slot coefficients.
    pub fn len(&self) -> usize {
        self.scale.len()
    }

    /// Whether the scaler has no coefficients.
    pub fn is_empty(&self) -> bool {
        self.scale.is_empty()
    }

    /// Transform every element in place.
    pub fn apply(&self, values: &mut [f32]) {
        debug_assert_eq!(values.len(), self.scale.len());
        for (i, value) in values.iter_mut().enumerate() {
            *value = *value * self.scale[i] + self.offset[i];
        }
    }
}

// ---------------------------------------------------------------------------
// FeatureVector
// ---------------------------------------------------------------------------

/// Fixed-length numeric input consumed by the predictive model.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f32>);

impl FeatureVector {
    /// Vector length N.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the vector is empty (never true for a built vector).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the elements.
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Consume into the underlying buffer.
    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }
}

impl std::ops::Index<usize> for FeatureVector {
    type Output = f32;

    fn index(&self, i: usize) -> &f32 {
        &self.0[i]
    }
}

// ---------------------------------------------------------------------------
// FeatureVectorBuilder
// ---------------------------------------------------------------------------

/// Turns one scan plus the current heading into model input.
#[derive(Debug, Clone)]
pub struct FeatureVectorBuilder {
    index: Arc<FeatureIndex>,
    scaler: FeatureScaler,
    signal_scale: SignalScale,
}

impl FeatureVectorBuilder {
    /// Create a builder over a loaded index and scaler.
    ///
    /// # Errors
    ///
    /// Fails if the scaler's coefficient count does not match the index's
    /// feature length.
    pub fn new(
        index: Arc<FeatureIndex>,
        scaler: FeatureScaler,
        signal_scale: SignalScale,
    ) -> LocatorResult<Self> {
        if scaler.len() != index.feature_len() {
            return Err(LocatorError::config(format!(
                "scaler has {} coefficients, index expects {}",
                scaler.len(),
                index.feature_len()
            )));
        }
        Ok(Self {
            index,
            scaler,
            signal_scale,
        })
    }

    /// The shared index this builder resolves identifiers against.
    pub fn index(&self) -> &FeatureIndex {
        &self.index
    }

    /// Assemble the feature vector for one scan.
    ///
    /// Slots default to 0 and are overwritten only for identifiers present
    /// in the index; a later duplicate identifier silently overwrites an
    /// earlier one. The heading goes into the last slot, then the scaler
    /// runs over every element.
    pub fn build(&self, observations: &[SignalObservation], heading_deg: i32) -> FeatureVector {
        let n = self.index.feature_len();
        let mut values = vec![0.0f32; n];

        for obs in observations {
            if let Some(slot) = self.index.lookup(&obs.ssid) {
                values[slot] = self.signal_scale.level(obs.rssi_dbm) as f32;
            }
        }
        values[n - 1] = heading_deg as f32;

        self.scaler.apply(&mut values);

        FeatureVector(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn test_index() -> Arc<FeatureIndex> {
        let mut slots = HashMap::new();
        slots.insert("AP1".to_string(), 0);
        slots.insert("AP2".to_string(), 1);
        slots.insert("AP3".to_string(), 2);
        Arc::new(FeatureIndex::from_map(slots, 5).unwrap())
    }

    fn unit_scale() -> SignalScale {
        // level(r) = r + 100 on [-100, -1]
        SignalScale {
            min_rssi_dbm: -100,
            max_rssi_dbm: -1,
            levels: 100,
        }
    }

    fn test_builder() -> FeatureVectorBuilder {
        let index = test_index();
        let scaler = FeatureScaler::identity(index.feature_len());
        FeatureVectorBuilder::new(index, scaler, unit_scale()).unwrap()
    }

    #[test]
    fn index_rejects_out_of_bounds_slot() {
        let mut slots = HashMap::new();
        // Slot 4 is the heading slot for N = 5.
        slots.insert("AP1".to_string(), 4);
        let err = FeatureIndex::from_map(slots, 5).unwrap_err();
        assert!(matches!(err, LocatorError::SlotOutOfBounds { slot: 4, len: 5 }));
    }

    #[test]
    fn index_rejects_duplicate_slot() {
        let mut slots = HashMap::new();
        slots.insert("AP1".to_string(), 2);
        slots.insert("AP2".to_string(), 2);
        let err = FeatureIndex::from_map(slots, 5).unwrap_err();
        assert!(matches!(err, LocatorError::DuplicateSlot { slot: 2, .. }));
    }

    #[test]
    fn index_loads_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"AP1": 0, "AP2": 1}}"#).unwrap();
        let index = FeatureIndex::load(file.path(), 3).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.lookup("AP1"), Some(0));
        assert_eq!(index.lookup("AP9"), None);
    }

    #[test]
    fn index_load_reports_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            FeatureIndex::load(file.path(), 3),
            Err(LocatorError::Json(_))
        ));
    }

    #[test]
    fn index_load_reports_missing_file() {
        assert!(matches!(
            FeatureIndex::load("/nonexistent/train_idx.json", 3),
            Err(LocatorError::Io(_))
        ));
    }

    #[test]
    fn built_vector_always_has_n_elements() {
        let builder = test_builder();
        for observations in [
            vec![],
            vec![SignalObservation::new("AP1", -60)],
            vec![
                SignalObservation::new("AP1", -60),
                SignalObservation::new("unknown", -40),
                SignalObservation::new("AP3", -80),
            ],
        ] {
            let vector = builder.build(&observations, 45);
            assert_eq!(vector.len(), 5);
        }
    }

    #[test]
    fn empty_scan_leaves_only_the_heading_slot() {
        let builder = test_builder();
        let vector = builder.build(&[], 90);
        assert_eq!(vector.as_slice(), &[0.0, 0.0, 0.0, 0.0, 90.0]);
    }

    #[test]
    fn unknown_identifier_contributes_nothing() {
        let builder = test_builder();
        let vector = builder.build(&[SignalObservation::new("intruder", -30)], 0);
        assert_eq!(vector.as_slice(), &[0.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn later_duplicate_overwrites_earlier() {
        let builder = test_builder();
        let vector = builder.build(
            &[
                SignalObservation::new("AP2", -90),
                SignalObservation::new("AP2", -60),
            ],
            0,
        );
        // level(-60) = 40 wins over level(-90) = 10.
        assert_eq!(vector[1], 40.0);
    }

    #[test]
    fn scaler_runs_over_every_slot() {
        let index = test_index();
        let scaler = FeatureScaler::new(vec![2.0; 5], vec![1.0; 5]).unwrap();
        let builder = FeatureVectorBuilder::new(index, scaler, unit_scale()).unwrap();
        let vector = builder.build(&[SignalObservation::new("AP1", -60)], 10);
        // (40 * 2) + 1, untouched slots (0 * 2) + 1, heading (10 * 2) + 1.
        assert_eq!(vector.as_slice(), &[81.0, 1.0, 1.0, 1.0, 21.0]);
    }

    #[test]
    fn scaler_rejects_mismatched_lengths() {
        assert!(FeatureScaler::new(vec![1.0; 3], vec![0.0; 4]).is_err());
    }

    #[test]
    fn scaler_loads_and_validates_length() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"scale": [1.0, 1.0, 1.0], "offset": [0.0, 0.0, 0.0]}}"#).unwrap();
        assert!(FeatureScaler::load(file.path(), 3).is_ok());
        assert!(FeatureScaler::load(file.path(), 76).is_err());
    }

    #[test]
    fn builder_rejects_mismatched_scaler() {
        let index = test_index();
        let scaler = FeatureScaler::identity(3);
        assert!(FeatureVectorBuilder::new(index, scaler, unit_scale()).is_err());
    }
}
