//! Classifier feature vector
//!
//! The classifier was trained on eleven columns in a fixed order. Reordering
//! them does not fail, it silently corrupts every prediction, so the order
//! lives here once and every producer and consumer indexes through it.

use serde::{Deserialize, Serialize};

/// Number of features the classifier consumes
pub const FEATURE_COUNT: usize = 11;

/// Training column names, in feature-vector order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "gender",
    "ap_hi",
    "ap_lo",
    "cholesterol",
    "gluc",
    "smoke",
    "alco",
    "active",
    "age_years",
    "bmi",
    "bp_diff",
];

/// Human-readable labels, in feature-vector order
pub const FEATURE_LABELS: [&str; FEATURE_COUNT] = [
    "Gender",
    "Systolic BP",
    "Diastolic BP",
    "Cholesterol",
    "Glucose",
    "Smoking",
    "Alcohol",
    "Activity",
    "Age",
    "BMI",
    "Pulse Pressure",
];

/// Position of each feature inside the vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Gender = 0,
    SystolicBp = 1,
    DiastolicBp = 2,
    Cholesterol = 3,
    Glucose = 4,
    Smoker = 5,
    Alcohol = 6,
    Active = 7,
    Age = 8,
    BodyMassIndex = 9,
    BpDifferential = 10,
}

impl Feature {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        FEATURE_NAMES[self.index()]
    }

    pub fn label(self) -> &'static str {
        FEATURE_LABELS[self.index()]
    }
}

/// Fixed-order numeric input to the classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.0[feature.index()]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// (column name, value) pairs, mainly for logging
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_indices_follow_names() {
        assert_eq!(Feature::Gender.name(), "gender");
        assert_eq!(Feature::SystolicBp.name(), "ap_hi");
        assert_eq!(Feature::Age.name(), "age_years");
        assert_eq!(Feature::BodyMassIndex.name(), "bmi");
        assert_eq!(Feature::BpDifferential.name(), "bp_diff");
        assert_eq!(Feature::BpDifferential.index(), FEATURE_COUNT - 1);
    }

    #[test]
    fn test_labels_align_with_names() {
        assert_eq!(Feature::BpDifferential.label(), "Pulse Pressure");
        assert_eq!(Feature::Active.label(), "Activity");
    }

    #[test]
    fn test_vector_accessors() {
        let v = FeatureVector::new([1.0, 120.0, 80.0, 1.0, 1.0, 0.0, 0.0, 1.0, 50.0, 24.5, 40.0]);
        assert_eq!(v.get(Feature::DiastolicBp), 80.0);
        assert_eq!(v.as_slice().len(), FEATURE_COUNT);

        let named: Vec<_> = v.named().collect();
        assert_eq!(named[8], ("age_years", 50.0));
    }

    #[test]
    fn test_vector_serializes_as_array() {
        let v = FeatureVector::new([0.0; FEATURE_COUNT]);
        let json = serde_json::to_string(&v).unwrap();
        assert!(json.starts_with('['));
    }
}
