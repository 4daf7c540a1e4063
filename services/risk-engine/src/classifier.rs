//! Classifier capability
//!
//! The trained model is opaque to the engine: it only needs a positive-class
//! probability for a feature vector, and optionally per-feature importance
//! weights and held-out evaluation counts for the analytics view.

use std::fmt;
use std::sync::Mutex;

use cardio_types::errors::ClassifierError;
use cardio_types::features::FeatureVector;

use crate::analytics::ConfusionMatrix;

/// Binary classifier over the fixed-order feature vector.
///
/// Implementations hold no per-request mutable state and are shared by all
/// sessions for the lifetime of the process.
pub trait Classifier: Send + Sync + fmt::Debug {
    /// Probability of the risk-present class, expected in [0, 1]
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, ClassifierError>;

    /// Per-feature importance weights in feature-vector order
    fn feature_importances(&self) -> Option<&[f64]> {
        None
    }

    /// Confusion matrix from the model's held-out evaluation
    fn evaluation(&self) -> Option<&ConfusionMatrix> {
        None
    }
}

/// Fixed-output classifier for tests and local runs without an artifact.
///
/// Records the last feature vector it was asked about.
#[derive(Debug)]
pub struct StubClassifier {
    probability: f64,
    importances: Option<Vec<f64>>,
    evaluation: Option<ConfusionMatrix>,
    last_features: Mutex<Option<FeatureVector>>,
}

impl StubClassifier {
    pub fn constant(probability: f64) -> Self {
        Self {
            probability,
            importances: None,
            evaluation: None,
            last_features: Mutex::new(None),
        }
    }

    pub fn with_importances(mut self, importances: Vec<f64>) -> Self {
        self.importances = Some(importances);
        self
    }

    pub fn with_evaluation(mut self, evaluation: ConfusionMatrix) -> Self {
        self.evaluation = Some(evaluation);
        self
    }

    pub fn last_features(&self) -> Option<FeatureVector> {
        self.last_features.lock().ok().and_then(|guard| *guard)
    }
}

impl Classifier for StubClassifier {
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, ClassifierError> {
        if let Ok(mut guard) = self.last_features.lock() {
            *guard = Some(*features);
        }
        Ok(self.probability)
    }

    fn feature_importances(&self) -> Option<&[f64]> {
        self.importances.as_deref()
    }

    fn evaluation(&self) -> Option<&ConfusionMatrix> {
        self.evaluation.as_ref()
    }
}

/// Check a raw classifier output before it is scaled to a percentage.
pub fn check_probability(value: f64) -> Result<f64, ClassifierError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ClassifierError::InvalidProbability { value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardio_types::features::FEATURE_COUNT;

    #[test]
    fn test_stub_returns_constant() {
        let stub = StubClassifier::constant(0.25);
        let v = FeatureVector::new([0.0; FEATURE_COUNT]);
        assert_eq!(stub.predict_probability(&v), Ok(0.25));
        assert_eq!(stub.last_features(), Some(v));
    }

    #[test]
    fn test_stub_capabilities_default_absent() {
        let stub = StubClassifier::constant(0.5);
        assert!(stub.feature_importances().is_none());
        assert!(stub.evaluation().is_none());
    }

    #[test]
    fn test_stub_with_importances() {
        let stub = StubClassifier::constant(0.5).with_importances(vec![0.1; FEATURE_COUNT]);
        assert_eq!(stub.feature_importances().map(|i| i.len()), Some(FEATURE_COUNT));
    }

    #[test]
    fn test_check_probability() {
        assert_eq!(check_probability(0.0), Ok(0.0));
        assert_eq!(check_probability(1.0), Ok(1.0));
        assert!(check_probability(1.01).is_err());
        assert!(check_probability(-0.1).is_err());
        assert!(check_probability(f64::NAN).is_err());
    }
}
