//! Random-forest model artifact
//!
//! Loads a serialized tree ensemble from JSON and evaluates it. The artifact
//! declares its training column order and gender coding; both are checked
//! against the engine's layout at load time so a mismatched pipeline fails
//! at startup instead of producing quietly wrong probabilities.
//!
//! Artifact layout:
//!
//! ```json
//! {
//!   "model_type": "random_forest",
//!   "feature_names": ["gender", "ap_hi", ...],
//!   "gender_encoding": "female_one_male_two",
//!   "trees": [{ "nodes": [
//!     { "feature": 9, "threshold": 27.5, "left": 1, "right": 2 },
//!     { "value": [80.0, 20.0] },
//!     { "value": [30.0, 70.0] }
//!   ]}],
//!   "feature_importances": [...],
//!   "evaluation": { "confusion_matrix": [[tn, fp], [fn, tp]] }
//! }
//! ```

use std::io::ErrorKind;
use std::path::Path;

use cardio_types::errors::ClassifierError;
use cardio_types::features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use cardio_types::vitals::GenderEncoding;
use serde::Deserialize;

use crate::analytics::ConfusionMatrix;
use crate::classifier::Classifier;

const MODEL_TYPE: &str = "random_forest";

#[derive(Debug, Deserialize)]
struct ModelArtifact {
    model_type: String,
    feature_names: Vec<String>,
    gender_encoding: GenderEncoding,
    trees: Vec<TreeArtifact>,
    #[serde(default)]
    feature_importances: Option<Vec<f64>>,
    #[serde(default)]
    evaluation: Option<EvaluationArtifact>,
}

#[derive(Debug, Deserialize)]
struct TreeArtifact {
    nodes: Vec<NodeArtifact>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NodeArtifact {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Class weights `[negative, positive]`; counts or fractions
    Leaf { value: Vec<f64> },
}

#[derive(Debug, Deserialize)]
struct EvaluationArtifact {
    confusion_matrix: [[u64; 2]; 2],
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        positive: f64,
    },
}

/// One decision tree; children always sit after their parent
#[derive(Debug, Clone, PartialEq)]
struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    fn from_artifact(index: usize, artifact: TreeArtifact) -> Result<Self, ClassifierError> {
        let invalid = |reason: String| ClassifierError::InvalidTree {
            tree: index,
            reason,
        };

        if artifact.nodes.is_empty() {
            return Err(invalid("no nodes".to_string()));
        }

        let len = artifact.nodes.len();
        let mut nodes = Vec::with_capacity(len);
        for (i, node) in artifact.nodes.into_iter().enumerate() {
            let node = match node {
                NodeArtifact::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= FEATURE_COUNT {
                        return Err(invalid(format!("node {i} splits on feature {feature}")));
                    }
                    if !threshold.is_finite() {
                        return Err(invalid(format!("node {i} has a non-finite threshold")));
                    }
                    // Forward-only links rule out cycles, so evaluation always terminates.
                    for child in [left, right] {
                        if child <= i || child >= len {
                            return Err(invalid(format!("node {i} links to node {child}")));
                        }
                    }
                    Node::Split {
                        feature,
                        threshold,
                        left,
                        right,
                    }
                }
                NodeArtifact::Leaf { value } => {
                    if value.len() != 2 {
                        return Err(invalid(format!(
                            "leaf {i} has {} class weights, expected 2",
                            value.len()
                        )));
                    }
                    if value.iter().any(|w| !w.is_finite() || *w < 0.0) {
                        return Err(invalid(format!("leaf {i} has an invalid class weight")));
                    }
                    let total = value[0] + value[1];
                    if total <= 0.0 {
                        return Err(invalid(format!("leaf {i} has no class weight")));
                    }
                    Node::Leaf {
                        positive: value[1] / total,
                    }
                }
            };
            nodes.push(node);
        }

        Ok(Self { nodes })
    }

    fn predict(&self, features: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                Node::Leaf { positive } => return positive,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[feature] <= threshold { left } else { right };
                }
            }
        }
    }
}

/// Random-forest classifier loaded from a JSON artifact
#[derive(Debug, Clone, PartialEq)]
pub struct ForestModel {
    trees: Vec<DecisionTree>,
    feature_importances: Option<Vec<f64>>,
    evaluation: Option<ConfusionMatrix>,
}

impl ForestModel {
    /// Load and validate the artifact at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ClassifierError::ArtifactMissing {
                path: path.display().to_string(),
            },
            _ => ClassifierError::Malformed {
                reason: format!("{}: {}", path.display(), e),
            },
        })?;

        let model = Self::from_json(&raw)?;
        tracing::info!(
            path = %path.display(),
            trees = model.tree_count(),
            has_importances = model.feature_importances.is_some(),
            "Loaded classifier artifact"
        );
        Ok(model)
    }

    /// Parse and validate an artifact from its JSON text.
    pub fn from_json(raw: &str) -> Result<Self, ClassifierError> {
        let artifact: ModelArtifact =
            serde_json::from_str(raw).map_err(|e| ClassifierError::Malformed {
                reason: e.to_string(),
            })?;

        if artifact.model_type != MODEL_TYPE {
            return Err(ClassifierError::Malformed {
                reason: format!("unsupported model type {}", artifact.model_type),
            });
        }

        if artifact.feature_names.len() != FEATURE_COUNT {
            return Err(ClassifierError::ArityMismatch {
                expected: FEATURE_COUNT,
                found: artifact.feature_names.len(),
            });
        }
        for (index, (expected, found)) in FEATURE_NAMES
            .iter()
            .zip(artifact.feature_names.iter())
            .enumerate()
        {
            if *expected != found.as_str() {
                return Err(ClassifierError::FeatureOrderMismatch {
                    index,
                    expected: expected.to_string(),
                    found: found.clone(),
                });
            }
        }

        if artifact.gender_encoding != GenderEncoding::ACTIVE {
            return Err(ClassifierError::GenderEncodingMismatch {
                expected: GenderEncoding::ACTIVE,
                found: artifact.gender_encoding,
            });
        }

        if artifact.trees.is_empty() {
            return Err(ClassifierError::Malformed {
                reason: "forest has no trees".to_string(),
            });
        }

        if let Some(importances) = &artifact.feature_importances {
            if importances.len() != FEATURE_COUNT {
                return Err(ClassifierError::ArityMismatch {
                    expected: FEATURE_COUNT,
                    found: importances.len(),
                });
            }
        }

        let evaluation = match artifact.evaluation {
            Some(e) => {
                let cm = ConfusionMatrix::from_rows(e.confusion_matrix);
                if cm.total().is_none() {
                    return Err(ClassifierError::Malformed {
                        reason: "confusion matrix counts overflow".to_string(),
                    });
                }
                Some(cm)
            }
            None => None,
        };

        let trees = artifact
            .trees
            .into_iter()
            .enumerate()
            .map(|(i, t)| DecisionTree::from_artifact(i, t))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            trees,
            feature_importances: artifact.feature_importances,
            evaluation,
        })
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}

impl Classifier for ForestModel {
    /// Mean of the per-tree positive-class leaf fractions
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, ClassifierError> {
        let x = features.as_slice();
        let sum: f64 = self.trees.iter().map(|t| t.predict(x)).sum();
        Ok(sum / self.trees.len() as f64)
    }

    fn feature_importances(&self) -> Option<&[f64]> {
        self.feature_importances.as_deref()
    }

    fn evaluation(&self) -> Option<&ConfusionMatrix> {
        self.evaluation.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::feature_vector;
    use cardio_types::vitals::PatientVitals;
    use serde_json::json;
    use std::io::Write;

    fn artifact() -> serde_json::Value {
        json!({
            "model_type": "random_forest",
            "feature_names": FEATURE_NAMES,
            "gender_encoding": "female_one_male_two",
            "trees": [
                { "nodes": [
                    { "feature": 1, "threshold": 139.5, "left": 1, "right": 2 },
                    { "value": [90.0, 10.0] },
                    { "value": [20.0, 80.0] }
                ]},
                { "nodes": [
                    { "feature": 9, "threshold": 30.0, "left": 1, "right": 2 },
                    { "value": [0.7, 0.3] },
                    { "value": [0.4, 0.6] }
                ]}
            ],
            "feature_importances": [0.01, 0.3, 0.1, 0.05, 0.02, 0.01, 0.01, 0.02, 0.2, 0.2, 0.08],
            "evaluation": { "confusion_matrix": [[50, 10], [20, 20]] }
        })
    }

    #[test]
    fn test_predict_averages_trees() {
        let model = ForestModel::from_json(&artifact().to_string()).unwrap();
        assert_eq!(model.tree_count(), 2);

        // sbp 120 → 0.1, bmi 24.5 → 0.3
        let low = feature_vector(&PatientVitals::default());
        let p = model.predict_probability(&low).unwrap();
        assert!((p - 0.2).abs() < 1e-12);

        // sbp 160 → 0.8, bmi 75/1.6² ≈ 29.3 → 0.3
        let high = feature_vector(&PatientVitals {
            systolic_bp: 160,
            height_cm: 160,
            ..PatientVitals::default()
        });
        let p = model.predict_probability(&high).unwrap();
        assert!((p - 0.55).abs() < 1e-12);
    }

    #[test]
    fn test_capabilities_exposed() {
        let model = ForestModel::from_json(&artifact().to_string()).unwrap();
        assert_eq!(model.feature_importances().map(|i| i.len()), Some(FEATURE_COUNT));
        assert_eq!(model.evaluation().and_then(|cm| cm.total()), Some(100));
    }

    #[test]
    fn test_optional_sections_absent() {
        let mut a = artifact();
        let obj = a.as_object_mut().unwrap();
        obj.remove("feature_importances");
        obj.remove("evaluation");
        let model = ForestModel::from_json(&a.to_string()).unwrap();
        assert!(model.feature_importances().is_none());
        assert!(model.evaluation().is_none());
    }

    #[test]
    fn test_reordered_features_rejected() {
        let mut a = artifact();
        let mut names: Vec<&str> = FEATURE_NAMES.to_vec();
        names.swap(1, 2);
        a["feature_names"] = json!(names);
        let err = ForestModel::from_json(&a.to_string()).unwrap_err();
        assert_eq!(
            err,
            ClassifierError::FeatureOrderMismatch {
                index: 1,
                expected: "ap_hi".to_string(),
                found: "ap_lo".to_string(),
            }
        );
    }

    #[test]
    fn test_wrong_arity_rejected() {
        let mut a = artifact();
        a["feature_names"] = json!(["gender", "ap_hi"]);
        let err = ForestModel::from_json(&a.to_string()).unwrap_err();
        assert!(matches!(err, ClassifierError::ArityMismatch { found: 2, .. }));
    }

    #[test]
    fn test_flipped_gender_encoding_rejected() {
        let mut a = artifact();
        a["gender_encoding"] = json!("male_one_female_two");
        let err = ForestModel::from_json(&a.to_string()).unwrap_err();
        assert!(matches!(err, ClassifierError::GenderEncodingMismatch { .. }));
    }

    #[test]
    fn test_backward_link_rejected() {
        let mut a = artifact();
        a["trees"][0]["nodes"][0]["left"] = json!(0);
        let err = ForestModel::from_json(&a.to_string()).unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidTree { tree: 0, .. }));
    }

    #[test]
    fn test_empty_leaf_rejected() {
        let mut a = artifact();
        a["trees"][1]["nodes"][2]["value"] = json!([0.0, 0.0]);
        let err = ForestModel::from_json(&a.to_string()).unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidTree { tree: 1, .. }));
    }

    #[test]
    fn test_overflowing_confusion_matrix_rejected() {
        let mut a = artifact();
        a["evaluation"]["confusion_matrix"] = json!([[u64::MAX, 1], [0, 0]]);
        assert!(matches!(
            ForestModel::from_json(&a.to_string()),
            Err(ClassifierError::Malformed { .. })
        ));
    }

    #[test]
    fn test_unsupported_model_type() {
        let mut a = artifact();
        a["model_type"] = json!("gradient_boosting");
        assert!(matches!(
            ForestModel::from_json(&a.to_string()),
            Err(ClassifierError::Malformed { .. })
        ));
    }

    #[test]
    fn test_garbage_is_malformed() {
        assert!(matches!(
            ForestModel::from_json("not json"),
            Err(ClassifierError::Malformed { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(artifact().to_string().as_bytes()).unwrap();
        let model = ForestModel::load(file.path()).unwrap();
        assert_eq!(model.tree_count(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cardio_rf_model.json");
        let err = ForestModel::load(&path).unwrap_err();
        assert!(matches!(err, ClassifierError::ArtifactMissing { .. }));
    }
}
