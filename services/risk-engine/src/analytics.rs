//! Model analytics
//!
//! Feature-importance ranking, confusion matrix and the performance metrics
//! derived from it. Backs the analytics view; nothing here feeds the
//! prediction path.

use cardio_types::features::{FEATURE_COUNT, FEATURE_LABELS, FEATURE_NAMES};
use serde::{Deserialize, Serialize};

use crate::classifier::Classifier;

/// Message shown when the classifier exposes no importance weights
pub const IMPORTANCE_UNAVAILABLE: &str = "Feature importances are not available for this model.";

/// One feature's weight in the trained model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub label: String,
    pub importance: f64,
}

/// Importance section of the analytics view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImportanceReport {
    /// Sorted ascending by importance, as the chart draws bottom-up
    Available { factors: Vec<FeatureImportance> },
    Unavailable { message: String },
}

/// Rank importance weights ascending.
///
/// Returns `None` when the weight count does not match the feature layout.
pub fn importance_ranking(importances: &[f64]) -> Option<Vec<FeatureImportance>> {
    if importances.len() != FEATURE_COUNT {
        return None;
    }

    let mut factors: Vec<FeatureImportance> = importances
        .iter()
        .enumerate()
        .map(|(i, &importance)| FeatureImportance {
            feature: FEATURE_NAMES[i].to_string(),
            label: FEATURE_LABELS[i].to_string(),
            importance,
        })
        .collect();
    factors.sort_by(|a, b| a.importance.total_cmp(&b.importance));
    Some(factors)
}

/// Binary confusion matrix, positive class = risk present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_negative: u64,
    pub false_positive: u64,
    pub false_negative: u64,
    pub true_positive: u64,
}

impl ConfusionMatrix {
    /// Build from row-major `[[tn, fp], [fn, tp]]` (actual × predicted)
    pub fn from_rows(rows: [[u64; 2]; 2]) -> Self {
        Self {
            true_negative: rows[0][0],
            false_positive: rows[0][1],
            false_negative: rows[1][0],
            true_positive: rows[1][1],
        }
    }

    /// Sum of all four cells; `None` when it does not fit in a `u64`
    pub fn total(&self) -> Option<u64> {
        [self.false_positive, self.false_negative, self.true_positive]
            .into_iter()
            .try_fold(self.true_negative, u64::checked_add)
    }
}

/// Standard binary classification metrics, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub specificity: f64,
    pub f1_score: f64,
}

fn ratio(numerator: u128, denominator: u128) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl PerformanceMetrics {
    /// Derive metrics from counts; an empty denominator yields 0.
    pub fn from_confusion(cm: &ConfusionMatrix) -> Self {
        // Widened so sums of arbitrary counts cannot overflow.
        let tn = u128::from(cm.true_negative);
        let fp = u128::from(cm.false_positive);
        let fn_ = u128::from(cm.false_negative);
        let tp = u128::from(cm.true_positive);

        let accuracy = ratio(tp + tn, tp + tn + fp + fn_);
        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let specificity = ratio(tn, tn + fp);
        let f1_score = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };

        Self {
            accuracy,
            precision,
            recall,
            specificity,
            f1_score,
        }
    }
}

/// Evaluation section of the analytics view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub confusion_matrix: ConfusionMatrix,
    pub metrics: PerformanceMetrics,
}

/// Everything the analytics view shows about the loaded model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub importance: ImportanceReport,
    pub evaluation: Option<EvaluationReport>,
}

/// Build the analytics report, substituting placeholders for missing capabilities.
pub fn analytics_report(classifier: &dyn Classifier) -> AnalyticsReport {
    let importance = match classifier.feature_importances().and_then(importance_ranking) {
        Some(factors) => ImportanceReport::Available { factors },
        None => ImportanceReport::Unavailable {
            message: IMPORTANCE_UNAVAILABLE.to_string(),
        },
    };

    let evaluation = classifier.evaluation().map(|cm| EvaluationReport {
        confusion_matrix: *cm,
        metrics: PerformanceMetrics::from_confusion(cm),
    });

    AnalyticsReport {
        importance,
        evaluation,
    }
}
