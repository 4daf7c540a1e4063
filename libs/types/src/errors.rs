//! Error types for the risk engine
//!
//! Comprehensive error taxonomy using thiserror

use crate::vitals::{GenderEncoding, VitalField};
use thiserror::Error;

/// Top-level engine error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    Vitals(#[from] VitalsError),

    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VitalsError {
    #[error("{field} out of range: {value} not in [{min}, {max}]")]
    OutOfRange {
        field: VitalField,
        value: i64,
        min: i64,
        max: i64,
    },
}

/// Classifier artifact and prediction errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifierError {
    #[error("Model artifact not found: {path}")]
    ArtifactMissing { path: String },

    #[error("Model artifact malformed: {reason}")]
    Malformed { reason: String },

    #[error("Feature count mismatch: expected {expected}, found {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("Feature order mismatch at position {index}: expected {expected}, found {found}")]
    FeatureOrderMismatch {
        index: usize,
        expected: String,
        found: String,
    },

    #[error("Gender encoding mismatch: expected {expected}, artifact uses {found}")]
    GenderEncodingMismatch {
        expected: GenderEncoding,
        found: GenderEncoding,
    },

    #[error("Invalid tree {tree}: {reason}")]
    InvalidTree { tree: usize, reason: String },

    #[error("Invalid probability: {value}")]
    InvalidProbability { value: f64 },
}

/// Session state machine errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Inputs are locked until the current assessment is cleared")]
    InputsLocked,

    #[error("Session not found: {session_id}")]
    NotFound { session_id: String },
}
