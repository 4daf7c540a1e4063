//! Risk Engine
//!
//! Maps raw patient vitals to a fixed-order feature vector, runs the
//! classifier, and owns the per-session state machine that decides when an
//! assessment may be computed, shown, or must be discarded.
//!
//! Provides input validation, feature engineering, the classifier
//! capability and its random-forest artifact, session transitions, and the
//! model analytics shown next to the diagnostic view.

pub mod features;
pub mod validator;
pub mod classifier;
pub mod forest;
pub mod analytics;
pub mod events;
pub mod session;
pub mod engine;
