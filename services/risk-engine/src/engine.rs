//! Risk Engine — orchestrator
//!
//! Ties together validation, feature engineering, the classifier and the
//! analytics report. The engine itself is stateless; per-user state lives in
//! `SessionContext`.

use std::sync::Arc;

use cardio_types::assessment::RiskAssessment;
use cardio_types::errors::EngineError;
use cardio_types::ids::SessionId;
use cardio_types::vitals::PatientVitals;
use serde::{Deserialize, Serialize};

use crate::analytics::{self, AnalyticsReport};
use crate::classifier::{self, Classifier};
use crate::features;
use crate::session::{LockPolicy, NavigationPolicy, SessionContext};
use crate::validator;

/// Risk engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RiskEngineConfig {
    /// Input mutability while an assessment is held
    pub lock_policy: LockPolicy,
    /// Effect of leaving the diagnostic view
    pub navigation_policy: NavigationPolicy,
}

/// Risk engine service
#[derive(Debug, Clone)]
pub struct RiskEngine {
    config: RiskEngineConfig,
    classifier: Arc<dyn Classifier>,
}

impl RiskEngine {
    /// Create a new risk engine with default configuration
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            config: RiskEngineConfig::default(),
            classifier,
        }
    }

    /// Create a new risk engine with custom configuration
    pub fn with_config(classifier: Arc<dyn Classifier>, config: RiskEngineConfig) -> Self {
        Self { config, classifier }
    }

    pub fn config(&self) -> &RiskEngineConfig {
        &self.config
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    /// Compute a risk assessment from vitals.
    ///
    /// Steps, in order:
    /// 1. Validate every field against its domain
    /// 2. Derive body-mass index and blood-pressure differential
    /// 3. Assemble the fixed-order feature vector
    /// 4. Ask the classifier for the positive-class probability
    /// 5. Scale to a percentage
    pub fn compute(&self, vitals: &PatientVitals) -> Result<RiskAssessment, EngineError> {
        validator::validate_vitals(vitals)?;

        let bmi = features::body_mass_index(vitals.weight_kg, vitals.height_cm);
        let bp_diff = features::bp_differential(vitals.systolic_bp, vitals.diastolic_bp);
        let vector = features::assemble(vitals, bmi, bp_diff);

        let probability =
            classifier::check_probability(self.classifier.predict_probability(&vector)?)?;
        let risk_probability = probability * 100.0;

        tracing::debug!(
            features = ?vector.as_slice(),
            risk_probability,
            "Computed risk assessment"
        );

        Ok(RiskAssessment::new(*vitals, bmi, bp_diff, risk_probability))
    }

    /// Start a session governed by this engine's policies.
    pub fn new_session(&self, session_id: SessionId) -> SessionContext {
        SessionContext::new(session_id, &self.config)
    }

    /// Model analytics for the analytics view
    pub fn analytics(&self) -> AnalyticsReport {
        analytics::analytics_report(self.classifier.as_ref())
    }
}
