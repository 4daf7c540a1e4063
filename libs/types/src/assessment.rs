//! Risk assessment output
//!
//! A `RiskAssessment` is produced exactly once per submission and carries
//! the vitals it was computed from, so a holder can always tell whether it
//! still describes the current form.

use crate::vitals::PatientVitals;
use serde::{Deserialize, Serialize};

/// Percentage above which risk is reported as high
pub const HIGH_RISK_THRESHOLD: f64 = 70.0;
/// Percentage above which risk is reported as elevated
pub const ELEVATED_RISK_THRESHOLD: f64 = 35.0;

/// Coarse bucket of the risk percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    /// risk <= 35%
    Low,
    /// 35% < risk <= 70%
    Elevated,
    /// risk > 70%
    High,
}

impl RiskBand {
    pub fn from_percentage(risk_probability: f64) -> Self {
        if risk_probability > HIGH_RISK_THRESHOLD {
            RiskBand::High
        } else if risk_probability > ELEVATED_RISK_THRESHOLD {
            RiskBand::Elevated
        } else {
            RiskBand::Low
        }
    }
}

/// Normalized radar-chart axes, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub age: f64,
    pub body_mass_index: f64,
    pub systolic_bp: f64,
    pub diastolic_bp: f64,
    pub cholesterol: f64,
}

impl RiskProfile {
    pub fn new(
        age: u32,
        body_mass_index: f64,
        systolic_bp: u32,
        diastolic_bp: u32,
        cholesterol_level: u8,
    ) -> Self {
        Self {
            age: f64::from(age) / 100.0,
            body_mass_index: (body_mass_index / 45.0).min(1.0),
            systolic_bp: (f64::from(systolic_bp) / 220.0).min(1.0),
            diastolic_bp: (f64::from(diastolic_bp) / 140.0).min(1.0),
            cholesterol: f64::from(cholesterol_level) / 3.0,
        }
    }

    /// Axis values in display order: age, BMI, systolic, diastolic, cholesterol
    pub fn axes(&self) -> [(&'static str, f64); 5] {
        [
            ("Age", self.age),
            ("BMI", self.body_mass_index),
            ("Systolic", self.systolic_bp),
            ("Diastolic", self.diastolic_bp),
            ("Cholesterol", self.cholesterol),
        ]
    }
}

/// Result of one risk computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Positive-class probability scaled to [0, 100]
    pub risk_probability: f64,
    pub band: RiskBand,
    pub body_mass_index: f64,
    /// Systolic minus diastolic; negative for inconsistent inputs
    pub bp_differential: i32,
    pub age: u32,
    pub systolic_bp: u32,
    pub diastolic_bp: u32,
    pub cholesterol_level: u8,
    pub profile: RiskProfile,
    /// Vitals at submission time
    pub vitals: PatientVitals,
}

impl RiskAssessment {
    pub fn new(
        vitals: PatientVitals,
        body_mass_index: f64,
        bp_differential: i32,
        risk_probability: f64,
    ) -> Self {
        Self {
            risk_probability,
            band: RiskBand::from_percentage(risk_probability),
            body_mass_index,
            bp_differential,
            age: vitals.age,
            systolic_bp: vitals.systolic_bp,
            diastolic_bp: vitals.diastolic_bp,
            cholesterol_level: vitals.cholesterol_level,
            profile: RiskProfile::new(
                vitals.age,
                body_mass_index,
                vitals.systolic_bp,
                vitals.diastolic_bp,
                vitals.cholesterol_level,
            ),
            vitals,
        }
    }

    /// Whether this assessment still describes `current`
    pub fn matches(&self, current: &PatientVitals) -> bool {
        self.vitals == *current
    }
}
