//! Feature engineering
//!
//! Derived features and feature-vector assembly. All functions are pure.

use cardio_types::features::{Feature, FeatureVector, FEATURE_COUNT};
use cardio_types::vitals::{GenderEncoding, PatientVitals};

/// Body-mass index: `weight_kg / (height_cm / 100)²`
///
/// Height is never zero inside its domain, so no guard is applied here.
pub fn body_mass_index(weight_kg: u32, height_cm: u32) -> f64 {
    let height_m = f64::from(height_cm) / 100.0;
    f64::from(weight_kg) / (height_m * height_m)
}

/// Blood-pressure differential: `systolic - diastolic`, signed
pub fn bp_differential(systolic_bp: u32, diastolic_bp: u32) -> i32 {
    systolic_bp as i32 - diastolic_bp as i32
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Assemble the classifier input in training column order.
pub fn assemble(vitals: &PatientVitals, body_mass_index: f64, bp_differential: i32) -> FeatureVector {
    let mut values = [0.0; FEATURE_COUNT];
    values[Feature::Gender.index()] = f64::from(GenderEncoding::ACTIVE.code(vitals.gender));
    values[Feature::SystolicBp.index()] = f64::from(vitals.systolic_bp);
    values[Feature::DiastolicBp.index()] = f64::from(vitals.diastolic_bp);
    values[Feature::Cholesterol.index()] = f64::from(vitals.cholesterol_level);
    values[Feature::Glucose.index()] = f64::from(vitals.glucose_level);
    values[Feature::Smoker.index()] = flag(vitals.is_smoker);
    values[Feature::Alcohol.index()] = flag(vitals.uses_alcohol);
    values[Feature::Active.index()] = flag(vitals.is_active);
    values[Feature::Age.index()] = f64::from(vitals.age);
    values[Feature::BodyMassIndex.index()] = body_mass_index;
    values[Feature::BpDifferential.index()] = f64::from(bp_differential);
    FeatureVector::new(values)
}

/// Derive both engineered features and assemble the vector in one step.
pub fn feature_vector(vitals: &PatientVitals) -> FeatureVector {
    let bmi = body_mass_index(vitals.weight_kg, vitals.height_cm);
    let diff = bp_differential(vitals.systolic_bp, vitals.diastolic_bp);
    assemble(vitals, bmi, diff)
}
