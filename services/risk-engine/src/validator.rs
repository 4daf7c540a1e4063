//! Input validation
//!
//! Checks vitals and single-field edits against their domains. The form
//! widgets clamp values on the client side; this layer makes the same
//! guarantee for anything that reaches the engine directly.

use cardio_types::errors::VitalsError;
use cardio_types::vitals::{
    PatientVitals, VitalChange, VitalField, AGE_RANGE, DIASTOLIC_BP_RANGE, HEIGHT_CM_RANGE,
    LAB_LEVEL_RANGE, SYSTOLIC_BP_RANGE, WEIGHT_KG_RANGE,
};
use std::ops::RangeInclusive;

fn check<T>(field: VitalField, value: T, range: &RangeInclusive<T>) -> Result<(), VitalsError>
where
    T: PartialOrd + Copy + Into<i64>,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(VitalsError::OutOfRange {
            field,
            value: value.into(),
            min: (*range.start()).into(),
            max: (*range.end()).into(),
        })
    }
}

/// Validate a single-field edit before it is applied.
///
/// Categorical and boolean fields are always in domain.
pub fn validate_change(change: &VitalChange) -> Result<(), VitalsError> {
    match *change {
        VitalChange::Age(v) => check(VitalField::Age, v, &AGE_RANGE),
        VitalChange::HeightCm(v) => check(VitalField::HeightCm, v, &HEIGHT_CM_RANGE),
        VitalChange::WeightKg(v) => check(VitalField::WeightKg, v, &WEIGHT_KG_RANGE),
        VitalChange::SystolicBp(v) => check(VitalField::SystolicBp, v, &SYSTOLIC_BP_RANGE),
        VitalChange::DiastolicBp(v) => check(VitalField::DiastolicBp, v, &DIASTOLIC_BP_RANGE),
        VitalChange::Cholesterol(v) => check(VitalField::Cholesterol, v, &LAB_LEVEL_RANGE),
        VitalChange::Glucose(v) => check(VitalField::Glucose, v, &LAB_LEVEL_RANGE),
        VitalChange::Gender(_)
        | VitalChange::Active(_)
        | VitalChange::Smoker(_)
        | VitalChange::Alcohol(_) => Ok(()),
    }
}

/// Validate a complete set of vitals.
///
/// Returns the first failing field, checked in form order.
/// Systolic below diastolic is accepted; the differential simply goes negative.
pub fn validate_vitals(vitals: &PatientVitals) -> Result<(), VitalsError> {
    check(VitalField::Age, vitals.age, &AGE_RANGE)?;
    check(VitalField::HeightCm, vitals.height_cm, &HEIGHT_CM_RANGE)?;
    check(VitalField::WeightKg, vitals.weight_kg, &WEIGHT_KG_RANGE)?;
    check(VitalField::SystolicBp, vitals.systolic_bp, &SYSTOLIC_BP_RANGE)?;
    check(VitalField::DiastolicBp, vitals.diastolic_bp, &DIASTOLIC_BP_RANGE)?;
    check(VitalField::Cholesterol, vitals.cholesterol_level, &LAB_LEVEL_RANGE)?;
    check(VitalField::Glucose, vitals.glucose_level, &LAB_LEVEL_RANGE)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vitals_pass() {
        assert_eq!(validate_vitals(&PatientVitals::default()), Ok(()));
    }

    #[test]
    fn test_domain_bounds_inclusive() {
        let low = PatientVitals {
            age: 18,
            height_cm: 100,
            weight_kg: 30,
            systolic_bp: 80,
            diastolic_bp: 40,
            ..PatientVitals::default()
        };
        let high = PatientVitals {
            age: 100,
            height_cm: 250,
            weight_kg: 200,
            systolic_bp: 220,
            diastolic_bp: 140,
            cholesterol_level: 3,
            glucose_level: 3,
            ..PatientVitals::default()
        };
        assert!(validate_vitals(&low).is_ok());
        assert!(validate_vitals(&high).is_ok());
    }

    #[test]
    fn test_zero_height_rejected() {
        let vitals = PatientVitals {
            height_cm: 0,
            ..PatientVitals::default()
        };
        let err = validate_vitals(&vitals).unwrap_err();
        assert_eq!(
            err,
            VitalsError::OutOfRange {
                field: VitalField::HeightCm,
                value: 0,
                min: 100,
                max: 250,
            }
        );
    }

    #[test]
    fn test_first_failing_field_reported() {
        let vitals = PatientVitals {
            age: 17,
            glucose_level: 9,
            ..PatientVitals::default()
        };
        match validate_vitals(&vitals) {
            Err(VitalsError::OutOfRange { field, .. }) => assert_eq!(field, VitalField::Age),
            other => panic!("Expected OutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_inverted_pressure_accepted() {
        let vitals = PatientVitals {
            systolic_bp: 90,
            diastolic_bp: 120,
            ..PatientVitals::default()
        };
        assert!(validate_vitals(&vitals).is_ok());
    }

    #[test]
    fn test_validate_change() {
        assert!(validate_change(&VitalChange::Age(51)).is_ok());
        assert!(validate_change(&VitalChange::Smoker(true)).is_ok());
        assert!(validate_change(&VitalChange::WeightKg(201)).is_err());
        assert!(validate_change(&VitalChange::Cholesterol(0)).is_err());
    }
}
