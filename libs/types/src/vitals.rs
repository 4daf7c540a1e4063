//! Patient vital signs
//!
//! Raw inputs collected by the diagnostic form, the numeric domain of each
//! field, and the single-field edit (`VitalChange`) used to mutate them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

// ── Field domains ────────────────────────────────────────────────────────

pub const AGE_RANGE: RangeInclusive<u32> = 18..=100;
pub const HEIGHT_CM_RANGE: RangeInclusive<u32> = 100..=250;
pub const WEIGHT_KG_RANGE: RangeInclusive<u32> = 30..=200;
pub const SYSTOLIC_BP_RANGE: RangeInclusive<u32> = 80..=220;
pub const DIASTOLIC_BP_RANGE: RangeInclusive<u32> = 40..=140;
/// Ordinal lab marker scale: 1 normal, 2 above normal, 3 well above normal
pub const LAB_LEVEL_RANGE: RangeInclusive<u8> = 1..=3;

/// Biological sex as collected by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

/// Numeric coding of `Gender` inside the feature vector.
///
/// The coding must match the one the classifier was trained with. Only
/// `FemaleOneMaleTwo` is accepted by the engine; artifacts declaring the
/// other coding are refused at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenderEncoding {
    FemaleOneMaleTwo,
    MaleOneFemaleTwo,
}

impl GenderEncoding {
    /// Encoding used by every feature vector this crate assembles
    pub const ACTIVE: GenderEncoding = GenderEncoding::FemaleOneMaleTwo;

    pub fn code(self, gender: Gender) -> u8 {
        match (self, gender) {
            (GenderEncoding::FemaleOneMaleTwo, Gender::Female) => 1,
            (GenderEncoding::FemaleOneMaleTwo, Gender::Male) => 2,
            (GenderEncoding::MaleOneFemaleTwo, Gender::Male) => 1,
            (GenderEncoding::MaleOneFemaleTwo, Gender::Female) => 2,
        }
    }
}

impl fmt::Display for GenderEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenderEncoding::FemaleOneMaleTwo => write!(f, "female_one_male_two"),
            GenderEncoding::MaleOneFemaleTwo => write!(f, "male_one_female_two"),
        }
    }
}

/// Raw patient vitals as entered on the diagnostic form.
///
/// Values are not validated on construction; the risk engine's validator
/// checks every field against its domain before anything is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientVitals {
    pub age: u32,
    pub gender: Gender,
    pub height_cm: u32,
    pub weight_kg: u32,
    pub systolic_bp: u32,
    pub diastolic_bp: u32,
    pub cholesterol_level: u8,
    pub glucose_level: u8,
    pub is_active: bool,
    pub is_smoker: bool,
    pub uses_alcohol: bool,
}

impl Default for PatientVitals {
    /// Initial form values of a fresh session
    fn default() -> Self {
        Self {
            age: 50,
            gender: Gender::Female,
            height_cm: 175,
            weight_kg: 75,
            systolic_bp: 120,
            diastolic_bp: 80,
            cholesterol_level: 1,
            glucose_level: 1,
            is_active: true,
            is_smoker: false,
            uses_alcohol: false,
        }
    }
}

impl PatientVitals {
    /// Apply a single-field edit.
    ///
    /// Returns `true` if the stored value actually changed.
    pub fn apply(&mut self, change: VitalChange) -> bool {
        fn set<T: PartialEq>(slot: &mut T, value: T) -> bool {
            if *slot == value {
                false
            } else {
                *slot = value;
                true
            }
        }

        match change {
            VitalChange::Age(v) => set(&mut self.age, v),
            VitalChange::Gender(v) => set(&mut self.gender, v),
            VitalChange::HeightCm(v) => set(&mut self.height_cm, v),
            VitalChange::WeightKg(v) => set(&mut self.weight_kg, v),
            VitalChange::SystolicBp(v) => set(&mut self.systolic_bp, v),
            VitalChange::DiastolicBp(v) => set(&mut self.diastolic_bp, v),
            VitalChange::Cholesterol(v) => set(&mut self.cholesterol_level, v),
            VitalChange::Glucose(v) => set(&mut self.glucose_level, v),
            VitalChange::Active(v) => set(&mut self.is_active, v),
            VitalChange::Smoker(v) => set(&mut self.is_smoker, v),
            VitalChange::Alcohol(v) => set(&mut self.uses_alcohol, v),
        }
    }
}

/// Identifies one vital field, used in edits and validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalField {
    Age,
    Gender,
    HeightCm,
    WeightKg,
    SystolicBp,
    DiastolicBp,
    Cholesterol,
    Glucose,
    Active,
    Smoker,
    Alcohol,
}

impl fmt::Display for VitalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VitalField::Age => "age",
            VitalField::Gender => "gender",
            VitalField::HeightCm => "height_cm",
            VitalField::WeightKg => "weight_kg",
            VitalField::SystolicBp => "systolic_bp",
            VitalField::DiastolicBp => "diastolic_bp",
            VitalField::Cholesterol => "cholesterol",
            VitalField::Glucose => "glucose",
            VitalField::Active => "active",
            VitalField::Smoker => "smoker",
            VitalField::Alcohol => "alcohol",
        };
        f.write_str(name)
    }
}

/// A single widget edit: one field set to one new value.
///
/// Wire form: `{"field": "age", "value": 51}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum VitalChange {
    Age(u32),
    Gender(Gender),
    HeightCm(u32),
    WeightKg(u32),
    SystolicBp(u32),
    DiastolicBp(u32),
    Cholesterol(u8),
    Glucose(u8),
    Active(bool),
    Smoker(bool),
    Alcohol(bool),
}

impl VitalChange {
    pub fn field(&self) -> VitalField {
        match self {
            VitalChange::Age(_) => VitalField::Age,
            VitalChange::Gender(_) => VitalField::Gender,
            VitalChange::HeightCm(_) => VitalField::HeightCm,
            VitalChange::WeightKg(_) => VitalField::WeightKg,
            VitalChange::SystolicBp(_) => VitalField::SystolicBp,
            VitalChange::DiastolicBp(_) => VitalField::DiastolicBp,
            VitalChange::Cholesterol(_) => VitalField::Cholesterol,
            VitalChange::Glucose(_) => VitalField::Glucose,
            VitalChange::Active(_) => VitalField::Active,
            VitalChange::Smoker(_) => VitalField::Smoker,
            VitalChange::Alcohol(_) => VitalField::Alcohol,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vitals_match_form_defaults() {
        let v = PatientVitals::default();
        assert_eq!(v.age, 50);
        assert_eq!(v.gender, Gender::Female);
        assert_eq!(v.height_cm, 175);
        assert_eq!(v.weight_kg, 75);
        assert_eq!((v.systolic_bp, v.diastolic_bp), (120, 80));
        assert!(v.is_active);
        assert!(!v.is_smoker);
        assert!(!v.uses_alcohol);
    }

    #[test]
    fn test_gender_encoding_codes() {
        let active = GenderEncoding::ACTIVE;
        assert_eq!(active.code(Gender::Female), 1);
        assert_eq!(active.code(Gender::Male), 2);

        let flipped = GenderEncoding::MaleOneFemaleTwo;
        assert_eq!(flipped.code(Gender::Female), 2);
        assert_eq!(flipped.code(Gender::Male), 1);
    }

    #[test]
    fn test_apply_reports_change() {
        let mut v = PatientVitals::default();
        assert!(v.apply(VitalChange::Age(51)));
        assert_eq!(v.age, 51);
        assert!(!v.apply(VitalChange::Age(51)));
    }

    #[test]
    fn test_apply_boolean_fields() {
        let mut v = PatientVitals::default();
        assert!(v.apply(VitalChange::Smoker(true)));
        assert!(v.apply(VitalChange::Active(false)));
        assert!(v.is_smoker);
        assert!(!v.is_active);
    }

    #[test]
    fn test_change_wire_format() {
        let change: VitalChange =
            serde_json::from_str(r#"{"field":"systolic_bp","value":140}"#).unwrap();
        assert_eq!(change, VitalChange::SystolicBp(140));
        assert_eq!(change.field(), VitalField::SystolicBp);

        let change: VitalChange =
            serde_json::from_str(r#"{"field":"gender","value":"male"}"#).unwrap();
        assert_eq!(change, VitalChange::Gender(Gender::Male));
    }

    #[test]
    fn test_field_display() {
        assert_eq!(VitalField::HeightCm.to_string(), "height_cm");
        assert_eq!(VitalField::Cholesterol.to_string(), "cholesterol");
    }
}
