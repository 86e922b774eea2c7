use std::fmt;

use serde::Serialize;

use super::domain::{HealthProfile, ProfileSubmission};

/// Validation errors raised before a profile may be scored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

impl ValidationError {
    pub const fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField(field) => field,
        }
    }
}

/// Expected bounds for a numeric field, as hinted by the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldRange {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
}

impl FieldRange {
    pub const fn new(field: &'static str, min: f64, max: f64) -> Self {
        Self { field, min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const INPUT_RANGES: [FieldRange; 6] = [
    FieldRange::new("age", 18.0, 100.0),
    FieldRange::new("bmi", 15.0, 45.0),
    FieldRange::new("bloodPressureSystolic", 80.0, 200.0),
    FieldRange::new("bloodPressureDiastolic", 40.0, 130.0),
    FieldRange::new("cholesterolLevel", 100.0, 500.0),
    FieldRange::new("glucoseLevel", 70.0, 300.0),
];

/// Informational note for a value outside its expected range. Advisories never
/// block scoring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeAdvisory {
    pub field: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl fmt::Display for RangeAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} outside expected range {}-{}",
            self.field, self.value, self.min, self.max
        )
    }
}

/// Guard responsible for producing `HealthProfile` instances from raw submissions.
#[derive(Debug, Clone, Default)]
pub struct ProfileValidator;

impl ProfileValidator {
    pub fn new() -> Self {
        Self
    }

    /// Require every field to be present. Values are passed through unchanged;
    /// out-of-range numbers are accepted.
    pub fn validate(&self, submission: ProfileSubmission) -> Result<HealthProfile, ValidationError> {
        Ok(HealthProfile {
            age: required(submission.age, "age")?,
            gender: required(submission.gender, "gender")?,
            bmi: required(submission.bmi, "bmi")?,
            blood_pressure_systolic: required(
                submission.blood_pressure_systolic,
                "bloodPressureSystolic",
            )?,
            blood_pressure_diastolic: required(
                submission.blood_pressure_diastolic,
                "bloodPressureDiastolic",
            )?,
            cholesterol_level: required(submission.cholesterol_level, "cholesterolLevel")?,
            glucose_level: required(submission.glucose_level, "glucoseLevel")?,
            smoking_status: required(submission.smoking_status, "smokingStatus")?,
            alcohol_consumption: required(submission.alcohol_consumption, "alcoholConsumption")?,
            physical_activity: required(submission.physical_activity, "physicalActivity")?,
            family_history: required(submission.family_history, "familyHistory")?,
        })
    }

    /// Fields whose values fall outside the intake form's hinted ranges.
    pub fn range_advisories(&self, profile: &HealthProfile) -> Vec<RangeAdvisory> {
        let values = [
            f64::from(profile.age),
            profile.bmi,
            f64::from(profile.blood_pressure_systolic),
            f64::from(profile.blood_pressure_diastolic),
            f64::from(profile.cholesterol_level),
            f64::from(profile.glucose_level),
        ];

        INPUT_RANGES
            .iter()
            .zip(values)
            .filter(|(range, value)| !range.contains(*value))
            .map(|(range, value)| RangeAdvisory {
                field: range.field,
                value,
                min: range.min,
                max: range.max,
            })
            .collect()
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::MissingField(field))
}
