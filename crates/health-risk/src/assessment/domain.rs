use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Health outcome scored by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Condition {
    Diabetes,
    Hypertension,
    HeartDisease,
}

impl Condition {
    pub const fn ordered() -> [Self; 3] {
        [Self::Diabetes, Self::Hypertension, Self::HeartDisease]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Diabetes => "diabetes",
            Self::Hypertension => "hypertension",
            Self::HeartDisease => "heartDisease",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Diabetes => "Diabetes",
            Self::Hypertension => "Hypertension",
            Self::HeartDisease => "Heart Disease",
        }
    }
}

/// Scoring variant named after the algorithm it stands in for. Variants only
/// differ by the bias applied to the shared base risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModelVariant {
    Xgboost,
    RandomForest,
    DecisionTree,
    Svm,
    NaiveBayes,
}

impl ModelVariant {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Xgboost,
            Self::RandomForest,
            Self::DecisionTree,
            Self::Svm,
            Self::NaiveBayes,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xgboost => "xgboost",
            Self::RandomForest => "randomForest",
            Self::DecisionTree => "decisionTree",
            Self::Svm => "svm",
            Self::NaiveBayes => "naiveBayes",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Xgboost => "XGBoost",
            Self::RandomForest => "Random Forest",
            Self::DecisionTree => "Decision Tree",
            Self::Svm => "SVM",
            Self::NaiveBayes => "Naive Bayes",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SmokingStatus {
    No,
    Former,
    Occasional,
    Regular,
}

impl SmokingStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::No => "no",
            Self::Former => "former",
            Self::Occasional => "occasional",
            Self::Regular => "regular",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlcoholConsumption {
    None,
    Light,
    Moderate,
    Heavy,
}

impl AlcoholConsumption {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Heavy => "heavy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PhysicalActivity {
    Sedentary,
    Light,
    Moderate,
    Vigorous,
}

impl PhysicalActivity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Vigorous => "vigorous",
        }
    }
}

/// Family history as captured by the intake form. `Heart` is the form's label
/// for heart disease and is kept distinct from [`Condition::HeartDisease`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FamilyHistory {
    No,
    Diabetes,
    Hypertension,
    Heart,
    Multiple,
}

impl FamilyHistory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::No => "no",
            Self::Diabetes => "diabetes",
            Self::Hypertension => "hypertension",
            Self::Heart => "heart",
            Self::Multiple => "multiple",
        }
    }

    /// Whether this history counts toward the given condition. Matching is by
    /// label, so `heart` never matches `heartDisease`.
    pub fn matches(self, condition: Condition) -> bool {
        self == Self::Multiple || self.as_str() == condition.as_str()
    }
}

/// Raised when a label does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

fn parse_variant<T: Copy>(
    kind: &'static str,
    raw: &str,
    variants: &[T],
    name: fn(T) -> &'static str,
) -> Result<T, UnknownVariant> {
    variants
        .iter()
        .copied()
        .find(|variant| name(*variant) == raw)
        .ok_or_else(|| UnknownVariant {
            kind,
            value: raw.to_string(),
        })
}

impl FromStr for Condition {
    type Err = UnknownVariant;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_variant("condition", raw, &Self::ordered(), Self::as_str)
    }
}

impl FromStr for ModelVariant {
    type Err = UnknownVariant;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_variant("model", raw, &Self::ordered(), Self::as_str)
    }
}

impl FromStr for Gender {
    type Err = UnknownVariant;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_variant(
            "gender",
            raw,
            &[Self::Male, Self::Female, Self::Other],
            Self::as_str,
        )
    }
}

impl FromStr for SmokingStatus {
    type Err = UnknownVariant;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_variant(
            "smoking status",
            raw,
            &[Self::No, Self::Former, Self::Occasional, Self::Regular],
            Self::as_str,
        )
    }
}

impl FromStr for AlcoholConsumption {
    type Err = UnknownVariant;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_variant(
            "alcohol consumption",
            raw,
            &[Self::None, Self::Light, Self::Moderate, Self::Heavy],
            Self::as_str,
        )
    }
}

impl FromStr for PhysicalActivity {
    type Err = UnknownVariant;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_variant(
            "physical activity",
            raw,
            &[
                Self::Sedentary,
                Self::Light,
                Self::Moderate,
                Self::Vigorous,
            ],
            Self::as_str,
        )
    }
}

impl FromStr for FamilyHistory {
    type Err = UnknownVariant;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_variant(
            "family history",
            raw,
            &[
                Self::No,
                Self::Diabetes,
                Self::Hypertension,
                Self::Heart,
                Self::Multiple,
            ],
            Self::as_str,
        )
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully populated health profile accepted by the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthProfile {
    pub age: i32,
    pub gender: Gender,
    pub bmi: f64,
    pub blood_pressure_systolic: i32,
    pub blood_pressure_diastolic: i32,
    pub cholesterol_level: i32,
    pub glucose_level: i32,
    pub smoking_status: SmokingStatus,
    pub alcohol_consumption: AlcoholConsumption,
    pub physical_activity: PhysicalActivity,
    pub family_history: FamilyHistory,
}

impl Default for HealthProfile {
    /// Starting values of the intake form.
    fn default() -> Self {
        Self {
            age: 30,
            gender: Gender::Male,
            bmi: 25.0,
            blood_pressure_systolic: 120,
            blood_pressure_diastolic: 80,
            cholesterol_level: 200,
            glucose_level: 100,
            smoking_status: SmokingStatus::No,
            alcohol_consumption: AlcoholConsumption::Moderate,
            physical_activity: PhysicalActivity::Moderate,
            family_history: FamilyHistory::No,
        }
    }
}

/// Raw intake payload. Any field may be unset; blank strings count as unset
/// and numeric fields also accept numeric strings. Labels must match exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSubmission {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub age: Option<i32>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub gender: Option<Gender>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub bmi: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub blood_pressure_systolic: Option<i32>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub blood_pressure_diastolic: Option<i32>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub cholesterol_level: Option<i32>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub glucose_level: Option<i32>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub smoking_status: Option<SmokingStatus>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub alcohol_consumption: Option<AlcoholConsumption>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub physical_activity: Option<PhysicalActivity>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub family_history: Option<FamilyHistory>,
}

impl From<HealthProfile> for ProfileSubmission {
    fn from(profile: HealthProfile) -> Self {
        Self {
            age: Some(profile.age),
            gender: Some(profile.gender),
            bmi: Some(profile.bmi),
            blood_pressure_systolic: Some(profile.blood_pressure_systolic),
            blood_pressure_diastolic: Some(profile.blood_pressure_diastolic),
            cholesterol_level: Some(profile.cholesterol_level),
            glucose_level: Some(profile.glucose_level),
            smoking_status: Some(profile.smoking_status),
            alcohol_consumption: Some(profile.alcohol_consumption),
            physical_activity: Some(profile.physical_activity),
            family_history: Some(profile.family_history),
        }
    }
}

fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + DeserializeOwned,
    T::Err: fmt::Display,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    match raw {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(text) if text.trim().is_empty() => Ok(None),
        serde_json::Value::String(text) => text
            .parse::<T>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        other => serde_json::from_value(other)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
