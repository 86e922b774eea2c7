mod config;
mod rules;

pub use config::{ModelBiasTable, ScoringConfig};

use super::domain::{Condition, HealthProfile};
use serde::{Deserialize, Serialize};

/// Stateless evaluator mapping a profile and condition to an additive base risk.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskFactorEvaluator;

impl RiskFactorEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Unclamped base risk for one condition.
    pub fn base_risk(&self, profile: &HealthProfile, condition: Condition) -> f64 {
        self.evaluate(profile, condition).base_risk
    }

    pub fn evaluate(&self, profile: &HealthProfile, condition: Condition) -> FactorBreakdown {
        let contributions = rules::score_factors(profile, condition);
        let base_risk = contributions
            .iter()
            .fold(0.0, |total, contribution| total + contribution.weight);

        FactorBreakdown {
            condition,
            base_risk,
            contributions,
        }
    }
}

/// Risk factor categories reported in a breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactorKind {
    Age,
    Bmi,
    BloodPressure,
    Cholesterol,
    Glucose,
    Smoking,
    Alcohol,
    PhysicalActivity,
    FamilyHistory,
    ConditionSpecific,
}

/// Discrete contribution to a base risk, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorContribution {
    pub factor: RiskFactorKind,
    pub weight: f64,
    pub notes: String,
}

/// Base risk for one condition together with the factors that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorBreakdown {
    pub condition: Condition,
    pub base_risk: f64,
    pub contributions: Vec<FactorContribution>,
}
