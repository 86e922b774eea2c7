use serde::{Deserialize, Serialize};

use super::domain::{Condition, ModelVariant};
use super::evaluation::FactorBreakdown;
use super::scoring::{round_to_tenth, ScoreMatrix};

/// Discrete classification of an averaged risk percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Moderate => "Moderate Risk",
            Self::High => "High Risk",
        }
    }
}

/// Accent band used for condition cards. The cut points differ from
/// [`RiskLevel`] and only drive presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityBand {
    Green,
    Yellow,
    Red,
}

impl SeverityBand {
    pub fn for_average(average: f64) -> Self {
        if average < 30.0 {
            Self::Green
        } else if average < 60.0 {
            Self::Yellow
        } else {
            Self::Red
        }
    }
}

/// Mean of the model scores recorded for `condition`, one decimal place.
/// Returns 0.0 when the matrix holds no row for the condition.
pub fn average(matrix: &ScoreMatrix, condition: Condition) -> f64 {
    let Some(row) = matrix.row(condition) else {
        return 0.0;
    };
    if row.is_empty() {
        return 0.0;
    }

    let sum: f64 = row.values().sum();
    round_to_tenth(sum / row.len() as f64)
}

pub fn classify(average_risk: f64) -> RiskLevel {
    if average_risk < 20.0 {
        RiskLevel::Low
    } else if average_risk < 50.0 {
        RiskLevel::Moderate
    } else {
        RiskLevel::High
    }
}

/// Chart entry for a single model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelScoreView {
    pub model: ModelVariant,
    pub label: &'static str,
    pub value: f64,
}

/// Per-condition roll-up rendered on result cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionSummary {
    pub condition: Condition,
    pub label: &'static str,
    pub average_risk: f64,
    pub risk_level: RiskLevel,
    pub risk_level_label: &'static str,
    pub severity: SeverityBand,
    pub model_scores: Vec<ModelScoreView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factors: Option<FactorBreakdown>,
}

impl ConditionSummary {
    pub fn from_matrix(matrix: &ScoreMatrix, condition: Condition) -> Self {
        let average_risk = average(matrix, condition);
        let risk_level = classify(average_risk);
        let model_scores = ModelVariant::ordered()
            .into_iter()
            .filter_map(|model| {
                matrix.get(condition, model).map(|value| ModelScoreView {
                    model,
                    label: model.label(),
                    value,
                })
            })
            .collect();

        Self {
            condition,
            label: condition.label(),
            average_risk,
            risk_level,
            risk_level_label: risk_level.label(),
            severity: SeverityBand::for_average(average_risk),
            model_scores,
            factors: None,
        }
    }
}

/// Scores and per-condition summaries produced by one assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentReport {
    pub scores: ScoreMatrix,
    pub summaries: Vec<ConditionSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub advisories: Vec<String>,
}

impl AssessmentReport {
    pub fn from_matrix(scores: ScoreMatrix) -> Self {
        let summaries = Condition::ordered()
            .into_iter()
            .filter(|condition| scores.row(*condition).is_some())
            .map(|condition| ConditionSummary::from_matrix(&scores, condition))
            .collect();

        Self {
            scores,
            summaries,
            advisories: Vec::new(),
        }
    }

    pub fn summary(&self, condition: Condition) -> Option<&ConditionSummary> {
        self.summaries
            .iter()
            .find(|summary| summary.condition == condition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_respects_boundaries() {
        assert_eq!(classify(19.9), RiskLevel::Low);
        assert_eq!(classify(20.0), RiskLevel::Moderate);
        assert_eq!(classify(49.9), RiskLevel::Moderate);
        assert_eq!(classify(50.0), RiskLevel::High);
    }

    #[test]
    fn severity_band_uses_card_cut_points() {
        assert_eq!(SeverityBand::for_average(29.9), SeverityBand::Green);
        assert_eq!(SeverityBand::for_average(30.0), SeverityBand::Yellow);
        assert_eq!(SeverityBand::for_average(59.9), SeverityBand::Yellow);
        assert_eq!(SeverityBand::for_average(60.0), SeverityBand::Red);
    }

    #[test]
    fn average_of_missing_condition_is_zero() {
        let matrix = ScoreMatrix::default();
        assert_eq!(average(&matrix, Condition::Diabetes), 0.0);
    }
}
