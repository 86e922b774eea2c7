use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{Condition, HealthProfile, ModelVariant};
use super::evaluation::{RiskFactorEvaluator, ScoringConfig};
use super::jitter::JitterSource;

/// Risk percentages keyed by condition then model, one decimal place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreMatrix {
    cells: BTreeMap<Condition, BTreeMap<ModelVariant, f64>>,
}

impl ScoreMatrix {
    pub fn get(&self, condition: Condition, model: ModelVariant) -> Option<f64> {
        self.cells
            .get(&condition)
            .and_then(|row| row.get(&model))
            .copied()
    }

    pub fn row(&self, condition: Condition) -> Option<&BTreeMap<ModelVariant, f64>> {
        self.cells.get(&condition)
    }

    pub fn conditions(&self) -> impl Iterator<Item = Condition> + '_ {
        self.cells.keys().copied()
    }

    /// Number of populated cells.
    pub fn len(&self) -> usize {
        self.cells.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert_row(&mut self, condition: Condition, row: BTreeMap<ModelVariant, f64>) {
        self.cells.insert(condition, row);
    }
}

/// Applies model bias, jitter and clamping on top of the factor evaluator.
pub struct RiskScorer<J> {
    evaluator: RiskFactorEvaluator,
    config: ScoringConfig,
    jitter: J,
}

impl<J> RiskScorer<J>
where
    J: JitterSource,
{
    pub fn new(config: ScoringConfig, jitter: J) -> Self {
        Self {
            evaluator: RiskFactorEvaluator::new(),
            config,
            jitter,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &RiskFactorEvaluator {
        &self.evaluator
    }

    /// Risk percentage for a single (condition, model) cell.
    pub fn score(&self, profile: &HealthProfile, condition: Condition, model: ModelVariant) -> f64 {
        let base = self.evaluator.base_risk(profile, condition);
        self.score_from_base(base, model)
    }

    /// Five-cell matrix for one condition; the base risk is evaluated once.
    pub fn score_condition(&self, profile: &HealthProfile, condition: Condition) -> ScoreMatrix {
        let mut matrix = ScoreMatrix::default();
        matrix.insert_row(condition, self.score_row(profile, condition));
        matrix
    }

    /// Full condition by model matrix.
    pub fn score_matrix(&self, profile: &HealthProfile) -> ScoreMatrix {
        let mut matrix = ScoreMatrix::default();
        for condition in Condition::ordered() {
            matrix.insert_row(condition, self.score_row(profile, condition));
        }
        matrix
    }

    fn score_row(
        &self,
        profile: &HealthProfile,
        condition: Condition,
    ) -> BTreeMap<ModelVariant, f64> {
        let base = self.evaluator.base_risk(profile, condition);
        ModelVariant::ordered()
            .into_iter()
            .map(|model| (model, self.score_from_base(base, model)))
            .collect()
    }

    fn score_from_base(&self, base: f64, model: ModelVariant) -> f64 {
        let biased = base * self.config.model_biases.bias(model);
        let raw = biased + self.jitter.draw(self.config.jitter_amplitude);
        let clamped = self.config.risk_floor.max(self.config.risk_ceiling.min(raw));
        round_to_tenth(clamped * 100.0)
    }
}

/// Round half away from zero to one decimal place.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
