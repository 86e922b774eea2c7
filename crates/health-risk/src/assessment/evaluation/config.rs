use serde::{Deserialize, Serialize};

use super::super::domain::ModelVariant;

/// Multiplicative bias applied to the base risk for each model variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelBiasTable {
    pub xgboost: f64,
    pub random_forest: f64,
    pub decision_tree: f64,
    pub svm: f64,
    pub naive_bayes: f64,
}

impl ModelBiasTable {
    pub const fn standard() -> Self {
        Self {
            xgboost: 1.0,
            random_forest: 0.95,
            decision_tree: 1.1,
            svm: 0.9,
            naive_bayes: 1.05,
        }
    }

    pub const fn bias(&self, model: ModelVariant) -> f64 {
        match model {
            ModelVariant::Xgboost => self.xgboost,
            ModelVariant::RandomForest => self.random_forest,
            ModelVariant::DecisionTree => self.decision_tree,
            ModelVariant::Svm => self.svm,
            ModelVariant::NaiveBayes => self.naive_bayes,
        }
    }

    pub fn entries(&self) -> Vec<(ModelVariant, f64)> {
        ModelVariant::ordered()
            .into_iter()
            .map(|model| (model, self.bias(model)))
            .collect()
    }
}

impl Default for ModelBiasTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Scoring dials shared by every cell of a score matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub model_biases: ModelBiasTable,
    /// Jitter is drawn from `[-jitter_amplitude, jitter_amplitude)`.
    pub jitter_amplitude: f64,
    pub risk_floor: f64,
    pub risk_ceiling: f64,
}

impl ScoringConfig {
    pub const fn standard() -> Self {
        Self {
            model_biases: ModelBiasTable::standard(),
            jitter_amplitude: 0.10,
            risk_floor: 0.05,
            risk_ceiling: 0.95,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::standard()
    }
}
