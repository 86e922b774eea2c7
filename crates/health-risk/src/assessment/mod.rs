//! Multi-model health risk assessment.
//!
//! A submission passes through the profile validator, the risk factor evaluator
//! produces a base risk per condition, and the scorer applies per-model bias,
//! jitter and clamping to fill the condition by model score matrix. The
//! aggregate module reduces each condition to an average and a risk level.

pub mod aggregate;
pub mod domain;
pub mod evaluation;
pub mod import;
pub mod jitter;
pub mod router;
pub mod scoring;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use aggregate::{
    average, classify, AssessmentReport, ConditionSummary, ModelScoreView, RiskLevel,
    SeverityBand,
};
pub use domain::{
    AlcoholConsumption, Condition, FamilyHistory, Gender, HealthProfile, ModelVariant,
    PhysicalActivity, ProfileSubmission, SmokingStatus, UnknownVariant,
};
pub use evaluation::{
    FactorBreakdown, FactorContribution, ModelBiasTable, RiskFactorEvaluator, RiskFactorKind,
    ScoringConfig,
};
pub use import::{ImportedProfile, ProfileBatch, ProfileImportError, ProfileImporter, RejectedRow};
pub use jitter::{ConfiguredJitter, EntropyJitter, FixedJitter, JitterSource, SeededJitter};
pub use router::{assessment_router, AssessmentResponse};
pub use scoring::{round_to_tenth, RiskScorer, ScoreMatrix};
pub use service::{AssessmentServiceError, RiskAssessmentService};
pub use validation::{FieldRange, ProfileValidator, RangeAdvisory, ValidationError, INPUT_RANGES};
