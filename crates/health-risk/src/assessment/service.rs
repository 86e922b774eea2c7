use std::sync::Arc;

use tracing::{debug, info, warn};

use super::aggregate::AssessmentReport;
use super::domain::{Condition, HealthProfile, ProfileSubmission};
use super::evaluation::{ModelBiasTable, ScoringConfig};
use super::jitter::JitterSource;
use super::scoring::{RiskScorer, ScoreMatrix};
use super::validation::{ProfileValidator, ValidationError};

/// Service composing the profile validator and the risk scorer.
pub struct RiskAssessmentService<J> {
    validator: Arc<ProfileValidator>,
    scorer: Arc<RiskScorer<J>>,
}

impl<J> RiskAssessmentService<J>
where
    J: JitterSource + 'static,
{
    pub fn new(config: ScoringConfig, jitter: J) -> Self {
        Self {
            validator: Arc::new(ProfileValidator::new()),
            scorer: Arc::new(RiskScorer::new(config, jitter)),
        }
    }

    pub fn model_biases(&self) -> &ModelBiasTable {
        &self.scorer.config().model_biases
    }

    /// Validate a submission and score it for every condition.
    pub fn assess(
        &self,
        submission: ProfileSubmission,
    ) -> Result<AssessmentReport, AssessmentServiceError> {
        let profile = self.admit(submission)?;
        let scores = self.scorer.score_matrix(&profile);
        Ok(self.report(&profile, scores))
    }

    /// Validate a submission and score it for a single condition.
    pub fn assess_condition(
        &self,
        submission: ProfileSubmission,
        condition: Condition,
    ) -> Result<AssessmentReport, AssessmentServiceError> {
        let profile = self.admit(submission)?;
        let scores = self.scorer.score_condition(&profile, condition);
        Ok(self.report(&profile, scores))
    }

    fn admit(&self, submission: ProfileSubmission) -> Result<HealthProfile, AssessmentServiceError> {
        match self.validator.validate(submission) {
            Ok(profile) => Ok(profile),
            Err(error) => {
                warn!(field = error.field(), "rejected incomplete health profile");
                Err(error.into())
            }
        }
    }

    fn report(&self, profile: &HealthProfile, scores: ScoreMatrix) -> AssessmentReport {
        let mut report = AssessmentReport::from_matrix(scores);

        for summary in &mut report.summaries {
            let breakdown = self.scorer.evaluator().evaluate(profile, summary.condition);
            debug!(
                condition = %summary.condition,
                base_risk = breakdown.base_risk,
                factors = breakdown.contributions.len(),
                "evaluated risk factors"
            );
            summary.factors = Some(breakdown);
        }

        let advisories = self.validator.range_advisories(profile);
        for advisory in &advisories {
            warn!(
                field = advisory.field,
                value = advisory.value,
                "profile value outside expected range"
            );
        }
        report.advisories = advisories.iter().map(ToString::to_string).collect();

        for summary in &report.summaries {
            info!(
                condition = %summary.condition,
                average_risk = summary.average_risk,
                risk_level = summary.risk_level.label(),
                "scored health risk"
            );
        }

        report
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
