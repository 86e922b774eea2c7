use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::assessment::domain::{
    AlcoholConsumption, FamilyHistory, Gender, HealthProfile, PhysicalActivity,
    ProfileSubmission, SmokingStatus,
};
use crate::assessment::evaluation::ScoringConfig;
use crate::assessment::jitter::FixedJitter;
use crate::assessment::scoring::RiskScorer;
use crate::assessment::service::RiskAssessmentService;
use crate::assessment::{assessment_router, RiskFactorEvaluator};

/// Middle-aged profile with a diabetes family history; every factor except
/// family history lands in its middle band.
pub(super) fn reference_profile() -> HealthProfile {
    HealthProfile {
        age: 45,
        gender: Gender::Female,
        bmi: 28.0,
        blood_pressure_systolic: 135,
        blood_pressure_diastolic: 88,
        cholesterol_level: 230,
        glucose_level: 115,
        smoking_status: SmokingStatus::Occasional,
        alcohol_consumption: AlcoholConsumption::Moderate,
        physical_activity: PhysicalActivity::Light,
        family_history: FamilyHistory::Diabetes,
    }
}

pub(super) fn low_risk_profile() -> HealthProfile {
    HealthProfile {
        age: 25,
        gender: Gender::Male,
        bmi: 22.0,
        blood_pressure_systolic: 110,
        blood_pressure_diastolic: 70,
        cholesterol_level: 180,
        glucose_level: 90,
        smoking_status: SmokingStatus::No,
        alcohol_consumption: AlcoholConsumption::None,
        physical_activity: PhysicalActivity::Vigorous,
        family_history: FamilyHistory::No,
    }
}

pub(super) fn high_risk_profile() -> HealthProfile {
    HealthProfile {
        age: 62,
        gender: Gender::Other,
        bmi: 35.5,
        blood_pressure_systolic: 160,
        blood_pressure_diastolic: 100,
        cholesterol_level: 260,
        glucose_level: 150,
        smoking_status: SmokingStatus::Regular,
        alcohol_consumption: AlcoholConsumption::Heavy,
        physical_activity: PhysicalActivity::Sedentary,
        family_history: FamilyHistory::Multiple,
    }
}

pub(super) fn reference_submission() -> ProfileSubmission {
    ProfileSubmission::from(reference_profile())
}

pub(super) fn evaluator() -> RiskFactorEvaluator {
    RiskFactorEvaluator::new()
}

pub(super) fn fixed_scorer(jitter: f64) -> RiskScorer<FixedJitter> {
    RiskScorer::new(ScoringConfig::standard(), FixedJitter(jitter))
}

pub(super) fn quiet_service() -> RiskAssessmentService<FixedJitter> {
    RiskAssessmentService::new(ScoringConfig::standard(), FixedJitter::none())
}

pub(super) fn quiet_router() -> axum::Router {
    assessment_router(Arc::new(quiet_service()))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
