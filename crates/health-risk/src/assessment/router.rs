use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use super::aggregate::AssessmentReport;
use super::domain::{Condition, ModelVariant, ProfileSubmission};
use super::jitter::JitterSource;
use super::service::{AssessmentServiceError, RiskAssessmentService};

/// Router builder exposing HTTP endpoints for risk assessments.
pub fn assessment_router<J>(service: Arc<RiskAssessmentService<J>>) -> Router
where
    J: JitterSource + 'static,
{
    Router::new()
        .route("/api/v1/assessments", post(assess_handler::<J>))
        .route(
            "/api/v1/assessments/:condition",
            post(assess_condition_handler::<J>),
        )
        .route("/api/v1/models", get(models_handler::<J>))
        .with_state(service)
}

/// Report payload stamped with the time the assessment ran.
#[derive(Debug, Serialize)]
pub struct AssessmentResponse {
    pub assessed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub report: AssessmentReport,
}

#[derive(Debug, Serialize)]
struct ModelBiasView {
    model: ModelVariant,
    label: &'static str,
    bias: f64,
}

pub(crate) async fn assess_handler<J>(
    State(service): State<Arc<RiskAssessmentService<J>>>,
    payload: Result<axum::Json<ProfileSubmission>, JsonRejection>,
) -> Response
where
    J: JitterSource + 'static,
{
    let submission = match payload {
        Ok(axum::Json(submission)) => submission,
        Err(rejection) => return rejection_response(rejection),
    };

    report_response(service.assess(submission))
}

pub(crate) async fn assess_condition_handler<J>(
    State(service): State<Arc<RiskAssessmentService<J>>>,
    Path(condition): Path<String>,
    payload: Result<axum::Json<ProfileSubmission>, JsonRejection>,
) -> Response
where
    J: JitterSource + 'static,
{
    let condition = match condition.parse::<Condition>() {
        Ok(condition) => condition,
        Err(error) => {
            let body = json!({
                "error": error.to_string(),
            });
            return (StatusCode::NOT_FOUND, axum::Json(body)).into_response();
        }
    };

    let submission = match payload {
        Ok(axum::Json(submission)) => submission,
        Err(rejection) => return rejection_response(rejection),
    };

    report_response(service.assess_condition(submission, condition))
}

pub(crate) async fn models_handler<J>(
    State(service): State<Arc<RiskAssessmentService<J>>>,
) -> Response
where
    J: JitterSource + 'static,
{
    let models: Vec<ModelBiasView> = service
        .model_biases()
        .entries()
        .into_iter()
        .map(|(model, bias)| ModelBiasView {
            model,
            label: model.label(),
            bias,
        })
        .collect();

    (StatusCode::OK, axum::Json(json!({ "models": models }))).into_response()
}

/// Malformed bodies share the validation envelope; `field` is null because the
/// failing key is only known to the JSON decoder.
fn rejection_response(rejection: JsonRejection) -> Response {
    warn!(status = %rejection.status(), "rejected unreadable assessment body");
    let payload = json!({
        "error": rejection.body_text(),
        "field": null,
    });
    (rejection.status(), axum::Json(payload)).into_response()
}

fn report_response(result: Result<AssessmentReport, AssessmentServiceError>) -> Response {
    match result {
        Ok(report) => {
            let body = AssessmentResponse {
                assessed_at: Utc::now(),
                report,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(AssessmentServiceError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
                "field": error.field(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}
