use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::service::AssessmentService;
use super::{AssessmentDomain, EvaluationError};
use crate::predictor::ArtifactError;

/// Router builder exposing the assessment and model-reload endpoints.
pub fn assessment_router(service: Arc<AssessmentService>) -> Router {
    Router::new()
        .route("/api/v1/assessments/fitment", post(fitment_handler))
        .route("/api/v1/assessments/fall-risk", post(fall_risk_handler))
        .route("/api/v1/assessments/outbreak", post(outbreak_handler))
        .route("/api/v1/models/reload", post(reload_handler))
        .with_state(service)
}

pub(crate) async fn fitment_handler(
    State(service): State<Arc<AssessmentService>>,
    axum::Json(payload): axum::Json<serde_json::Value>,
) -> Response {
    assess(&service, AssessmentDomain::Fitment, payload)
}

pub(crate) async fn fall_risk_handler(
    State(service): State<Arc<AssessmentService>>,
    axum::Json(payload): axum::Json<serde_json::Value>,
) -> Response {
    assess(&service, AssessmentDomain::FallRisk, payload)
}

pub(crate) async fn outbreak_handler(
    State(service): State<Arc<AssessmentService>>,
    axum::Json(payload): axum::Json<serde_json::Value>,
) -> Response {
    assess(&service, AssessmentDomain::Outbreak, payload)
}

pub(crate) async fn reload_handler(State(service): State<Arc<AssessmentService>>) -> Response {
    // Artifact reads are blocking file IO.
    let outcome = tokio::task::spawn_blocking(move || service.reload_models()).await;
    match outcome {
        Ok(Ok(domains)) => {
            let payload = json!({
                "reloaded": domains,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Ok(Err(error @ ArtifactError::SchemaChanged { .. })) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Ok(Err(other)) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
        Err(join_error) => {
            let payload = json!({
                "error": format!("model reload task failed: {join_error}"),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

fn assess(service: &AssessmentService, domain: AssessmentDomain, payload: serde_json::Value) -> Response {
    match service.assess(domain, payload) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => evaluation_error_response(&error),
    }
}

pub(crate) fn evaluation_error_status(error: &EvaluationError) -> StatusCode {
    match error {
        EvaluationError::SchemaMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        EvaluationError::PredictorUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        EvaluationError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn evaluation_error_response(error: &EvaluationError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (evaluation_error_status(error), axum::Json(payload)).into_response()
}
