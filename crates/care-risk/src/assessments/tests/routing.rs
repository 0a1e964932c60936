use super::common::*;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use crate::assessments::router::{
    evaluation_error_status, fall_risk_handler, outbreak_handler, reload_handler,
};
use crate::assessments::{
    assessment_router, AssessmentDomain, AssessmentService, EvaluationError, FallRiskInput,
    ScoringConfig,
};
use crate::predictor::{reference_artifact, ModelRegistry, ModelSource};

fn post_json(uri: &str, body: &serde_json::Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(body).expect("serializable payload"),
        ))
        .expect("request builds")
}

#[tokio::test]
async fn fall_risk_route_scores_payload() {
    let router = assessment_router(reference_service());

    let response = router
        .oneshot(post_json("/api/v1/assessments/fall-risk", &fall_risk_payload()))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["risk_score"], json!(59.4));
    assert_eq!(body["risk_level"], "Medium Risk");
    assert_eq!(body["risk_factors"].as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn fitment_route_renders_recommendation_label() {
    let router = assessment_router(reference_service());
    let payload = serde_json::to_value(fitment_input()).expect("serializable input");

    let response = router
        .oneshot(post_json("/api/v1/assessments/fitment", &payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["fitment_score"], json!(70.0));
    assert_eq!(body["recommendation"], "Good Fit - Consider Admission");
}

#[tokio::test]
async fn outbreak_handler_returns_high_risk_weeks() {
    let payload = serde_json::to_value(outbreak_input()).expect("serializable input");
    let response = outbreak_handler(State(reference_service()), axum::Json(payload)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["high_risk_weeks"], json!([47, 49, 46]));
    assert_eq!(body["risk_level"], "Moderate Risk");
}

#[tokio::test]
async fn fall_risk_handler_returns_unprocessable_for_unknown_field() {
    let mut payload = fall_risk_payload();
    payload["shoe_size"] = json!(9);

    let response = fall_risk_handler(State(reference_service()), axum::Json(payload)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("shoe_size"));
}

#[tokio::test]
async fn fall_risk_handler_returns_service_unavailable_on_predictor_failure() {
    let registry = Arc::new(ModelRegistry::reference().expect("reference models"));
    let slot = registry.slot(AssessmentDomain::FallRisk);
    let failing = stub_slot::<FallRiskInput>(Err("model store offline".to_string()));
    slot.replace(failing.current()).expect("same schema as reference");

    let service = Arc::new(
        AssessmentService::new(registry, &ScoringConfig::default()).expect("service builds"),
    );
    let response = fall_risk_handler(State(service), axum::Json(fall_risk_payload())).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn reload_route_lists_reloaded_domains() {
    let response = reload_handler(State(reference_service())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["reloaded"], json!(["fitment", "fall_risk", "outbreak"]));
}

#[tokio::test]
async fn reload_route_reports_schema_change_as_conflict() {
    let dir = std::env::temp_dir().join(format!("care-risk-route-reload-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp model dir");
    for domain in AssessmentDomain::ALL {
        let json = serde_json::to_vec(&reference_artifact(domain)).expect("artifact serializes");
        std::fs::write(dir.join(domain.artifact_file()), json).expect("artifact written");
    }
    let registry =
        Arc::new(ModelRegistry::load(ModelSource::Directory(dir.clone())).expect("directory loads"));
    let service = Arc::new(
        AssessmentService::new(registry, &ScoringConfig::default()).expect("service builds"),
    );

    let mut reordered = reference_artifact(AssessmentDomain::Outbreak);
    reordered.terms.swap(0, 1);
    std::fs::write(
        dir.join("outbreak.json"),
        serde_json::to_vec(&reordered).expect("artifact serializes"),
    )
    .expect("artifact rewritten");

    let response = reload_handler(State(service)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = read_json(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("outbreak"));

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn configuration_errors_map_to_internal_error() {
    assert_eq!(
        evaluation_error_status(&EvaluationError::Configuration("bad bands".to_string())),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}
