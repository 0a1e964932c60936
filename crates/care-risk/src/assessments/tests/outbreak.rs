use super::common::*;

use chrono::NaiveDate;

use crate::assessments::{
    AssessmentDomain, EvaluationError, OutbreakEngine, OutbreakInput, OutbreakLevel,
    OutbreakThresholds,
};

fn engine() -> OutbreakEngine {
    let registry = reference_registry();
    OutbreakEngine::new(
        registry.slot(AssessmentDomain::Outbreak),
        &OutbreakThresholds::default(),
    )
    .expect("outbreak engine builds")
}

#[test]
fn sample_week_is_moderate_risk() {
    let evaluation = engine().evaluate(&outbreak_input()).expect("evaluation");

    assert_eq!(evaluation.risk_score, 51.0);
    assert_eq!(evaluation.risk_level, OutbreakLevel::Moderate);
    assert_eq!(evaluation.high_risk_weeks, vec![47, 49, 46]);
    assert_eq!(
        evaluation.key_factors,
        vec!["seasonal_risk", "previous_outbreaks", "staff_vaccination_rate"]
    );
    assert_eq!(
        evaluation.risk_factors,
        vec![
            "Target week falls within winter transmission season",
            "Elevated seasonal transmission risk",
            "Staff vaccination rate below 80%",
        ]
    );
    assert_eq!(
        evaluation.recommendations,
        vec![
            "Moderate outbreak risk detected. Review infection control procedures.",
            "Increase hand hygiene compliance monitoring.",
            "Ensure adequate PPE supplies are available.",
            "Consider screening visitors for symptoms during high-risk weeks.",
            "Increase staff vaccination rate to reduce outbreak risk.",
        ]
    );

    let json = serde_json::to_value(&evaluation).expect("serializes");
    assert_eq!(json["risk_level"], "Moderate Risk");
}

#[test]
fn seventy_is_high_risk() {
    let slot = stub_slot::<OutbreakInput>(Ok(fixed_prediction(70.0, None)));
    let engine = OutbreakEngine::new(slot, &OutbreakThresholds::default()).expect("builds");
    let evaluation = engine.evaluate(&outbreak_input()).expect("evaluation");
    assert_eq!(evaluation.risk_level, OutbreakLevel::High);
    assert_eq!(evaluation.recommendations.len(), 5);
}

#[test]
fn key_factors_fall_back_to_rules_without_importances() {
    let slot = stub_slot::<OutbreakInput>(Ok(fixed_prediction(30.0, None)));
    let engine = OutbreakEngine::new(slot, &OutbreakThresholds::default()).expect("builds");

    let mut input = outbreak_input();
    input.previous_outbreaks = true;
    input.resident_vaccination_rate = 60.0;
    let evaluation = engine.evaluate(&input).expect("evaluation");

    assert_eq!(evaluation.risk_level, OutbreakLevel::Low);
    assert_eq!(
        evaluation.key_factors,
        vec![
            "Target week falls within winter transmission season",
            "Elevated seasonal transmission risk",
            "Recent outbreak history at facility",
        ]
    );
    assert!(evaluation
        .recommendations
        .ends_with(&[
            "Increase staff vaccination rate to reduce outbreak risk.".to_string(),
            "Increase resident vaccination rate to reduce outbreak risk.".to_string(),
        ]));
}

#[test]
fn summer_week_has_no_high_risk_window() {
    let mut input = outbreak_input();
    input.week = 27;
    input.seasonal_risk = 0.2;
    input.staff_vaccination_rate = 95.0;
    let evaluation = engine().evaluate(&input).expect("evaluation");
    assert!(evaluation.high_risk_weeks.is_empty());
    assert!(evaluation.risk_factors.is_empty());
    assert_eq!(evaluation.risk_level, OutbreakLevel::Low);
}

#[test]
fn week_fifty_three_only_exists_in_long_years() {
    let mut input = outbreak_input();
    input.year = 2025;
    input.week = 53;
    assert!(matches!(
        engine().evaluate(&input),
        Err(EvaluationError::SchemaMismatch { .. })
    ));

    input.year = 2020;
    let evaluation = engine().evaluate(&input).expect("2020 has 53 ISO weeks");
    assert_eq!(evaluation.high_risk_weeks, vec![2, 52, 3]);
}

#[test]
fn rates_outside_their_ranges_are_rejected() {
    let engine = engine();
    let mut input = outbreak_input();
    input.staff_vaccination_rate = 120.0;
    assert!(engine.evaluate(&input).is_err());

    let mut input = outbreak_input();
    input.staff_turnover = f64::NAN;
    assert!(engine.evaluate(&input).is_err());
}

#[test]
fn at_date_targets_the_iso_week() {
    let date = NaiveDate::from_ymd_opt(2027, 1, 1).expect("valid date");
    let input = outbreak_input().at_date(date);
    assert_eq!((input.year, input.week), (2026, 53));
}
