//! Built-in artifacts used when no model directory is configured.
//!
//! Each one encodes the generating formula of its domain's training data directly, so the
//! service produces sensible scores before any fitted model has been deployed.

use super::linear::{GateTerm, LinearArtifact, LinearTerm};
use crate::assessments::AssessmentDomain;

pub fn reference_artifact(domain: AssessmentDomain) -> LinearArtifact {
    match domain {
        AssessmentDomain::Fitment => fitment(),
        AssessmentDomain::FallRisk => fall_risk(),
        AssessmentDomain::Outbreak => outbreak(),
    }
}

fn raw(feature: &str, weight: f64) -> LinearTerm {
    LinearTerm {
        feature: feature.to_string(),
        mean: 0.0,
        scale: 1.0,
        weight,
    }
}

/// Same contribution as [`raw`], expressed on a feature standardized by its typical spread so
/// reported importances are comparable across units.
fn spread(feature: &str, weight: f64, spread: f64) -> LinearTerm {
    LinearTerm {
        feature: feature.to_string(),
        mean: 0.0,
        scale: spread,
        weight: weight * spread,
    }
}

fn gate(requirement: &str, capability: &str, met: f64, unmet: f64) -> GateTerm {
    GateTerm {
        requirement: requirement.to_string(),
        capability: capability.to_string(),
        met,
        unmet,
    }
}

// (mobility + cognitive + adl + nutrition + (6 - medical_complexity)) / 5 * 20
fn fitment() -> LinearArtifact {
    LinearArtifact {
        name: "fitment-reference".to_string(),
        intercept: 24.0,
        terms: vec![
            raw("mobility_score", 4.0),
            raw("cognitive_score", 4.0),
            raw("adl_score", 4.0),
            raw("nutrition_score", 4.0),
            raw("medical_complexity_score", -4.0),
            raw("requires_secured_unit", 0.0),
            raw("requires_bariatric_accommodation", 0.0),
            raw("requires_iv_therapy", 0.0),
            raw("requires_dialysis", 0.0),
            raw("requires_ventilator", 0.0),
            raw("secured_unit_beds", 0.0),
            raw("short_stay_beds", 0.0),
            raw("bariatric_beds", 0.0),
            raw("iv_therapy_available", 0.0),
            raw("dialysis_available", 0.0),
            raw("ventilator_available", 0.0),
        ],
        gates: vec![
            gate("requires_secured_unit", "secured_unit_beds", 5.0, -20.0),
            gate("requires_bariatric_accommodation", "bariatric_beds", 5.0, -15.0),
            gate("requires_iv_therapy", "iv_therapy_available", 5.0, -15.0),
            gate("requires_dialysis", "dialysis_available", 5.0, -20.0),
            gate("requires_ventilator", "ventilator_available", 5.0, -25.0),
        ],
        category_cutoffs: Vec::new(),
        report_importances: false,
    }
}

// 100 * (0.15 * (age - 65) / 35 + 0.2 * (6 - mobility) / 5 + 0.2 * (6 - balance) / 5
//        + 0.1 * (6 - cognitive) / 5 + 0.1 * medications / 15 + 0.15 * falls / 4
//        + 0.05 * vision / 3 + 0.1 * incontinence + 0.1 * (1 - assistive_device))
fn fall_risk() -> LinearArtifact {
    let intercept =
        100.0 * (-0.15 * 65.0 / 35.0 + 0.2 * 6.0 / 5.0 + 0.2 * 6.0 / 5.0 + 0.1 * 6.0 / 5.0 + 0.1);

    LinearArtifact {
        name: "fall-risk-reference".to_string(),
        intercept,
        terms: vec![
            raw("age", 100.0 * 0.15 / 35.0),
            raw("gender", 0.0),
            raw("mobility_score", -100.0 * 0.2 / 5.0),
            raw("balance_score", -100.0 * 0.2 / 5.0),
            raw("cognitive_score", -100.0 * 0.1 / 5.0),
            raw("medication_count", 100.0 * 0.1 / 15.0),
            raw("fall_history", 100.0 * 0.15 / 4.0),
            raw("vision_impairment", 100.0 * 0.05 / 3.0),
            raw("incontinence", 10.0),
            raw("assistive_device", -10.0),
        ],
        gates: Vec::new(),
        category_cutoffs: Vec::new(),
        report_importances: false,
    }
}

// 100 * (0.4 * seasonal + 0.5 - (staff_vax + resident_vax) / 400 + 0.2 * previous
//        + 0.1 * size / 200 + 0.2 * turnover)
fn outbreak() -> LinearArtifact {
    LinearArtifact {
        name: "outbreak-reference".to_string(),
        intercept: 50.0,
        terms: vec![
            raw("year", 0.0),
            raw("week", 0.0),
            spread("staff_vaccination_rate", -0.25, 50.0),
            spread("resident_vaccination_rate", -0.25, 40.0),
            spread("seasonal_risk", 40.0, 0.9),
            spread("previous_outbreaks", 20.0, 1.0),
            spread("facility_size", 0.05, 180.0),
            spread("staff_turnover", 20.0, 0.35),
        ],
        gates: Vec::new(),
        category_cutoffs: Vec::new(),
        report_importances: true,
    }
}
