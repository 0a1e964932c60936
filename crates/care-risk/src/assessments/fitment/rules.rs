use super::domain::FitmentInput;
use crate::assessments::rules::{FactorRule, RuleTable};
use crate::assessments::EvaluationError;

/// Requirement/capability pairs first, then the resident's own assessment scores.
pub(crate) fn reasoning_rules() -> Result<RuleTable<FitmentInput>, EvaluationError> {
    RuleTable::new(vec![
        FactorRule::new(
            "Facility has secured unit beds available for resident's needs.",
            |input: &FitmentInput| {
                input.resident.requires_secured_unit && input.facility.secured_unit_beds > 0
            },
        ),
        FactorRule::new(
            "Facility lacks secured unit beds required by resident.",
            |input: &FitmentInput| {
                input.resident.requires_secured_unit && input.facility.secured_unit_beds == 0
            },
        ),
        FactorRule::new(
            "Facility has bariatric beds available for resident's needs.",
            |input: &FitmentInput| {
                input.resident.requires_bariatric_accommodation && input.facility.bariatric_beds > 0
            },
        ),
        FactorRule::new(
            "Facility lacks bariatric beds required by resident.",
            |input: &FitmentInput| {
                input.resident.requires_bariatric_accommodation
                    && input.facility.bariatric_beds == 0
            },
        ),
        FactorRule::new(
            "Facility provides IV therapy services required by resident.",
            |input: &FitmentInput| {
                input.resident.requires_iv_therapy && input.facility.iv_therapy_available
            },
        ),
        FactorRule::new(
            "Facility does not provide IV therapy services required by resident.",
            |input: &FitmentInput| {
                input.resident.requires_iv_therapy && !input.facility.iv_therapy_available
            },
        ),
        FactorRule::new(
            "Facility provides dialysis services required by resident.",
            |input: &FitmentInput| {
                input.resident.requires_dialysis && input.facility.dialysis_available
            },
        ),
        FactorRule::new(
            "Facility does not provide dialysis services required by resident.",
            |input: &FitmentInput| {
                input.resident.requires_dialysis && !input.facility.dialysis_available
            },
        ),
        FactorRule::new(
            "Facility provides ventilator support required by resident.",
            |input: &FitmentInput| {
                input.resident.requires_ventilator && input.facility.ventilator_available
            },
        ),
        FactorRule::new(
            "Facility does not provide ventilator support required by resident.",
            |input: &FitmentInput| {
                input.resident.requires_ventilator && !input.facility.ventilator_available
            },
        ),
        FactorRule::new(
            "Resident has low mobility score, requiring significant assistance.",
            |input: &FitmentInput| input.resident.mobility_score <= 2,
        ),
        FactorRule::new(
            "Resident has low cognitive score, requiring memory care services.",
            |input: &FitmentInput| input.resident.cognitive_score <= 2,
        ),
        FactorRule::new(
            "Resident has high medical complexity, requiring advanced clinical care.",
            |input: &FitmentInput| input.resident.medical_complexity_score >= 4,
        ),
    ])
}
