use super::domain::{FallRiskInput, FallRiskLevel};
use crate::assessments::rules::{FactorRule, FactorTrigger, RecommendationTable, RuleTable};
use crate::assessments::EvaluationError;

pub(crate) fn risk_factor_rules() -> Result<RuleTable<FallRiskInput>, EvaluationError> {
    RuleTable::new(vec![
        FactorRule::new("Advanced age (85+)", |input: &FallRiskInput| input.age >= 85),
        FactorRule::new("Severely impaired mobility", |input: &FallRiskInput| {
            input.mobility_score <= 2
        }),
        FactorRule::new("Moderately impaired mobility", |input: &FallRiskInput| {
            input.mobility_score == 3
        }),
        FactorRule::new("Poor balance", |input: &FallRiskInput| input.balance_score <= 2),
        FactorRule::new("Cognitive impairment", |input: &FallRiskInput| {
            input.cognitive_score <= 3
        }),
        FactorRule::new("Polypharmacy (8+ medications)", |input: &FallRiskInput| {
            input.medication_count >= 8
        }),
        FactorRule::new("History of multiple falls", |input: &FallRiskInput| {
            input.fall_history >= 2
        }),
        FactorRule::new("History of one fall", |input: &FallRiskInput| {
            input.fall_history == 1
        }),
        FactorRule::new("Significant vision impairment", |input: &FallRiskInput| {
            input.vision_impairment >= 2
        }),
        FactorRule::new("Incontinence", |input: &FallRiskInput| input.incontinence),
        FactorRule::new("Not using assistive device", |input: &FallRiskInput| {
            !input.assistive_device
        }),
    ])
}

fn base_recommendations(level: FallRiskLevel) -> &'static [&'static str] {
    match level {
        FallRiskLevel::High => &[
            "Implement comprehensive fall prevention plan",
            "Consider bed/chair alarms",
            "Increase supervision during transfers and ambulation",
            "Physical therapy evaluation for strengthening exercises",
            "Review and optimize medication regimen",
            "Consider hip protectors",
        ],
        FallRiskLevel::Medium => &[
            "Regular balance and strength exercises",
            "Ensure proper footwear",
            "Review medications for fall risk",
            "Ensure assistive devices are properly fitted and used",
            "Environmental modifications to reduce hazards",
        ],
        FallRiskLevel::Low => &[
            "Maintain physical activity",
            "Regular vision and hearing checks",
            "Maintain safe environment",
        ],
    }
}

pub(crate) fn recommendation_table() -> Result<RecommendationTable<FallRiskLevel>, EvaluationError>
{
    RecommendationTable::new(
        base_recommendations,
        vec![
            FactorTrigger::new("Poor balance", "Balance training exercises with physical therapy"),
            FactorTrigger::new(
                "Cognitive impairment",
                "Simplified environment with clear visual cues",
            ),
            FactorTrigger::new(
                "Polypharmacy",
                "Medication review to eliminate unnecessary prescriptions",
            ),
            FactorTrigger::new(
                "Significant vision impairment",
                "Improve lighting and use high-contrast visual cues",
            ),
            FactorTrigger::new("Incontinence", "Scheduled toileting program"),
        ],
    )
}
