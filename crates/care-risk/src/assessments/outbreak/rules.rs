use super::domain::{OutbreakInput, OutbreakLevel};
use super::season::is_winter_week;
use crate::assessments::rules::{FactorRule, FactorTrigger, RecommendationTable, RuleTable};
use crate::assessments::EvaluationError;

pub(crate) fn risk_factor_rules() -> Result<RuleTable<OutbreakInput>, EvaluationError> {
    RuleTable::new(vec![
        FactorRule::new(
            "Target week falls within winter transmission season",
            |input: &OutbreakInput| is_winter_week(input.week),
        ),
        FactorRule::new("Elevated seasonal transmission risk", |input: &OutbreakInput| {
            input.seasonal_risk >= 0.6
        }),
        FactorRule::new("Recent outbreak history at facility", |input: &OutbreakInput| {
            input.previous_outbreaks
        }),
        FactorRule::new("Staff vaccination rate below 80%", |input: &OutbreakInput| {
            input.staff_vaccination_rate < 80.0
        }),
        FactorRule::new("Resident vaccination rate below 85%", |input: &OutbreakInput| {
            input.resident_vaccination_rate < 85.0
        }),
        FactorRule::new("High staff turnover", |input: &OutbreakInput| {
            input.staff_turnover >= 0.25
        }),
        FactorRule::new("Large resident population", |input: &OutbreakInput| {
            input.facility_size >= 150
        }),
    ])
}

fn base_recommendations(level: OutbreakLevel) -> &'static [&'static str] {
    match level {
        OutbreakLevel::High => &[
            "High outbreak risk detected. Implement full infection control protocols.",
            "Increase cleaning frequency in common areas and high-touch surfaces.",
            "Consider visitor restrictions during high-risk weeks.",
            "Ensure all staff are up-to-date on vaccinations.",
        ],
        OutbreakLevel::Moderate => &[
            "Moderate outbreak risk detected. Review infection control procedures.",
            "Increase hand hygiene compliance monitoring.",
            "Ensure adequate PPE supplies are available.",
            "Consider screening visitors for symptoms during high-risk weeks.",
        ],
        OutbreakLevel::Low => &[
            "Low outbreak risk detected. Maintain standard infection control practices.",
            "Continue regular staff education on infection prevention.",
            "Monitor for any early signs of infection among residents.",
        ],
    }
}

pub(crate) fn recommendation_table() -> Result<RecommendationTable<OutbreakLevel>, EvaluationError>
{
    RecommendationTable::new(
        base_recommendations,
        vec![
            FactorTrigger::new(
                "Staff vaccination rate below",
                "Increase staff vaccination rate to reduce outbreak risk.",
            ),
            FactorTrigger::new(
                "Resident vaccination rate below",
                "Increase resident vaccination rate to reduce outbreak risk.",
            ),
        ],
    )
}
