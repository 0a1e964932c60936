//! Facility infection outbreak risk, including the seasonal high-risk window.

mod domain;
mod rules;
pub mod season;

pub use domain::{OutbreakEvaluation, OutbreakInput, OutbreakLevel};

use std::sync::Arc;

use tracing::info;

use super::category::{CategoryBands, RiskCategory};
use super::config::{OutbreakThresholds, RiskWindow};
use super::features::{parse_input, AssessmentInput};
use super::rules::{RecommendationTable, RuleTable};
use super::scoring::{check_slot, score};
use super::EvaluationError;
use crate::predictor::{FeatureImportance, PredictorSlot};

const KEY_FACTOR_LIMIT: usize = 3;

impl OutbreakInput {
    pub fn from_json(value: serde_json::Value) -> Result<Self, EvaluationError> {
        parse_input(value)
    }
}

pub struct OutbreakEngine {
    slot: Arc<PredictorSlot>,
    bands: CategoryBands<OutbreakLevel>,
    window: RiskWindow,
    rules: RuleTable<OutbreakInput>,
    recommendations: RecommendationTable<OutbreakLevel>,
}

impl OutbreakEngine {
    pub fn new(
        slot: Arc<PredictorSlot>,
        thresholds: &OutbreakThresholds,
    ) -> Result<Self, EvaluationError> {
        check_slot::<OutbreakInput, OutbreakLevel>(&slot)?;
        let rules = rules::risk_factor_rules()?;
        let recommendations = rules::recommendation_table()?;
        recommendations.check_triggers(&rules)?;

        Ok(Self {
            slot,
            bands: CategoryBands::new(thresholds.cutoffs())?,
            window: thresholds.risk_window,
            rules,
            recommendations,
        })
    }

    pub fn bands(&self) -> &CategoryBands<OutbreakLevel> {
        &self.bands
    }

    pub fn high_risk_weeks(&self, week: u8) -> Vec<u8> {
        season::rank_high_risk_weeks(week, &self.window)
    }

    pub fn explain(&self, input: &OutbreakInput) -> Vec<String> {
        self.rules.explain(input)
    }

    pub fn recommend(&self, level: OutbreakLevel, factors: &[String]) -> Vec<String> {
        self.recommendations.recommend(level, factors)
    }

    pub fn evaluate(&self, input: &OutbreakInput) -> Result<OutbreakEvaluation, EvaluationError> {
        input.validate()?;
        let scored = score(&self.slot, input)?;
        let risk_level = self
            .bands
            .resolve(OutbreakInput::DOMAIN, scored.score, scored.category)?;
        let risk_factors = self.explain(input);
        let recommendations = self.recommend(risk_level, &risk_factors);
        let key_factors = key_factors(&scored.importances, &risk_factors);
        let high_risk_weeks = self.high_risk_weeks(input.week);

        info!(
            year = input.year,
            week = input.week,
            score = scored.score,
            level = risk_level.label(),
            "evaluated outbreak risk"
        );

        Ok(OutbreakEvaluation {
            risk_score: scored.score,
            risk_level,
            high_risk_weeks,
            key_factors,
            risk_factors,
            recommendations,
        })
    }
}

/// Heaviest predictor importances, or the leading rule factors when the model reports none.
fn key_factors(importances: &[FeatureImportance], risk_factors: &[String]) -> Vec<String> {
    if importances.is_empty() {
        return risk_factors.iter().take(KEY_FACTOR_LIMIT).cloned().collect();
    }

    let mut ranked: Vec<&FeatureImportance> = importances.iter().collect();
    // Stable sort keeps schema order on ties.
    ranked.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    ranked
        .into_iter()
        .take(KEY_FACTOR_LIMIT)
        .map(|importance| importance.feature.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn importance(feature: &str, weight: f64) -> FeatureImportance {
        FeatureImportance {
            feature: feature.to_string(),
            weight,
        }
    }

    #[test]
    fn key_factors_prefer_importances_in_weight_order() {
        let importances = vec![
            importance("year", 0.0),
            importance("staff_turnover", 0.2),
            importance("seasonal_risk", 0.4),
            importance("facility_size", 0.2),
            importance("week", 0.1),
        ];
        assert_eq!(
            key_factors(&importances, &["ignored".to_string()]),
            vec!["seasonal_risk", "staff_turnover", "facility_size"]
        );
    }

    #[test]
    fn key_factors_fall_back_to_rule_factors() {
        let factors: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        assert_eq!(key_factors(&[], &factors), vec!["a", "b", "c"]);
        assert!(key_factors(&[], &[]).is_empty());
    }
}
