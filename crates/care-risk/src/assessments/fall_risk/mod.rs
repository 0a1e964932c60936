//! Resident fall risk.

mod domain;
mod rules;

pub use domain::{FallRiskEvaluation, FallRiskInput, FallRiskLevel};

use std::sync::Arc;

use tracing::info;

use super::category::{CategoryBands, RiskCategory};
use super::config::FallRiskThresholds;
use super::features::{parse_input, AssessmentInput};
use super::rules::{RecommendationTable, RuleTable};
use super::scoring::{check_slot, score};
use super::EvaluationError;
use crate::predictor::PredictorSlot;

impl FallRiskInput {
    pub fn from_json(value: serde_json::Value) -> Result<Self, EvaluationError> {
        parse_input(value)
    }
}

pub struct FallRiskEngine {
    slot: Arc<PredictorSlot>,
    bands: CategoryBands<FallRiskLevel>,
    rules: RuleTable<FallRiskInput>,
    recommendations: RecommendationTable<FallRiskLevel>,
}

impl FallRiskEngine {
    pub fn new(
        slot: Arc<PredictorSlot>,
        thresholds: &FallRiskThresholds,
    ) -> Result<Self, EvaluationError> {
        check_slot::<FallRiskInput, FallRiskLevel>(&slot)?;
        let rules = rules::risk_factor_rules()?;
        let recommendations = rules::recommendation_table()?;
        recommendations.check_triggers(&rules)?;

        Ok(Self {
            slot,
            bands: CategoryBands::new(thresholds.cutoffs())?,
            rules,
            recommendations,
        })
    }

    pub fn bands(&self) -> &CategoryBands<FallRiskLevel> {
        &self.bands
    }

    pub fn explain(&self, input: &FallRiskInput) -> Vec<String> {
        self.rules.explain(input)
    }

    pub fn recommend(&self, level: FallRiskLevel, factors: &[String]) -> Vec<String> {
        self.recommendations.recommend(level, factors)
    }

    pub fn evaluate(&self, input: &FallRiskInput) -> Result<FallRiskEvaluation, EvaluationError> {
        input.validate()?;
        let scored = score(&self.slot, input)?;
        let risk_level = self
            .bands
            .resolve(FallRiskInput::DOMAIN, scored.score, scored.category)?;
        let risk_factors = self.explain(input);
        let recommendations = self.recommend(risk_level, &risk_factors);

        info!(
            score = scored.score,
            level = risk_level.label(),
            factors = risk_factors.len(),
            "evaluated fall risk"
        );

        Ok(FallRiskEvaluation {
            risk_score: scored.score,
            risk_level,
            risk_factors,
            recommendations,
        })
    }
}
