//! Resident-to-facility placement fitment.

mod domain;
mod rules;

pub use domain::{FacilityCapability, FitmentCategory, FitmentEvaluation, FitmentInput, ResidentNeeds};

use std::sync::Arc;

use tracing::info;

use super::category::{CategoryBands, RiskCategory};
use super::config::FitmentThresholds;
use super::features::{parse_input, AssessmentInput};
use super::rules::RuleTable;
use super::scoring::{check_slot, score};
use super::EvaluationError;
use crate::predictor::PredictorSlot;

impl FitmentInput {
    pub fn from_json(value: serde_json::Value) -> Result<Self, EvaluationError> {
        parse_input(value)
    }
}

/// Scores a resident against a facility and explains the match.
pub struct FitmentEngine {
    slot: Arc<PredictorSlot>,
    bands: CategoryBands<FitmentCategory>,
    rules: RuleTable<FitmentInput>,
}

impl FitmentEngine {
    pub fn new(
        slot: Arc<PredictorSlot>,
        thresholds: &FitmentThresholds,
    ) -> Result<Self, EvaluationError> {
        check_slot::<FitmentInput, FitmentCategory>(&slot)?;
        Ok(Self {
            slot,
            bands: CategoryBands::new(thresholds.cutoffs())?,
            rules: rules::reasoning_rules()?,
        })
    }

    pub fn bands(&self) -> &CategoryBands<FitmentCategory> {
        &self.bands
    }

    pub fn explain(&self, input: &FitmentInput) -> Vec<String> {
        self.rules.explain(input)
    }

    pub fn evaluate(&self, input: &FitmentInput) -> Result<FitmentEvaluation, EvaluationError> {
        input.validate()?;
        let scored = score(&self.slot, input)?;
        let category = self
            .bands
            .resolve(FitmentInput::DOMAIN, scored.score, scored.category)?;
        let reasoning = self.explain(input);

        info!(
            score = scored.score,
            category = category.label(),
            reasons = reasoning.len(),
            "evaluated placement fitment"
        );

        Ok(FitmentEvaluation {
            fitment_score: scored.score,
            category,
            recommendation: category,
            reasoning,
        })
    }
}
