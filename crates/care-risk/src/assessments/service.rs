use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::config::ScoringConfig;
use super::fall_risk::{FallRiskEngine, FallRiskEvaluation, FallRiskInput};
use super::fitment::{FitmentEngine, FitmentEvaluation, FitmentInput};
use super::outbreak::{OutbreakEngine, OutbreakEvaluation, OutbreakInput};
use super::{AssessmentDomain, EvaluationError};
use crate::predictor::{ArtifactError, ModelRegistry};

/// Service composing the three assessment engines over a shared model registry.
pub struct AssessmentService {
    registry: Arc<ModelRegistry>,
    fitment: FitmentEngine,
    fall_risk: FallRiskEngine,
    outbreak: OutbreakEngine,
}

/// Evaluation result for whichever domain was requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AssessmentReport {
    Fitment(FitmentEvaluation),
    FallRisk(FallRiskEvaluation),
    Outbreak(OutbreakEvaluation),
}

impl AssessmentService {
    pub fn new(registry: Arc<ModelRegistry>, config: &ScoringConfig) -> Result<Self, EvaluationError> {
        config.validate()?;
        let fitment = FitmentEngine::new(registry.slot(AssessmentDomain::Fitment), &config.fitment)?;
        let fall_risk =
            FallRiskEngine::new(registry.slot(AssessmentDomain::FallRisk), &config.fall_risk)?;
        let outbreak =
            OutbreakEngine::new(registry.slot(AssessmentDomain::Outbreak), &config.outbreak)?;

        Ok(Self {
            registry,
            fitment,
            fall_risk,
            outbreak,
        })
    }

    pub fn fitment(&self) -> &FitmentEngine {
        &self.fitment
    }

    pub fn fall_risk(&self) -> &FallRiskEngine {
        &self.fall_risk
    }

    pub fn outbreak(&self) -> &OutbreakEngine {
        &self.outbreak
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn evaluate_fitment(&self, input: &FitmentInput) -> Result<FitmentEvaluation, EvaluationError> {
        self.fitment.evaluate(input)
    }

    pub fn evaluate_fall_risk(
        &self,
        input: &FallRiskInput,
    ) -> Result<FallRiskEvaluation, EvaluationError> {
        self.fall_risk.evaluate(input)
    }

    pub fn evaluate_outbreak(
        &self,
        input: &OutbreakInput,
    ) -> Result<OutbreakEvaluation, EvaluationError> {
        self.outbreak.evaluate(input)
    }

    /// Parse an untyped payload for `domain` and evaluate it.
    pub fn assess(
        &self,
        domain: AssessmentDomain,
        payload: serde_json::Value,
    ) -> Result<AssessmentReport, EvaluationError> {
        match domain {
            AssessmentDomain::Fitment => {
                let input = FitmentInput::from_json(payload)?;
                self.evaluate_fitment(&input).map(AssessmentReport::Fitment)
            }
            AssessmentDomain::FallRisk => {
                let input = FallRiskInput::from_json(payload)?;
                self.evaluate_fall_risk(&input).map(AssessmentReport::FallRisk)
            }
            AssessmentDomain::Outbreak => {
                let input = OutbreakInput::from_json(payload)?;
                self.evaluate_outbreak(&input).map(AssessmentReport::Outbreak)
            }
        }
    }

    /// Reload every predictor artifact from the registry's source.
    ///
    /// Schemas cannot change on reload, so the engines built at startup stay valid.
    pub fn reload_models(&self) -> Result<Vec<AssessmentDomain>, ArtifactError> {
        match self.registry.reload() {
            Ok(domains) => {
                info!(count = domains.len(), "reloaded predictor artifacts");
                Ok(domains)
            }
            Err(err) => {
                warn!(error = %err, "predictor reload rejected; keeping current models");
                Err(err)
            }
        }
    }
}
