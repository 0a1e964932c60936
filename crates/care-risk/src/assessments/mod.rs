//! Assessment engines for placement fitment, fall risk, and outbreak risk.
//!
//! Every engine runs the same pipeline over its own typed input: normalize the record into the
//! predictor's feature order, score it through a [`PredictorSlot`](crate::predictor::PredictorSlot)
//! snapshot, band the score into a closed category, then explain and recommend from fixed rule
//! tables that only look at the raw input.

pub mod batch;
pub(crate) mod category;
pub mod config;
mod domain;
mod error;
pub mod fall_risk;
pub(crate) mod features;
pub mod fitment;
pub mod outbreak;
pub mod router;
pub(crate) mod rules;
mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use batch::read_csv;
pub use category::{CategoryBands, RiskCategory};
pub use config::{FallRiskThresholds, FitmentThresholds, OutbreakThresholds, RiskWindow, ScoringConfig};
pub use domain::AssessmentDomain;
pub use error::EvaluationError;
pub use fall_risk::{FallRiskEngine, FallRiskEvaluation, FallRiskInput, FallRiskLevel};
pub use features::{normalize, parse_input, AssessmentInput};
pub use fitment::{
    FacilityCapability, FitmentCategory, FitmentEngine, FitmentEvaluation, FitmentInput,
    ResidentNeeds,
};
pub use outbreak::{OutbreakEngine, OutbreakEvaluation, OutbreakInput, OutbreakLevel};
pub use router::assessment_router;
pub use rules::{FactorRule, FactorTrigger, RecommendationTable, RuleTable};
pub use service::{AssessmentReport, AssessmentService};
