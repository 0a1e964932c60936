use serde::{Deserialize, Serialize};

use crate::assessments::category::{serialize_label, RiskCategory};
use crate::assessments::features::{deserialize_flag, ensure_range, flag, AssessmentInput};
use crate::assessments::{AssessmentDomain, EvaluationError};

/// Mobility and clinical profile of one resident.
///
/// `gender` is encoded 0 (male) or 1 (female); vision impairment runs 0 (none) to 3 (severe).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FallRiskInput {
    pub age: u8,
    pub gender: u8,
    pub mobility_score: u8,
    pub balance_score: u8,
    pub cognitive_score: u8,
    pub medication_count: u8,
    pub fall_history: u8,
    pub vision_impairment: u8,
    #[serde(deserialize_with = "deserialize_flag")]
    pub incontinence: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub assistive_device: bool,
}

impl AssessmentInput for FallRiskInput {
    const DOMAIN: AssessmentDomain = AssessmentDomain::FallRisk;
    const FIELDS: &'static [&'static str] = &[
        "age",
        "gender",
        "mobility_score",
        "balance_score",
        "cognitive_score",
        "medication_count",
        "fall_history",
        "vision_impairment",
        "incontinence",
        "assistive_device",
    ];

    fn feature(&self, name: &str) -> Option<f64> {
        let value = match name {
            "age" => f64::from(self.age),
            "gender" => f64::from(self.gender),
            "mobility_score" => f64::from(self.mobility_score),
            "balance_score" => f64::from(self.balance_score),
            "cognitive_score" => f64::from(self.cognitive_score),
            "medication_count" => f64::from(self.medication_count),
            "fall_history" => f64::from(self.fall_history),
            "vision_impairment" => f64::from(self.vision_impairment),
            "incontinence" => flag(self.incontinence),
            "assistive_device" => flag(self.assistive_device),
            _ => return None,
        };
        Some(value)
    }

    fn validate(&self) -> Result<(), EvaluationError> {
        ensure_range(Self::DOMAIN, "age", self.age, 0..=120)?;
        ensure_range(Self::DOMAIN, "gender", self.gender, 0..=1)?;
        ensure_range(Self::DOMAIN, "mobility_score", self.mobility_score, 1..=5)?;
        ensure_range(Self::DOMAIN, "balance_score", self.balance_score, 1..=5)?;
        ensure_range(Self::DOMAIN, "cognitive_score", self.cognitive_score, 1..=5)?;
        ensure_range(Self::DOMAIN, "vision_impairment", self.vision_impairment, 0..=3)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallRiskLevel {
    Low,
    Medium,
    High,
}

impl RiskCategory for FallRiskLevel {
    const ORDERED: &'static [Self] = &[FallRiskLevel::Low, FallRiskLevel::Medium, FallRiskLevel::High];

    fn label(self) -> &'static str {
        match self {
            FallRiskLevel::Low => "Low Risk",
            FallRiskLevel::Medium => "Medium Risk",
            FallRiskLevel::High => "High Risk",
        }
    }
}

/// Result of a fall risk evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FallRiskEvaluation {
    pub risk_score: f64,
    #[serde(serialize_with = "serialize_label")]
    pub risk_level: FallRiskLevel,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
}
