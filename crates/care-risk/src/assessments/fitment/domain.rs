use serde::{Deserialize, Serialize};

use crate::assessments::category::{serialize_label, RiskCategory};
use crate::assessments::features::{deserialize_flag, ensure_range, flag, AssessmentInput};
use crate::assessments::{AssessmentDomain, EvaluationError};

/// Clinical assessment of the resident seeking placement. Scores run 1 (worst) to 5 (best),
/// except medical complexity where 5 is the most complex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResidentNeeds {
    pub mobility_score: u8,
    pub cognitive_score: u8,
    pub adl_score: u8,
    pub nutrition_score: u8,
    pub medical_complexity_score: u8,
    #[serde(deserialize_with = "deserialize_flag")]
    pub requires_secured_unit: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub requires_bariatric_accommodation: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub requires_iv_therapy: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub requires_dialysis: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub requires_ventilator: bool,
}

/// Beds and clinical services the candidate facility can offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FacilityCapability {
    pub secured_unit_beds: u16,
    pub short_stay_beds: u16,
    pub bariatric_beds: u16,
    #[serde(deserialize_with = "deserialize_flag")]
    pub iv_therapy_available: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub dialysis_available: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub ventilator_available: bool,
}

/// Resident and facility records evaluated together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FitmentInput {
    pub resident: ResidentNeeds,
    pub facility: FacilityCapability,
}

impl AssessmentInput for FitmentInput {
    const DOMAIN: AssessmentDomain = AssessmentDomain::Fitment;
    const FIELDS: &'static [&'static str] = &[
        "mobility_score",
        "cognitive_score",
        "adl_score",
        "nutrition_score",
        "medical_complexity_score",
        "requires_secured_unit",
        "requires_bariatric_accommodation",
        "requires_iv_therapy",
        "requires_dialysis",
        "requires_ventilator",
        "secured_unit_beds",
        "short_stay_beds",
        "bariatric_beds",
        "iv_therapy_available",
        "dialysis_available",
        "ventilator_available",
    ];

    fn feature(&self, name: &str) -> Option<f64> {
        let resident = &self.resident;
        let facility = &self.facility;
        let value = match name {
            "mobility_score" => f64::from(resident.mobility_score),
            "cognitive_score" => f64::from(resident.cognitive_score),
            "adl_score" => f64::from(resident.adl_score),
            "nutrition_score" => f64::from(resident.nutrition_score),
            "medical_complexity_score" => f64::from(resident.medical_complexity_score),
            "requires_secured_unit" => flag(resident.requires_secured_unit),
            "requires_bariatric_accommodation" => flag(resident.requires_bariatric_accommodation),
            "requires_iv_therapy" => flag(resident.requires_iv_therapy),
            "requires_dialysis" => flag(resident.requires_dialysis),
            "requires_ventilator" => flag(resident.requires_ventilator),
            "secured_unit_beds" => f64::from(facility.secured_unit_beds),
            "short_stay_beds" => f64::from(facility.short_stay_beds),
            "bariatric_beds" => f64::from(facility.bariatric_beds),
            "iv_therapy_available" => flag(facility.iv_therapy_available),
            "dialysis_available" => flag(facility.dialysis_available),
            "ventilator_available" => flag(facility.ventilator_available),
            _ => return None,
        };
        Some(value)
    }

    fn validate(&self) -> Result<(), EvaluationError> {
        let resident = &self.resident;
        for (field, value) in [
            ("mobility_score", resident.mobility_score),
            ("cognitive_score", resident.cognitive_score),
            ("adl_score", resident.adl_score),
            ("nutrition_score", resident.nutrition_score),
            ("medical_complexity_score", resident.medical_complexity_score),
        ] {
            ensure_range(Self::DOMAIN, field, value, 1..=5)?;
        }
        Ok(())
    }
}

/// Placement suitability, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitmentCategory {
    PoorFit,
    GoodFit,
    ExcellentFit,
}

impl RiskCategory for FitmentCategory {
    const ORDERED: &'static [Self] = &[
        FitmentCategory::PoorFit,
        FitmentCategory::GoodFit,
        FitmentCategory::ExcellentFit,
    ];

    fn label(self) -> &'static str {
        match self {
            FitmentCategory::PoorFit => "Poor Fit - Not Recommended",
            FitmentCategory::GoodFit => "Good Fit - Consider Admission",
            FitmentCategory::ExcellentFit => "Excellent Fit - Highly Recommended",
        }
    }
}

/// Result of a fitment evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitmentEvaluation {
    pub fitment_score: f64,
    pub category: FitmentCategory,
    /// Admission recommendation, rendered as the category's label.
    #[serde(serialize_with = "serialize_label")]
    pub recommendation: FitmentCategory,
    pub reasoning: Vec<String>,
}
