use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::assessments::category::{serialize_label, RiskCategory};
use crate::assessments::features::{deserialize_flag, ensure_range, flag, AssessmentInput};
use crate::assessments::{AssessmentDomain, EvaluationError};

/// Facility snapshot for one ISO week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutbreakInput {
    pub year: i32,
    pub week: u8,
    pub staff_vaccination_rate: f64,
    pub resident_vaccination_rate: f64,
    pub seasonal_risk: f64,
    #[serde(deserialize_with = "deserialize_flag")]
    pub previous_outbreaks: bool,
    pub facility_size: u32,
    pub staff_turnover: f64,
}

impl OutbreakInput {
    /// Re-target the snapshot at the ISO week containing `date`.
    pub fn at_date(mut self, date: NaiveDate) -> Self {
        let iso = date.iso_week();
        self.year = iso.year();
        // ISO weeks never exceed 53.
        self.week = iso.week() as u8;
        self
    }
}

impl AssessmentInput for OutbreakInput {
    const DOMAIN: AssessmentDomain = AssessmentDomain::Outbreak;
    const FIELDS: &'static [&'static str] = &[
        "year",
        "week",
        "staff_vaccination_rate",
        "resident_vaccination_rate",
        "seasonal_risk",
        "previous_outbreaks",
        "facility_size",
        "staff_turnover",
    ];

    fn feature(&self, name: &str) -> Option<f64> {
        let value = match name {
            "year" => f64::from(self.year),
            "week" => f64::from(self.week),
            "staff_vaccination_rate" => self.staff_vaccination_rate,
            "resident_vaccination_rate" => self.resident_vaccination_rate,
            "seasonal_risk" => self.seasonal_risk,
            "previous_outbreaks" => flag(self.previous_outbreaks),
            "facility_size" => f64::from(self.facility_size),
            "staff_turnover" => self.staff_turnover,
            _ => return None,
        };
        Some(value)
    }

    fn validate(&self) -> Result<(), EvaluationError> {
        ensure_range(Self::DOMAIN, "week", self.week, 1..=53)?;
        if NaiveDate::from_isoywd_opt(self.year, u32::from(self.week), Weekday::Mon).is_none() {
            return Err(EvaluationError::schema(
                Self::DOMAIN,
                format!("{} has no ISO week {}", self.year, self.week),
            ));
        }
        ensure_range(
            Self::DOMAIN,
            "staff_vaccination_rate",
            self.staff_vaccination_rate,
            0.0..=100.0,
        )?;
        ensure_range(
            Self::DOMAIN,
            "resident_vaccination_rate",
            self.resident_vaccination_rate,
            0.0..=100.0,
        )?;
        ensure_range(Self::DOMAIN, "seasonal_risk", self.seasonal_risk, 0.0..=1.0)?;
        ensure_range(Self::DOMAIN, "staff_turnover", self.staff_turnover, 0.0..=1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutbreakLevel {
    Low,
    Moderate,
    High,
}

impl RiskCategory for OutbreakLevel {
    const ORDERED: &'static [Self] = &[OutbreakLevel::Low, OutbreakLevel::Moderate, OutbreakLevel::High];

    fn label(self) -> &'static str {
        match self {
            OutbreakLevel::Low => "Low Risk",
            OutbreakLevel::Moderate => "Moderate Risk",
            OutbreakLevel::High => "High Risk",
        }
    }
}

/// Result of an outbreak risk evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutbreakEvaluation {
    pub risk_score: f64,
    #[serde(serialize_with = "serialize_label")]
    pub risk_level: OutbreakLevel,
    pub high_risk_weeks: Vec<u8>,
    /// Up to three drivers of the score, most influential first.
    pub key_factors: Vec<String>,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
}
