use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::EvaluationError;

/// Threshold bands and ranking dials for every assessment domain.
///
/// Every section falls back to its defaults, so a scoring file only needs the values it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    pub fitment: FitmentThresholds,
    pub fall_risk: FallRiskThresholds,
    pub outbreak: OutbreakThresholds,
}

impl ScoringConfig {
    pub fn from_path(path: &Path) -> Result<Self, EvaluationError> {
        let raw = fs::read_to_string(path).map_err(|err| {
            EvaluationError::Configuration(format!(
                "unable to read scoring config {}: {err}",
                path.display()
            ))
        })?;
        let config: ScoringConfig = serde_json::from_str(&raw).map_err(|err| {
            EvaluationError::Configuration(format!(
                "unable to parse scoring config {}: {err}",
                path.display()
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the risk window dials. Band cut-offs are validated when each engine builds them.
    pub fn validate(&self) -> Result<(), EvaluationError> {
        let window = &self.outbreak.risk_window;
        if window.radius > RiskWindow::MAX_RADIUS {
            return Err(EvaluationError::Configuration(format!(
                "risk window radius {} exceeds half the 52-week cycle",
                window.radius
            )));
        }
        if window.limit == 0 {
            return Err(EvaluationError::Configuration(
                "risk window limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FitmentThresholds {
    pub good_fit: f64,
    pub excellent_fit: f64,
}

impl Default for FitmentThresholds {
    fn default() -> Self {
        Self {
            good_fit: 60.0,
            excellent_fit: 80.0,
        }
    }
}

impl FitmentThresholds {
    pub fn cutoffs(&self) -> Vec<f64> {
        vec![self.good_fit, self.excellent_fit]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FallRiskThresholds {
    pub medium: f64,
    pub high: f64,
}

impl Default for FallRiskThresholds {
    fn default() -> Self {
        Self {
            medium: 30.0,
            high: 60.0,
        }
    }
}

impl FallRiskThresholds {
    pub fn cutoffs(&self) -> Vec<f64> {
        vec![self.medium, self.high]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutbreakThresholds {
    pub moderate: f64,
    pub high: f64,
    pub risk_window: RiskWindow,
}

impl Default for OutbreakThresholds {
    fn default() -> Self {
        Self {
            moderate: 40.0,
            high: 70.0,
            risk_window: RiskWindow::default(),
        }
    }
}

impl OutbreakThresholds {
    pub fn cutoffs(&self) -> Vec<f64> {
        vec![self.moderate, self.high]
    }
}

/// How far around the target week to look, and how many weeks to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RiskWindow {
    pub radius: u8,
    pub limit: usize,
}

impl RiskWindow {
    pub const MAX_RADIUS: u8 = 26;
}

impl Default for RiskWindow {
    fn default() -> Self {
        Self {
            radius: 4,
            limit: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_documents_keep_defaults() {
        let config: ScoringConfig =
            serde_json::from_str(r#"{ "fall_risk": { "high": 65 } }"#).expect("parses");
        assert_eq!(config.fall_risk.cutoffs(), vec![30.0, 65.0]);
        assert_eq!(config.fitment, FitmentThresholds::default());
        assert_eq!(config.outbreak.risk_window, RiskWindow::default());
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = serde_json::from_str::<ScoringConfig>(r#"{ "fall_risk": { "severe": 90 } }"#)
            .expect_err("unknown key");
        assert!(err.to_string().contains("severe"));
    }

    #[test]
    fn validate_checks_risk_window() {
        let mut config = ScoringConfig::default();
        assert!(config.validate().is_ok());

        config.outbreak.risk_window.radius = 30;
        assert!(config.validate().is_err());

        config.outbreak.risk_window = RiskWindow {
            radius: 4,
            limit: 0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn from_path_reports_missing_file() {
        let path = std::env::temp_dir().join("care-risk-no-such-scoring.json");
        let err = ScoringConfig::from_path(&path).expect_err("missing file");
        assert!(matches!(err, EvaluationError::Configuration(_)));
    }
}
