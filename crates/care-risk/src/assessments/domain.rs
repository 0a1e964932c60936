use std::fmt;

use serde::{Deserialize, Serialize};

/// The assessment families the engine scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentDomain {
    Fitment,
    FallRisk,
    Outbreak,
}

impl AssessmentDomain {
    pub const ALL: [AssessmentDomain; 3] = [
        AssessmentDomain::Fitment,
        AssessmentDomain::FallRisk,
        AssessmentDomain::Outbreak,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            AssessmentDomain::Fitment => "fitment",
            AssessmentDomain::FallRisk => "fall_risk",
            AssessmentDomain::Outbreak => "outbreak",
        }
    }

    /// Number of score bands the domain reports.
    pub const fn band_count(self) -> usize {
        match self {
            AssessmentDomain::Fitment => 3,
            AssessmentDomain::FallRisk => 3,
            AssessmentDomain::Outbreak => 3,
        }
    }

    /// File name of this domain's artifact inside a model directory.
    pub const fn artifact_file(self) -> &'static str {
        match self {
            AssessmentDomain::Fitment => "fitment.json",
            AssessmentDomain::FallRisk => "fall_risk.json",
            AssessmentDomain::Outbreak => "outbreak.json",
        }
    }
}

impl fmt::Display for AssessmentDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
