use super::domain::AssessmentDomain;

/// Error raised while evaluating an assessment.
///
/// `SchemaMismatch` is the caller's fault and `PredictorUnavailable` is infrastructure, so the
/// transport layer can answer each with a different status.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error("{domain} input does not match the assessment schema: {detail}")]
    SchemaMismatch {
        domain: AssessmentDomain,
        detail: String,
    },
    #[error("{domain} predictor unavailable: {reason}")]
    PredictorUnavailable {
        domain: AssessmentDomain,
        reason: String,
    },
    #[error("invalid assessment configuration: {0}")]
    Configuration(String),
}

impl EvaluationError {
    pub(crate) fn schema(domain: AssessmentDomain, detail: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            domain,
            detail: detail.into(),
        }
    }

    pub(crate) fn predictor(domain: AssessmentDomain, reason: impl Into<String>) -> Self {
        Self::PredictorUnavailable {
            domain,
            reason: reason.into(),
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, EvaluationError::SchemaMismatch { .. })
    }
}
