use tracing::debug;

use super::error::EvaluationError;
use super::features::{check_schema, normalize, AssessmentInput};
use super::category::RiskCategory;
use crate::predictor::{round_tenths, FeatureImportance, PredictorSlot};

/// Predictor output after the engine-side bounds have been applied.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScoredPrediction {
    pub score: f64,
    pub category: Option<usize>,
    pub importances: Vec<FeatureImportance>,
}

/// Run one input through the slot's current predictor.
///
/// This is the only place a [`crate::predictor::PredictorError`] becomes an
/// [`EvaluationError`].
pub(crate) fn score<I: AssessmentInput>(
    slot: &PredictorSlot,
    input: &I,
) -> Result<ScoredPrediction, EvaluationError> {
    let predictor = slot.current();
    let features = normalize(input, predictor.schema())?;
    let prediction = predictor
        .predict(&features)
        .map_err(|err| EvaluationError::predictor(I::DOMAIN, err.to_string()))?;

    if !prediction.score.is_finite() {
        return Err(EvaluationError::predictor(
            I::DOMAIN,
            format!("{} returned a non-finite score", predictor.name()),
        ));
    }

    let clamped = prediction.score.clamp(0.0, 100.0);
    if clamped != prediction.score {
        debug!(
            domain = %I::DOMAIN,
            model = predictor.name(),
            raw = prediction.score,
            "clamped predictor score into 0..=100"
        );
    }

    Ok(ScoredPrediction {
        score: round_tenths(clamped),
        category: prediction.category,
        importances: prediction.importances,
    })
}

/// Startup check that a slot belongs to `I`'s domain, its predictor can be fed from `I`, and
/// any categories it emits line up with `C`.
pub(crate) fn check_slot<I, C>(slot: &PredictorSlot) -> Result<(), EvaluationError>
where
    I: AssessmentInput,
    C: RiskCategory,
{
    if slot.domain() != I::DOMAIN {
        return Err(EvaluationError::Configuration(format!(
            "{} engine was handed the {} predictor slot",
            I::DOMAIN,
            slot.domain()
        )));
    }
    let predictor = slot.current();
    if let Some(count) = predictor.category_count() {
        if count != C::ORDERED.len() {
            return Err(EvaluationError::Configuration(format!(
                "{} classifies into {count} bands but the {} engine has {}",
                predictor.name(),
                I::DOMAIN,
                C::ORDERED.len()
            )));
        }
    }
    check_schema::<I>(predictor.schema())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::assessments::AssessmentDomain;
    use crate::predictor::{FeatureSchema, FeatureVector, Prediction, Predictor, PredictorError};

    struct Reading(f64);

    impl AssessmentInput for Reading {
        const DOMAIN: AssessmentDomain = AssessmentDomain::Outbreak;
        const FIELDS: &'static [&'static str] = &["reading"];

        fn feature(&self, name: &str) -> Option<f64> {
            (name == "reading").then_some(self.0)
        }

        fn validate(&self) -> Result<(), EvaluationError> {
            Ok(())
        }
    }

    struct Echo {
        schema: FeatureSchema,
    }

    impl Predictor for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn schema(&self) -> &FeatureSchema {
            &self.schema
        }

        fn predict(&self, features: &FeatureVector) -> Result<Prediction, PredictorError> {
            let score = features.values()[0];
            if score < -1000.0 {
                return Err(PredictorError::Unavailable("sensor offline".to_string()));
            }
            Ok(Prediction {
                score,
                category: None,
                importances: Vec::new(),
            })
        }
    }

    fn slot() -> PredictorSlot {
        PredictorSlot::new(
            AssessmentDomain::Outbreak,
            Arc::new(Echo {
                schema: FeatureSchema::new(["reading"]),
            }),
        )
    }

    #[test]
    fn rounds_to_one_decimal_and_clamps() {
        let slot = slot();
        assert_eq!(score(&slot, &Reading(42.349)).expect("score").score, 42.3);
        assert_eq!(score(&slot, &Reading(42.35001)).expect("score").score, 42.4);
        assert_eq!(score(&slot, &Reading(180.0)).expect("score").score, 100.0);
        assert_eq!(score(&slot, &Reading(-12.0)).expect("score").score, 0.0);
    }

    #[test]
    fn predictor_faults_become_unavailable() {
        let slot = slot();
        let err = score(&slot, &Reading(-5000.0)).expect_err("backend error");
        assert!(matches!(err, EvaluationError::PredictorUnavailable { .. }));
        assert!(err.to_string().contains("sensor offline"));

        let err = score(&slot, &Reading(f64::NAN)).expect_err("nan score");
        assert!(matches!(err, EvaluationError::PredictorUnavailable { .. }));
    }
}
