use std::fmt;
use std::marker::PhantomData;

use serde::Serializer;
use tracing::warn;

use super::domain::AssessmentDomain;
use super::error::EvaluationError;

/// Closed, ordered set of levels a domain's score is banded into.
pub trait RiskCategory: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Variants ordered from the lowest score band to the highest.
    const ORDERED: &'static [Self];

    fn label(self) -> &'static str;

    fn band_index(self) -> usize {
        Self::ORDERED
            .iter()
            .position(|candidate| *candidate == self)
            .unwrap_or(0)
    }
}

/// Inclusive lower bounds for every band above the lowest.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBands<C: RiskCategory> {
    cutoffs: Vec<f64>,
    _category: PhantomData<C>,
}

impl<C: RiskCategory> CategoryBands<C> {
    pub fn new(cutoffs: Vec<f64>) -> Result<Self, EvaluationError> {
        let expected = C::ORDERED.len().saturating_sub(1);
        if cutoffs.len() != expected {
            return Err(EvaluationError::Configuration(format!(
                "expected {expected} cutoffs for {} bands, found {}",
                C::ORDERED.len(),
                cutoffs.len()
            )));
        }
        if cutoffs
            .iter()
            .any(|cutoff| !cutoff.is_finite() || *cutoff <= 0.0 || *cutoff > 100.0)
        {
            return Err(EvaluationError::Configuration(format!(
                "cutoffs must lie within (0, 100]: {cutoffs:?}"
            )));
        }
        if !cutoffs.windows(2).all(|pair| pair[0] < pair[1]) {
            return Err(EvaluationError::Configuration(format!(
                "cutoffs must be strictly ascending: {cutoffs:?}"
            )));
        }

        Ok(Self {
            cutoffs,
            _category: PhantomData,
        })
    }

    pub fn cutoffs(&self) -> &[f64] {
        &self.cutoffs
    }

    pub fn categorize(&self, score: f64) -> C {
        let band = self
            .cutoffs
            .iter()
            .take_while(|cutoff| score >= **cutoff)
            .count();
        C::ORDERED[band.min(C::ORDERED.len() - 1)]
    }

    /// Pick the category for a scored prediction.
    ///
    /// A category emitted by the predictor wins; disagreement with the score band is logged.
    pub(crate) fn resolve(
        &self,
        domain: AssessmentDomain,
        score: f64,
        emitted: Option<usize>,
    ) -> Result<C, EvaluationError> {
        let derived = self.categorize(score);
        let Some(index) = emitted else {
            return Ok(derived);
        };

        let emitted = C::ORDERED.get(index).copied().ok_or_else(|| {
            EvaluationError::predictor(
                domain,
                format!(
                    "category index {index} outside the {} known bands",
                    C::ORDERED.len()
                ),
            )
        })?;

        if emitted != derived {
            warn!(
                %domain,
                score,
                emitted = emitted.label(),
                derived = derived.label(),
                "predictor category disagrees with score band"
            );
        }
        Ok(emitted)
    }
}

pub(crate) fn serialize_label<C, S>(category: &C, serializer: S) -> Result<S::Ok, S::Error>
where
    C: RiskCategory,
    S: Serializer,
{
    serializer.serialize_str(category.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Tier {
        Low,
        Mid,
        Top,
    }

    impl RiskCategory for Tier {
        const ORDERED: &'static [Self] = &[Tier::Low, Tier::Mid, Tier::Top];

        fn label(self) -> &'static str {
            match self {
                Tier::Low => "low",
                Tier::Mid => "mid",
                Tier::Top => "top",
            }
        }
    }

    fn bands() -> CategoryBands<Tier> {
        CategoryBands::new(vec![30.0, 60.0]).expect("valid bands")
    }

    #[test]
    fn lower_bounds_are_inclusive() {
        let bands = bands();
        assert_eq!(bands.categorize(0.0), Tier::Low);
        assert_eq!(bands.categorize(29.9), Tier::Low);
        assert_eq!(bands.categorize(30.0), Tier::Mid);
        assert_eq!(bands.categorize(59.9), Tier::Mid);
        assert_eq!(bands.categorize(60.0), Tier::Top);
        assert_eq!(bands.categorize(100.0), Tier::Top);
    }

    #[test]
    fn categorize_is_monotonic() {
        let bands = bands();
        let mut previous = bands.categorize(0.0).band_index();
        for step in 1..=1000 {
            let current = bands.categorize(f64::from(step) / 10.0).band_index();
            assert!(current >= previous, "band dropped at {}", step);
            previous = current;
        }
    }

    #[test]
    fn rejects_malformed_cutoffs() {
        assert!(CategoryBands::<Tier>::new(vec![60.0]).is_err());
        assert!(CategoryBands::<Tier>::new(vec![60.0, 30.0]).is_err());
        assert!(CategoryBands::<Tier>::new(vec![30.0, 30.0]).is_err());
        assert!(CategoryBands::<Tier>::new(vec![0.0, 30.0]).is_err());
        assert!(CategoryBands::<Tier>::new(vec![30.0, f64::NAN]).is_err());
        assert!(CategoryBands::<Tier>::new(vec![30.0, 120.0]).is_err());
    }

    #[test]
    fn emitted_category_takes_precedence() {
        let bands = bands();
        let resolved = bands
            .resolve(AssessmentDomain::FallRisk, 10.0, Some(2))
            .expect("valid index");
        assert_eq!(resolved, Tier::Top);
        let derived = bands
            .resolve(AssessmentDomain::FallRisk, 45.0, None)
            .expect("derived");
        assert_eq!(derived, Tier::Mid);
    }

    #[test]
    fn out_of_range_category_is_a_predictor_fault() {
        let err = bands()
            .resolve(AssessmentDomain::FallRisk, 10.0, Some(3))
            .expect_err("no fourth band");
        assert!(matches!(err, EvaluationError::PredictorUnavailable { .. }));
    }
}
