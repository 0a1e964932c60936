//! Boundary between the assessment engines and fitted models.
//!
//! Engines only ever see the [`Predictor`] trait. Fitted artifacts are loaded once during
//! bootstrap, wrapped in a [`PredictorSlot`], and shared read-only across requests.

mod linear;
mod reference;
mod registry;

pub use linear::{ArtifactError, GateTerm, LinearArtifact, LinearPredictor, LinearTerm};
pub use reference::reference_artifact;
pub use registry::{ModelRegistry, ModelSource, PredictorSlot};

use serde::{Deserialize, Serialize};

/// Ordered feature names a model was fitted on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema(Vec<String>);

impl FeatureSchema {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|candidate| candidate == name)
    }
}

/// Numeric features positionally aligned to a [`FeatureSchema`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Relative weight a model assigns to one input feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub weight: f64,
}

/// Raw model output for a single feature vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub score: f64,
    /// Band index counted from the lowest band, when the model classifies directly.
    pub category: Option<usize>,
    pub importances: Vec<FeatureImportance>,
}

/// Read-only access to a fitted model.
///
/// Implementations must be deterministic for a loaded artifact and free of side effects.
pub trait Predictor: Send + Sync {
    fn name(&self) -> &str;
    fn schema(&self) -> &FeatureSchema;
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, PredictorError>;

    /// Number of bands this model classifies into, when it emits categories at all.
    fn category_count(&self) -> Option<usize> {
        None
    }
}

/// Scores are reported and banded at one decimal.
pub(crate) fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Failure raised by a model backend while scoring.
#[derive(Debug, thiserror::Error)]
pub enum PredictorError {
    #[error("expected {expected} features, received {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("model produced a non-finite score")]
    NonFiniteScore,
    #[error("model backend unavailable: {0}")]
    Unavailable(String),
}
