use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use super::linear::{ArtifactError, LinearArtifact};
use super::reference::reference_artifact;
use super::Predictor;
use crate::assessments::AssessmentDomain;

/// Holds the active predictor for one domain.
///
/// Readers take a snapshot `Arc` and keep using it for the whole evaluation, so a concurrent
/// [`PredictorSlot::replace`] never exposes a partially swapped model.
pub struct PredictorSlot {
    domain: AssessmentDomain,
    current: RwLock<Arc<dyn Predictor>>,
}

impl PredictorSlot {
    pub fn new(domain: AssessmentDomain, predictor: Arc<dyn Predictor>) -> Self {
        Self {
            domain,
            current: RwLock::new(predictor),
        }
    }

    pub fn domain(&self) -> AssessmentDomain {
        self.domain
    }

    pub fn current(&self) -> Arc<dyn Predictor> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in a new predictor trained on the same feature schema, returning the old one.
    pub fn replace(&self, next: Arc<dyn Predictor>) -> Result<Arc<dyn Predictor>, ArtifactError> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if guard.schema() != next.schema() {
            return Err(ArtifactError::SchemaChanged {
                artifact: next.name().to_string(),
                domain: self.domain.to_string(),
            });
        }
        Ok(std::mem::replace(&mut *guard, next))
    }
}

/// Where the registry reads predictor artifacts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    Reference,
    Directory(PathBuf),
}

impl ModelSource {
    fn load(&self, domain: AssessmentDomain) -> Result<Arc<dyn Predictor>, ArtifactError> {
        let artifact = match self {
            ModelSource::Reference => reference_artifact(domain),
            ModelSource::Directory(dir) => {
                LinearArtifact::from_path(&dir.join(domain.artifact_file()))?
            }
        };
        let predictor = artifact.into_predictor()?;
        check_category_count(domain, &predictor)?;
        Ok(Arc::new(predictor))
    }
}

fn check_category_count(domain: AssessmentDomain, predictor: &dyn Predictor) -> Result<(), ArtifactError> {
    match predictor.category_count() {
        Some(count) if count != domain.band_count() => Err(ArtifactError::Invalid {
            artifact: predictor.name().to_string(),
            detail: format!(
                "classifies into {count} bands but {domain} reports {}",
                domain.band_count()
            ),
        }),
        _ => Ok(()),
    }
}

/// One predictor slot per assessment domain, loaded together during bootstrap.
pub struct ModelRegistry {
    source: ModelSource,
    fitment: Arc<PredictorSlot>,
    fall_risk: Arc<PredictorSlot>,
    outbreak: Arc<PredictorSlot>,
}

impl ModelRegistry {
    pub fn load(source: ModelSource) -> Result<Self, ArtifactError> {
        let slot = |domain: AssessmentDomain| -> Result<Arc<PredictorSlot>, ArtifactError> {
            let predictor = source.load(domain)?;
            info!(%domain, model = predictor.name(), "loaded predictor");
            Ok(Arc::new(PredictorSlot::new(domain, predictor)))
        };

        let fitment = slot(AssessmentDomain::Fitment)?;
        let fall_risk = slot(AssessmentDomain::FallRisk)?;
        let outbreak = slot(AssessmentDomain::Outbreak)?;

        Ok(Self {
            source,
            fitment,
            fall_risk,
            outbreak,
        })
    }

    pub fn reference() -> Result<Self, ArtifactError> {
        Self::load(ModelSource::Reference)
    }

    pub fn source(&self) -> &ModelSource {
        &self.source
    }

    pub fn slot(&self, domain: AssessmentDomain) -> Arc<PredictorSlot> {
        match domain {
            AssessmentDomain::Fitment => self.fitment.clone(),
            AssessmentDomain::FallRisk => self.fall_risk.clone(),
            AssessmentDomain::Outbreak => self.outbreak.clone(),
        }
    }

    /// Re-read every artifact from the source and swap them in.
    ///
    /// All artifacts are loaded and validated before any slot changes, so a bad file leaves the
    /// running models untouched.
    pub fn reload(&self) -> Result<Vec<AssessmentDomain>, ArtifactError> {
        let mut staged = Vec::with_capacity(AssessmentDomain::ALL.len());
        for domain in AssessmentDomain::ALL {
            let next = self.source.load(domain)?;
            let slot = self.slot(domain);
            if slot.current().schema() != next.schema() {
                return Err(ArtifactError::SchemaChanged {
                    artifact: next.name().to_string(),
                    domain: domain.to_string(),
                });
            }
            staged.push((slot, next));
        }

        let mut reloaded = Vec::with_capacity(staged.len());
        for (slot, next) in staged {
            let model = next.name().to_string();
            slot.replace(next)?;
            info!(domain = %slot.domain(), %model, "swapped predictor");
            reloaded.push(slot.domain());
        }
        Ok(reloaded)
    }
}
