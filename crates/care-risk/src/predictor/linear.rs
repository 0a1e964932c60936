use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    round_tenths, FeatureImportance, FeatureSchema, FeatureVector, Prediction, Predictor,
    PredictorError,
};

/// Serialized weighted-sum model.
///
/// The score is `intercept + Σ weight * (x - mean) / scale` plus every gate contribution,
/// clamped to `0..=100`. Term order defines the feature schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinearArtifact {
    pub name: String,
    #[serde(default)]
    pub intercept: f64,
    pub terms: Vec<LinearTerm>,
    #[serde(default)]
    pub gates: Vec<GateTerm>,
    /// Inclusive lower bounds of every band above the lowest, ascending.
    #[serde(default)]
    pub category_cutoffs: Vec<f64>,
    #[serde(default)]
    pub report_importances: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinearTerm {
    pub feature: String,
    #[serde(default)]
    pub mean: f64,
    #[serde(default = "unit_scale")]
    pub scale: f64,
    pub weight: f64,
}

fn unit_scale() -> f64 {
    1.0
}

/// Contribution that only applies when a requirement flag is raised: `met` when the paired
/// capability is present (> 0), `unmet` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateTerm {
    pub requirement: String,
    pub capability: String,
    pub met: f64,
    pub unmet: f64,
}

/// Errors raised while loading or validating a model artifact.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("unable to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("model artifact is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("model artifact '{artifact}' is invalid: {detail}")]
    Invalid { artifact: String, detail: String },
    #[error("replacement model '{artifact}' changes the {domain} feature schema")]
    SchemaChanged { artifact: String, domain: String },
}

impl LinearArtifact {
    pub fn from_path(path: &Path) -> Result<Self, ArtifactError> {
        let file = File::open(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ArtifactError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn schema(&self) -> FeatureSchema {
        FeatureSchema::new(self.terms.iter().map(|term| term.feature.as_str()))
    }

    /// Validate the artifact and resolve gate features to schema positions.
    pub fn into_predictor(self) -> Result<LinearPredictor, ArtifactError> {
        let invalid = |detail: String| ArtifactError::Invalid {
            artifact: self.name.clone(),
            detail,
        };

        if self.terms.is_empty() {
            return Err(invalid("at least one term is required".to_string()));
        }
        if !self.intercept.is_finite() {
            return Err(invalid("intercept must be finite".to_string()));
        }

        let mut seen = BTreeSet::new();
        for term in &self.terms {
            if !seen.insert(term.feature.as_str()) {
                return Err(invalid(format!("feature '{}' appears twice", term.feature)));
            }
            if !term.weight.is_finite() || !term.mean.is_finite() {
                return Err(invalid(format!(
                    "feature '{}' has a non-finite weight or mean",
                    term.feature
                )));
            }
            if !term.scale.is_finite() || term.scale == 0.0 {
                return Err(invalid(format!(
                    "feature '{}' needs a finite, non-zero scale",
                    term.feature
                )));
            }
        }

        let schema = self.schema();
        let mut gates = Vec::with_capacity(self.gates.len());
        for gate in &self.gates {
            let requirement = schema
                .position(&gate.requirement)
                .ok_or_else(|| invalid(format!("gate requirement '{}' is not a term", gate.requirement)))?;
            let capability = schema
                .position(&gate.capability)
                .ok_or_else(|| invalid(format!("gate capability '{}' is not a term", gate.capability)))?;
            if !gate.met.is_finite() || !gate.unmet.is_finite() {
                return Err(invalid(format!(
                    "gate '{}' has non-finite contributions",
                    gate.requirement
                )));
            }
            gates.push(ResolvedGate {
                requirement,
                capability,
                met: gate.met,
                unmet: gate.unmet,
            });
        }

        let ascending = self
            .category_cutoffs
            .windows(2)
            .all(|pair| pair[0] < pair[1]);
        if !ascending || self.category_cutoffs.iter().any(|cutoff| !cutoff.is_finite()) {
            return Err(invalid(
                "category cutoffs must be finite and strictly ascending".to_string(),
            ));
        }

        let importances = if self.report_importances {
            let total: f64 = self.terms.iter().map(|term| term.weight.abs()).sum();
            self.terms
                .iter()
                .map(|term| FeatureImportance {
                    feature: term.feature.clone(),
                    weight: if total > 0.0 {
                        term.weight.abs() / total
                    } else {
                        0.0
                    },
                })
                .collect()
        } else {
            Vec::new()
        };

        Ok(LinearPredictor {
            artifact: self,
            schema,
            gates,
            importances,
        })
    }
}

#[derive(Debug, Clone)]
struct ResolvedGate {
    requirement: usize,
    capability: usize,
    met: f64,
    unmet: f64,
}

/// Validated [`LinearArtifact`] ready to serve predictions.
#[derive(Debug, Clone)]
pub struct LinearPredictor {
    artifact: LinearArtifact,
    schema: FeatureSchema,
    gates: Vec<ResolvedGate>,
    importances: Vec<FeatureImportance>,
}

impl LinearPredictor {
    pub fn artifact(&self) -> &LinearArtifact {
        &self.artifact
    }
}

impl Predictor for LinearPredictor {
    fn name(&self) -> &str {
        &self.artifact.name
    }

    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn predict(&self, features: &FeatureVector) -> Result<Prediction, PredictorError> {
        let values = features.values();
        if values.len() != self.schema.len() {
            return Err(PredictorError::DimensionMismatch {
                expected: self.schema.len(),
                actual: values.len(),
            });
        }

        let linear: f64 = self
            .artifact
            .terms
            .iter()
            .zip(values)
            .map(|(term, value)| term.weight * (value - term.mean) / term.scale)
            .sum();

        let gated: f64 = self
            .gates
            .iter()
            .filter(|gate| values[gate.requirement] > 0.5)
            .map(|gate| {
                if values[gate.capability] > 0.0 {
                    gate.met
                } else {
                    gate.unmet
                }
            })
            .sum();

        let raw = self.artifact.intercept + linear + gated;
        if !raw.is_finite() {
            return Err(PredictorError::NonFiniteScore);
        }
        let score = raw.clamp(0.0, 100.0);

        // Band on the reported value so a 59.95 shown as 60.0 lands in the 60 band.
        let reported = round_tenths(score);
        let category = if self.artifact.category_cutoffs.is_empty() {
            None
        } else {
            Some(
                self.artifact
                    .category_cutoffs
                    .iter()
                    .take_while(|cutoff| reported >= **cutoff)
                    .count(),
            )
        };

        Ok(Prediction {
            score,
            category,
            importances: self.importances.clone(),
        })
    }

    fn category_count(&self) -> Option<usize> {
        let cutoffs = self.artifact.category_cutoffs.len();
        (cutoffs > 0).then_some(cutoffs + 1)
    }
}
