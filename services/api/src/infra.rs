use care_risk::assessments::{AssessmentService, ScoringConfig};
use care_risk::config::ModelConfig;
use care_risk::error::AppError;
use care_risk::predictor::ModelRegistry;
use metrics_exporter_prometheus::PrometheusHandle;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn load_scoring_config(models: &ModelConfig) -> Result<ScoringConfig, AppError> {
    match &models.scoring_config {
        Some(path) => Ok(ScoringConfig::from_path(path)?),
        None => Ok(ScoringConfig::default()),
    }
}

/// Load every predictor and build the engines, failing fast on configuration errors.
pub(crate) fn build_assessment_service(
    models: &ModelConfig,
) -> Result<Arc<AssessmentService>, AppError> {
    let registry = Arc::new(ModelRegistry::load(models.model_source())?);
    let scoring = load_scoring_config(models)?;
    Ok(Arc::new(AssessmentService::new(registry, &scoring)?))
}

pub(crate) fn read_json_input(path: &Path) -> Result<serde_json::Value, AppError> {
    if path.as_os_str() == "-" {
        return Ok(serde_json::from_reader(io::stdin().lock())?);
    }
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
