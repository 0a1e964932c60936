use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::assessments::{
    AssessmentInput, AssessmentService, FacilityCapability, FallRiskInput,
    FitmentInput, OutbreakInput, ResidentNeeds, ScoringConfig,
};
use crate::predictor::{
    FeatureSchema, FeatureVector, ModelRegistry, Prediction, Predictor, PredictorError,
    PredictorSlot,
};

pub(super) fn fitment_input() -> FitmentInput {
    FitmentInput {
        resident: ResidentNeeds {
            mobility_score: 3,
            cognitive_score: 2,
            adl_score: 3,
            nutrition_score: 4,
            medical_complexity_score: 3,
            requires_secured_unit: true,
            requires_bariatric_accommodation: false,
            requires_iv_therapy: true,
            requires_dialysis: false,
            requires_ventilator: false,
        },
        facility: FacilityCapability {
            secured_unit_beds: 10,
            short_stay_beds: 5,
            bariatric_beds: 2,
            iv_therapy_available: true,
            dialysis_available: false,
            ventilator_available: false,
        },
    }
}

pub(super) fn fall_risk_input() -> FallRiskInput {
    FallRiskInput {
        age: 82,
        gender: 1,
        mobility_score: 3,
        balance_score: 2,
        cognitive_score: 4,
        medication_count: 7,
        fall_history: 1,
        vision_impairment: 1,
        incontinence: true,
        assistive_device: true,
    }
}

pub(super) fn outbreak_input() -> OutbreakInput {
    OutbreakInput {
        year: 2025,
        week: 48,
        staff_vaccination_rate: 75.0,
        resident_vaccination_rate: 85.0,
        seasonal_risk: 0.8,
        previous_outbreaks: false,
        facility_size: 120,
        staff_turnover: 0.15,
    }
}

/// Fall risk payload in the integer-flag wire format.
pub(super) fn fall_risk_payload() -> Value {
    serde_json::json!({
        "age": 82,
        "gender": 1,
        "mobility_score": 3,
        "balance_score": 2,
        "cognitive_score": 4,
        "medication_count": 7,
        "fall_history": 1,
        "vision_impairment": 1,
        "incontinence": 1,
        "assistive_device": 1
    })
}

pub(super) fn reference_registry() -> Arc<ModelRegistry> {
    Arc::new(ModelRegistry::reference().expect("reference models load"))
}

pub(super) fn reference_service() -> Arc<AssessmentService> {
    Arc::new(
        AssessmentService::new(reference_registry(), &ScoringConfig::default())
            .expect("reference service builds"),
    )
}

/// Predictor returning a fixed output regardless of input.
pub(super) struct StubPredictor {
    pub schema: FeatureSchema,
    pub outcome: Result<Prediction, String>,
}

impl Predictor for StubPredictor {
    fn name(&self) -> &str {
        "stub"
    }

    fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    fn predict(&self, features: &FeatureVector) -> Result<Prediction, PredictorError> {
        if features.len() != self.schema.len() {
            return Err(PredictorError::DimensionMismatch {
                expected: self.schema.len(),
                actual: features.len(),
            });
        }
        self.outcome.clone().map_err(PredictorError::Unavailable)
    }
}

pub(super) fn schema_for<I: AssessmentInput>() -> FeatureSchema {
    FeatureSchema::new(I::FIELDS.iter().copied())
}

pub(super) fn stub_slot<I: AssessmentInput>(outcome: Result<Prediction, String>) -> Arc<PredictorSlot> {
    Arc::new(PredictorSlot::new(
        I::DOMAIN,
        Arc::new(StubPredictor {
            schema: schema_for::<I>(),
            outcome,
        }),
    ))
}

pub(super) fn fixed_prediction(score: f64, category: Option<usize>) -> Prediction {
    Prediction {
        score,
        category,
        importances: Vec::new(),
    }
}

pub(super) async fn read_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&bytes).expect("json body")
}
