use crate::infra::build_assessment_service;
use care_risk::assessments::{
    AssessmentService, FacilityCapability, FallRiskInput, FitmentInput, OutbreakInput,
    ResidentNeeds, RiskCategory,
};
use care_risk::config::AppConfig;
use care_risk::error::AppError;
use chrono::Local;
use clap::Args;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Score the outbreak snapshot for the current ISO week instead of week 48
    #[arg(long)]
    pub(crate) this_week: bool,
    /// Skip the fitment portion of the demo
    #[arg(long)]
    pub(crate) skip_fitment: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_assessment_service(&config.models)?;

    println!("Care risk engine demo");
    println!("Models: {:?}", service.registry().source());

    if !args.skip_fitment {
        render_fitment(&service)?;
    }
    render_fall_risk(&service)?;

    let mut snapshot = demo_outbreak_snapshot();
    if args.this_week {
        snapshot = snapshot.at_date(Local::now().date_naive());
    }
    render_outbreak(&service, &snapshot)?;

    Ok(())
}

fn render_fitment(service: &AssessmentService) -> Result<(), AppError> {
    let evaluation = service.evaluate_fitment(&demo_fitment_input())?;
    println!("\nPlacement fitment");
    println!(
        "- Score {:.1} -> {}",
        evaluation.fitment_score,
        evaluation.recommendation.label()
    );
    for reason in &evaluation.reasoning {
        println!("  - {reason}");
    }
    Ok(())
}

fn render_fall_risk(service: &AssessmentService) -> Result<(), AppError> {
    let evaluation = service.evaluate_fall_risk(&demo_fall_risk_input())?;
    println!("\nFall risk");
    println!(
        "- Score {:.1} -> {}",
        evaluation.risk_score,
        evaluation.risk_level.label()
    );
    println!("  Risk factors:");
    for factor in &evaluation.risk_factors {
        println!("    - {factor}");
    }
    println!("  Recommendations:");
    for recommendation in &evaluation.recommendations {
        println!("    - {recommendation}");
    }
    Ok(())
}

fn render_outbreak(service: &AssessmentService, snapshot: &OutbreakInput) -> Result<(), AppError> {
    let evaluation = service.evaluate_outbreak(snapshot)?;
    println!("\nOutbreak risk ({}-W{:02})", snapshot.year, snapshot.week);
    println!(
        "- Score {:.1} -> {}",
        evaluation.risk_score,
        evaluation.risk_level.label()
    );
    let weeks: Vec<String> = evaluation
        .high_risk_weeks
        .iter()
        .map(|week| week.to_string())
        .collect();
    if weeks.is_empty() {
        println!("  No winter weeks nearby");
    } else {
        println!("  Nearby high-risk weeks: {}", weeks.join(", "));
    }
    println!("  Key factors: {}", evaluation.key_factors.join(", "));
    println!("  Recommendations:");
    for recommendation in &evaluation.recommendations {
        println!("    - {recommendation}");
    }
    Ok(())
}

pub(crate) fn demo_fitment_input() -> FitmentInput {
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

pub(crate) fn demo_fall_risk_input() -> FallRiskInput {
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

pub(crate) fn demo_outbreak_snapshot() -> OutbreakInput {
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
