use crate::infra::{build_assessment_service, read_json_input};
use care_risk::assessments::{
    read_csv, AssessmentDomain, AssessmentReport, FallRiskEvaluation, FallRiskInput,
    OutbreakInput,
};
use care_risk::config::AppConfig;
use care_risk::error::AppError;
use chrono::Local;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub(crate) enum AssessCommand {
    /// Resident-to-facility placement fitment
    Fitment(InputArgs),
    /// Resident fall risk
    FallRisk(InputArgs),
    /// Facility infection outbreak risk
    Outbreak(OutbreakArgs),
}

#[derive(Args, Debug)]
pub(crate) struct InputArgs {
    /// JSON payload to evaluate ("-" reads standard input)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Pretty-print the JSON result
    #[arg(long)]
    pub(crate) pretty: bool,
}

#[derive(Args, Debug)]
pub(crate) struct OutbreakArgs {
    #[command(flatten)]
    pub(crate) input: InputArgs,
    /// Replace the snapshot's year and week with the current ISO week
    #[arg(long)]
    pub(crate) this_week: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum BatchCommand {
    /// Score a CSV with one resident per row
    FallRisk(BatchArgs),
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV file with a header row naming every fall risk field
    #[arg(long)]
    pub(crate) csv: PathBuf,
}

#[derive(Debug, Serialize)]
struct BatchLine<'a> {
    row: usize,
    #[serde(flatten)]
    evaluation: &'a FallRiskEvaluation,
}

pub(crate) fn run_assess(command: AssessCommand) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_assessment_service(&config.models)?;

    let (report, pretty) = match command {
        AssessCommand::Fitment(args) => {
            let payload = read_json_input(&args.input)?;
            (service.assess(AssessmentDomain::Fitment, payload)?, args.pretty)
        }
        AssessCommand::FallRisk(args) => {
            let payload = read_json_input(&args.input)?;
            (service.assess(AssessmentDomain::FallRisk, payload)?, args.pretty)
        }
        AssessCommand::Outbreak(args) => {
            let payload = read_json_input(&args.input.input)?;
            let mut input = OutbreakInput::from_json(payload)?;
            if args.this_week {
                input = input.at_date(Local::now().date_naive());
            }
            let evaluation = service.evaluate_outbreak(&input)?;
            (AssessmentReport::Outbreak(evaluation), args.input.pretty)
        }
    };

    let rendered = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_batch(command: BatchCommand) -> Result<(), AppError> {
    let BatchCommand::FallRisk(args) = command;
    let config = AppConfig::load()?;
    let service = build_assessment_service(&config.models)?;

    let file = File::open(&args.csv)?;
    let residents: Vec<FallRiskInput> = read_csv(BufReader::new(file))?;
    for (index, resident) in residents.iter().enumerate() {
        let evaluation = service.evaluate_fall_risk(resident)?;
        let line = BatchLine {
            row: index + 1,
            evaluation: &evaluation,
        };
        println!("{}", serde_json::to_string(&line)?);
    }
    Ok(())
}
