use crate::assess::{run_assess, run_batch, AssessCommand, BatchCommand};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use care_risk::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Care Risk Engine",
    about = "Score placement fitment, fall risk, and outbreak risk from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate a single JSON assessment
    Assess {
        #[command(subcommand)]
        command: AssessCommand,
    },
    /// Evaluate many residents from a CSV export, one JSON line per row
    Batch {
        #[command(subcommand)]
        command: BatchCommand,
    },
    /// Evaluate the sample resident, facility, and outbreak snapshot
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess { command } => run_assess(command),
        Command::Batch { command } => run_batch(command),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assess::AssessCommand;

    #[test]
    fn parses_outbreak_assessment_with_current_week() {
        let cli = Cli::try_parse_from([
            "care-risk-api",
            "assess",
            "outbreak",
            "--input",
            "snapshot.json",
            "--this-week",
        ])
        .expect("valid arguments");

        match cli.command {
            Some(Command::Assess {
                command: AssessCommand::Outbreak(args),
            }) => {
                assert!(args.this_week);
                assert_eq!(args.input.input.to_string_lossy(), "snapshot.json");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn fall_risk_subcommand_uses_kebab_case() {
        let cli = Cli::try_parse_from(["care-risk-api", "batch", "fall-risk", "--csv", "ward.csv"])
            .expect("valid arguments");
        assert!(matches!(
            cli.command,
            Some(Command::Batch {
                command: BatchCommand::FallRisk(_)
            })
        ));
        assert!(Cli::try_parse_from(["care-risk-api", "assess", "fitment", "--this-week"]).is_err());
    }

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::try_parse_from(["care-risk-api"]).expect("no arguments");
        assert!(cli.command.is_none());
    }
}
