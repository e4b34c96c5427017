use clap::{Args, Parser, Subcommand};

use scorecard::error::AppError;

use crate::demo::{
    run_demo, run_survey_export, run_survey_report, DemoArgs, SurveyExportArgs, SurveyReportArgs,
};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Workload Survey Scorecard",
    about = "Run the survey scoring service or generate reports from the command line",
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
    /// Work with survey report artifacts without starting the service
    Survey {
        #[command(subcommand)]
        command: SurveyCommand,
    },
    /// Run an end-to-end demo: seed responses, score, and render the report
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum SurveyCommand {
    /// Render the tabular report to stdout
    Report(SurveyReportArgs),
    /// Write the spreadsheet export artifact to disk
    Export(SurveyExportArgs),
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
        Command::Survey {
            command: SurveyCommand::Report(args),
        } => run_survey_report(args),
        Command::Survey {
            command: SurveyCommand::Export(args),
        } => run_survey_export(args),
        Command::Demo(args) => run_demo(args),
    }
}
