use crate::demo::{run_demo, run_report, run_score, DemoArgs, ReportArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use human_assessment::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Human 2.0 Assessment",
    about = "Score Human 2.0 assessments and serve the assessment API",
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
    /// Score an answer set read from a JSON file
    Score(ScoreArgs),
    /// Score a participant and generate the narrative report
    Report(ReportArgs),
    /// Walk a sample participant through the survey and print the results
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
        Command::Score(args) => run_score(args),
        Command::Report(args) => run_report(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}
