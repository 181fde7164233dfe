use crate::commands::{run_render, run_score, run_template, RenderArgs, ScoreArgs, TemplateArgs};
use clap::{Parser, Subcommand};
use rotation_grade::config::AppConfig;
use rotation_grade::error::AppError;
use rotation_grade::telemetry;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "rotation-grade",
    about = "Score clinical rotation evaluations and print the signed grading form",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the grading form as a PDF
    Render(RenderArgs),
    /// Print section averages, applied weights and the final score
    Score(ScoreArgs),
    /// Write a blank CSV score sheet listing every item
    Template(TemplateArgs),
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Render(_) => "render",
            Command::Score(_) => "score",
            Command::Template(_) => "template",
        }
    }
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(?config.environment, command = cli.command.name(), "rotation grading started");

    match cli.command {
        Command::Render(args) => run_render(args, &config),
        Command::Score(args) => run_score(args),
        Command::Template(args) => run_template(args),
    }
}
