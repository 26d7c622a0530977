use std::path::PathBuf;

use crate::infra::{load_catalog, read_profile};
use crate::server;
use clap::{Args, Parser, Subcommand};
use transfit_safety::config::AppConfig;
use transfit_safety::error::AppError;
use transfit_safety::safety::{resolve_as_of, SafetyEngine};

#[derive(Parser, Debug)]
#[command(
    name = "TransFit Safety",
    about = "Run the workout safety policy engine as a service or from the command line",
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
    /// Evaluate a single profile file and print the result as JSON
    Evaluate(EvaluateArgs),
    /// List the registered safety rules
    Rules,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Exercise library CSV; defaults to SAFETY_CATALOG_PATH
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// JSON array of profiles served by the per-user endpoint
    #[arg(long)]
    pub(crate) profiles: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Safety profile JSON file
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Exercise library CSV; defaults to SAFETY_CATALOG_PATH
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Evaluation date (YYYY-MM-DD); defaults to today (UTC)
    #[arg(long)]
    pub(crate) as_of: Option<String>,
    /// Print one line per applied rule instead of the JSON result
    #[arg(long)]
    pub(crate) summary: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Evaluate(args) => run_evaluate(args),
        Command::Rules => run_rules(),
    }
}

fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let profile = read_profile(&args.profile)?;
    let now = resolve_as_of(args.as_of.as_deref()).map_err(AppError::InvalidInput)?;

    let config = AppConfig::load()?;
    let library = load_catalog(args.catalog.as_deref(), &config.catalog)?;

    let engine = SafetyEngine::standard()?;
    let result = engine.evaluate(&profile, library.as_slice(), now);
    if args.summary {
        for line in result.summary_lines() {
            println!("{line}");
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }
    Ok(())
}

fn run_rules() -> Result<(), AppError> {
    let engine = SafetyEngine::standard()?;
    for rule in engine.registry().rules() {
        println!(
            "{:<40} {:<10} {:<9} {}",
            rule.id,
            rule.category.label(),
            rule.severity.label(),
            rule.message
        );
    }
    Ok(())
}
