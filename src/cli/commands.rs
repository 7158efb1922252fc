//! CLI command definitions for botblitz.

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing::info;

use super::manifest::{RunManifest, RunReport};
use crate::engine::BotEngine;
use crate::execution::DockerSandbox;
use crate::rpc::GrpcActionClient;
use crate::source::{GithubSource, SourceFetcher};
use crate::validation::{validate_bots, validate_simulations};

/// Runs fantasy bots in Docker sandboxes and collects their selections.
#[derive(Parser)]
#[command(name = "botblitz")]
#[command(about = "Run fantasy bots in isolated sandboxes and collect their selections")]
#[command(version)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Run every bot in the manifest through every simulation.
    Run(RunArgs),

    /// Print the engine summary for a manifest without running it.
    Summary(ManifestArgs),

    /// Validate a manifest's bots and simulations.
    Validate(ManifestArgs),
}

/// Arguments for commands that only read a manifest.
#[derive(Parser, Debug)]
pub struct ManifestArgs {
    /// Path to the run manifest (YAML or JSON).
    #[arg(short, long, default_value = "botblitz.yaml")]
    pub config: PathBuf,
}

/// Arguments for `botblitz run`.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the run manifest (YAML or JSON).
    #[arg(short, long, default_value = "botblitz.yaml")]
    pub config: PathBuf,

    /// Log per-iteration progress (overrides the manifest setting).
    #[arg(short, long)]
    pub verbose: bool,

    /// Write a JSON run report to this path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Parse CLI arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Run the CLI by parsing arguments and executing the command.
pub async fn run() -> anyhow::Result<()> {
    run_with_cli(parse_cli()).await
}

/// Run the CLI with the parsed arguments.
pub async fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Run(args) => run_engine_command(args).await,
        Commands::Summary(args) => run_summary_command(args),
        Commands::Validate(args) => run_validate_command(args),
    }
}

/// Builds an engine from a manifest with the production collaborators.
pub fn build_engine(manifest: RunManifest) -> BotEngine {
    let fetcher = SourceFetcher::new(
        manifest.settings.working_dir.clone(),
        GithubSource::new(manifest.github),
    );

    BotEngine::new(manifest.simulations, manifest.bots, manifest.settings)
        .with_source_acquirer(fetcher)
        .with_sandbox_runtime(DockerSandbox::new(manifest.sandbox))
        .with_action_invoker(GrpcActionClient::new(manifest.rpc))
}

async fn run_engine_command(args: RunArgs) -> anyhow::Result<()> {
    let mut manifest = RunManifest::load(&args.config)?;
    if args.verbose {
        manifest.settings.verbose_logging_enabled = true;
    }

    let mut engine = build_engine(manifest);
    println!("{}", engine.summarize());

    let started_at = Utc::now();
    let outcome = engine.run().await;
    let completed_at = Utc::now();

    engine.print_results();

    if let Some(path) = &args.output {
        let report = RunReport {
            started_at,
            completed_at,
            succeeded: outcome.is_ok(),
            error: outcome.as_ref().err().map(ToString::to_string),
            results: engine.into_results(),
        };
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        info!(path = %path.display(), "Wrote run report");
    }

    outcome.context("Engine run failed")
}

fn run_summary_command(args: ManifestArgs) -> anyhow::Result<()> {
    let manifest = RunManifest::load(&args.config)?;
    println!("{}", build_engine(manifest).summarize());
    Ok(())
}

fn run_validate_command(args: ManifestArgs) -> anyhow::Result<()> {
    let manifest = RunManifest::load(&args.config)?;

    validate_bots(&manifest.bots)?;
    validate_simulations(&manifest.simulations)?;

    println!(
        "✓ {} bot(s) and {} simulation(s) are valid",
        manifest.bots.len(),
        manifest.simulations.len()
    );
    Ok(())
}
