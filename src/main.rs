use std::path::PathBuf;
use std::sync::Arc;

use anyhow::anyhow;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use waav_pipeline::{
    PipelineConfig,
    core::{ServiceClients, SystemClock},
    pipeline::{PipelineOrchestrator, RunSettings},
};

/// WaaV Pipeline - translate, synthesize, store and transcribe text line by line
#[derive(Parser, Debug)]
#[command(name = "waav-pipeline")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Input text file (overrides configuration)
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    input: Option<PathBuf>,

    /// Translated-text output file (overrides configuration)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the run summary as JSON on success
    #[arg(long = "summary")]
    summary: bool,
}

fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load configuration from file or environment
    let mut config = if let Some(ref config_path) = cli.config {
        info!("Loading configuration from {}", config_path.display());
        PipelineConfig::from_file(config_path).map_err(|e| anyhow!(e.to_string()))?
    } else {
        PipelineConfig::from_env().map_err(|e| anyhow!(e.to_string()))?
    };

    if let Some(input) = cli.input {
        config.input_path = input;
    }
    if let Some(output) = cli.output {
        config.output_path = output;
    }

    // One record at a time; no parallelism across lines
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let run = runtime.block_on(async {
        let clients = ServiceClients::from_config(&config).await;
        let mut orchestrator =
            PipelineOrchestrator::new(RunSettings::from(&config), clients, Arc::new(SystemClock));
        orchestrator.run(&config.input_path).await
    })?;

    info!(
        processed = run.processed(),
        skipped_blank_lines = run.skipped_blank_lines,
        "Done"
    );

    if cli.summary {
        println!("{}", serde_json::to_string_pretty(&run)?);
    }

    Ok(())
}
