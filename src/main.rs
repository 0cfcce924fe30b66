use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::info;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

mod cli;

use cli::Cli;
use restaker::config::Config;
use restaker::health::HttpHealthFactory;
use restaker::retry::TokioDelay;
use restaker::runner::{DryRunFactory, RunnerFactory};
use restaker::scheduler::NetworkScheduler;

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("restaker")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("restaker.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

/// The signing mnemonic must be present before any scheduling begins
fn require_mnemonic() -> Result<String> {
    std::env::var("MNEMONIC").map_err(|_| eyre!("MNEMONIC environment variable not set"))
}

fn resolve_runner_factory(cli: &Cli) -> Result<Arc<dyn RunnerFactory>> {
    if cli.dry_run {
        return Ok(Arc::new(DryRunFactory));
    }
    require_mnemonic()?;
    // TODO: wire the cosmos signing backend behind RunnerFactory
    Err(eyre!(
        "no signing backend available yet; use --dry-run to verify configuration"
    ))
}

async fn run_application(cli: &Cli, config: Config) -> Result<()> {
    info!("Starting autostake run");

    if cli.verbose {
        println!("{}", "Verbose mode enabled".yellow());
    }

    if config.networks.is_empty() {
        return Err(eyre!("no networks configured"));
    }

    let runners = resolve_runner_factory(cli)?;
    let scheduler = NetworkScheduler::new(
        config,
        runners,
        Arc::new(HttpHealthFactory::new()),
        Arc::new(TokioDelay),
    );

    if cli.networks.is_empty() {
        println!("{}", "Running all enabled networks...".cyan());
    } else {
        println!("{} {}", "Running networks:".cyan(), cli.networks.join(", "));
    }

    scheduler.run(&cli.networks).await?;

    println!("{}", "Run complete".green());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    run_application(&cli, config).await.context("Autostake run failed")?;

    Ok(())
}
