//! Prestige - Command-line entry point
//!
//! Parses arguments, installs logging, loads settings and dispatches to the
//! subcommands.

mod cli;
mod commands;

use std::io::Write as _;
use std::process::ExitCode;

use clap::Parser;
use prestige_infrastructure::SettingsRepository;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "PRESTIGE_LOG";

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let repository = cli
        .settings
        .clone()
        .map_or_else(SettingsRepository::new, SettingsRepository::with_path);

    let (output, failed) = match &cli.command {
        Command::Blocks { file } => (commands::blocks(file).await?, false),
        Command::Extract(args) => {
            let settings = repository.load().await?;
            (commands::extract(args, &settings).await?, false)
        }
        Command::Highlight { file } => (commands::highlight(file).await?, false),
        Command::Lint { file } => commands::lint_sheet(file).await?,
        Command::New { file, force } => (commands::new_sheet(file, *force).await?, false),
    };

    std::io::stdout().lock().write_all(output.as_bytes())?;
    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}
