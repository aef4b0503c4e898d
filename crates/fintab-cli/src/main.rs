mod cli;
mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::Parser;
use fintab_core::Plugin;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::CliError;

/// Env filter for diagnostics on stderr.
const LOG_ENV: &str = "FINTAB_LOG";

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let plugin = Plugin::from_env();
    commands::run(&cli, &plugin).await
}
