//! Restpad - Main Entry Point
//!
//! Command-line front end over the environment store and request history.

mod cli;
mod commands;

use clap::Parser;
use restpad_infrastructure::AppConfig;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::from_env(cli.data_dir)?;

    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!(data_dir = %config.data_dir.display(), "starting restpad");

    let stdout = std::io::stdout();
    commands::run(cli.command, &config, &mut stdout.lock()).await
}
