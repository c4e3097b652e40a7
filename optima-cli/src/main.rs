//! Optima CLI
//!
//! Command-line interface for checking and following server-side tasks
//! of the Optima web API.

mod commands;
mod config;
mod types;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "optima")]
#[command(about = "Optima task and RPC CLI", long_about = None)]
struct Cli {
    /// API base URL
    #[arg(long, env = "OPTIMA_API_URL", default_value = "http://localhost:8080")]
    api_url: String,

    /// Delay between status checks, in milliseconds
    #[arg(long, env = "POLL_INTERVAL_MS", default_value_t = 1000)]
    interval_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "optima_cli=warn,optima_poller=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        api_url: cli.api_url,
        poll_interval: Duration::from_millis(cli.interval_ms),
    };
    config.validate()?;

    handle_command(cli.command, &config).await
}
