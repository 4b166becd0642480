//! n8nctl
//!
//! Command-line interface for managing workflows and troubleshooting
//! executions on an n8n instance.

mod commands;
mod config;
mod name_resolver;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "n8nctl")]
#[command(about = "n8n workflow CLI - manage workflows, nodes, and executions", long_about = None)]
struct Cli {
    /// n8n instance base URL
    #[arg(long, env = "N8N_BASE_URL", global = true)]
    base_url: Option<String>,

    /// API key for the instance
    #[arg(long, env = "N8N_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, env = "N8N_TIMEOUT", global = true, default_value = "30")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "n8nctl=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::new(cli.base_url, cli.api_key, cli.timeout)?;
    tracing::debug!(base_url = %config.base_url, "configuration loaded");

    handle_command(cli.command, &config).await
}
