// Standalone MCP server binary

use anyhow::{Context, Result};
use clap::Parser;
use dandi_mcp::{McpConfig, McpServer, ToolGateway};
use dandi_sdk::DandiClient;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dandi-mcp")]
#[command(about = "MCP server for the DANDI archive search and SQL API", long_about = None)]
struct Args {
    /// Base URL of the archive API
    #[arg(long, env = "DANDI_API_BASE")]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Stdout carries the protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("DANDI MCP Server starting...");

    let config = McpConfig::load(args.config.as_deref())?;
    let client_config = config.client_config(args.base_url, args.timeout_secs)?;
    tracing::info!("Archive API: {}", client_config.base_url);

    let client = DandiClient::from_config(client_config).context("Failed to create HTTP client")?;
    let gateway = ToolGateway::for_client(client);
    tracing::info!("Registered {} tools", gateway.list_tools().len());

    let server = McpServer::new(gateway);

    // No draining on interrupt: in-flight requests are dropped.
    tokio::select! {
        result = server.serve_stdio() => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupt received, shutting down");
        }
    }

    Ok(())
}
