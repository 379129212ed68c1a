// Standalone MCP server binary

use anyhow::{Context, Result};
use clap::Parser;
use pinet_client::PiNetClient;
use pinet_mcp::config::LogLevel;
use pinet_mcp::tools::pinet_registry;
use pinet_mcp::{transport, Args, McpServer, ServerConfig, Transport};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables win
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let level = LogLevel::parse(&args.log_level);

    // Initialize tracing (stderr, so stdio transport keeps stdout for JSON-RPC)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| level.unwrap_or(LogLevel::Info).directive().into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if level.is_none() {
        tracing::warn!(log_level = %args.log_level, "Unknown LOG_LEVEL, using INFO");
    }

    tracing::info!("PiNet MCP Server starting...");

    let config = ServerConfig::from_args(args).context("Configuration error")?;
    tracing::info!(?config, "Configuration loaded");

    let client = PiNetClient::builder()
        .base_url(&config.api_url)
        .api_key(&config.api_key)
        .timeout(config.api_timeout)
        .build()
        .context("Failed to initialize PiNet API client")?;
    tracing::info!("PiNet API client initialized for {}", config.api_url);

    let registry = pinet_registry(client);
    tracing::info!("Registered {} tools", registry.len());

    let server = Arc::new(McpServer::new(registry));

    match config.transport {
        Transport::Http => {
            let addr = config.listen_addr();
            if config.host == "0.0.0.0" {
                tracing::info!(
                    "Reachable from other machines at http://<this-host-ip>:{}/mcp",
                    config.port
                );
            }
            transport::http::serve(server, &addr).await?;
        }
        Transport::Stdio => transport::stdio::serve(server).await?,
    }

    Ok(())
}
