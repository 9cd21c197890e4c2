use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod domain;
mod http;
mod mcp;

use cli::{Cli, Commands};
use domain::{EchoConfig, DEFAULT_HIDDEN_MESSAGE};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging. Always stderr: stdout carries MCP traffic in stdio mode.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Arc::new(EchoConfig::new(cli.hidden_message));
    if config.hidden_message == DEFAULT_HIDDEN_MESSAGE {
        info!("Hidden message is the default value");
    }

    match cli.command {
        Commands::Rest { bind } => {
            info!("🔧 Starting REST echo server (POST /echo/)");
            http::serve(bind, http::rest_router(config)).await
        }
        Commands::McpWeb { bind } => {
            info!("🔧 Starting MCP web server ({} and /health)", mcp::MCP_PATH);
            http::serve(bind, http::mcp_web_router(config)).await
        }
        Commands::Mcp { bind, stdio } => mcp::run_mcp_server(config, bind, stdio).await,
    }
}
