use std::net::SocketAddr;

use clap::{Parser, Subcommand};

use crate::domain::DEFAULT_HIDDEN_MESSAGE;
use crate::http::DEFAULT_BIND;

/// Echo fixture serving a message and a hidden message over REST or MCP
#[derive(Parser, Debug)]
#[command(name = "echo-probe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Secret returned alongside every echoed message
    #[arg(
        long,
        env = "HIDDEN_MESSAGE",
        default_value = DEFAULT_HIDDEN_MESSAGE,
        hide_env_values = true,
        global = true
    )]
    pub hidden_message: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the REST binding (POST /echo/)
    Rest {
        /// Address to listen on
        #[arg(long, default_value = DEFAULT_BIND)]
        bind: SocketAddr,
    },
    /// Serve the MCP endpoint under /mcp together with GET /health
    McpWeb {
        /// Address to listen on
        #[arg(long, default_value = DEFAULT_BIND)]
        bind: SocketAddr,
    },
    /// Serve the MCP endpoint on its own
    Mcp {
        /// Address to listen on (ignored with --stdio)
        #[arg(long, default_value = "127.0.0.1:8000")]
        bind: SocketAddr,

        /// Serve over stdin/stdout instead of HTTP
        #[arg(long)]
        stdio: bool,
    },
}
