//! HTTP bindings and the shared listener loop.
//!
//! Two applications are built here:
//! - [`rest_router`]: `POST /echo/`
//! - [`mcp_web_router`]: the MCP endpoint under `/mcp` plus `GET /health`

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

mod decode;
mod health;
mod rest;

pub use health::health_check;
pub use rest::echo_message;

use crate::domain::EchoConfig;
use crate::mcp::{streamable_http_service, MCP_PATH};

/// Default listen address of the REST and combined web applications.
pub const DEFAULT_BIND: &str = "0.0.0.0:8000";

/// REST application: `POST /echo/` (and `/echo`).
///
/// Messages have no length limit, so axum's default body cap is lifted.
pub fn rest_router(config: Arc<EchoConfig>) -> Router {
    Router::new()
        .route("/echo/", post(echo_message))
        .route("/echo", post(echo_message))
        .with_state(config)
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
}

/// Web application with the MCP endpoint nested under `/mcp` and a liveness probe.
pub fn mcp_web_router(config: Arc<EchoConfig>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest_service(MCP_PATH, streamable_http_service(config))
        .layer(TraceLayer::new_for_http())
}

/// Bind `addr` and serve `router` until Ctrl-C.
///
/// Failing to bind is returned as an error so the process exits non-zero.
pub async fn serve(addr: SocketAddr, router: Router) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    let local_addr = listener.local_addr().unwrap_or(addr);

    info!("✅ Listening on http://{}", local_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
}
