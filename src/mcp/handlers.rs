//! MCP server transports.
//!
//! Streamable HTTP runs in stateless mode: every POST is an independent
//! call with no session to resume, and each response is one complete
//! document (no keep-alive pings, no server-initiated stream).
//! HTTP callers still receive that document SSE-framed: the response is
//! `text/event-stream` carrying exactly one `data:` event with the JSON-RPC
//! reply, after which the stream ends.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use rmcp::transport::{
    stdio as stdio_transport,
    streamable_http_server::{
        session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
    },
    IntoTransport,
};
use rmcp::{RoleServer, ServiceExt};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use super::EchoMcpServer;
use crate::domain::EchoConfig;

/// Path prefix the MCP endpoint is mounted under.
pub const MCP_PATH: &str = "/mcp";

/// Build the stateless streamable HTTP service for the echo server.
pub fn streamable_http_service(
    config: Arc<EchoConfig>,
) -> StreamableHttpService<EchoMcpServer, LocalSessionManager> {
    let server = EchoMcpServer::new(config);
    StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig {
            stateful_mode: false,
            sse_keep_alive: None,
            ..Default::default()
        },
    )
}

/// Run the standalone MCP server, over streamable HTTP at `bind` or over stdio.
pub async fn run_mcp_server(
    config: Arc<EchoConfig>,
    bind: SocketAddr,
    stdio: bool,
) -> Result<()> {
    info!("🔧 Starting standalone echo MCP server");

    if stdio {
        info!("📝 Echo MCP over stdio");
        return serve_echo_transport(EchoMcpServer::new(config), stdio_transport()).await;
    }

    info!("📝 Streamable HTTP mode at {}", MCP_PATH);
    let router = Router::new()
        .nest_service(MCP_PATH, streamable_http_service(config))
        .layer(TraceLayer::new_for_http());
    crate::http::serve(bind, router).await
}

/// Drive the echo server over any rmcp transport until the peer hangs up.
async fn serve_echo_transport<T, E, A>(server: EchoMcpServer, transport: T) -> Result<()>
where
    T: IntoTransport<RoleServer, E, A>,
    E: std::error::Error + Send + Sync + 'static,
{
    let service = server.serve(transport).await.map_err(|e| {
        error!("Echo MCP handshake failed: {:?}", e);
        anyhow::anyhow!("Echo MCP handshake failed: {:?}", e)
    })?;

    debug!("Echo MCP peer connected");

    let reason = service.waiting().await.map_err(|e| {
        error!("Echo MCP session aborted: {:?}", e);
        anyhow::anyhow!("Echo MCP session aborted: {:?}", e)
    })?;

    info!("Echo MCP peer disconnected ({:?})", reason);
    Ok(())
}
