//! MCP (Model Context Protocol) server implementation using rmcp.
//!
//! Exposes the echo operation as a single tool named `echo`. The same
//! server type is served over streamable HTTP (stateless) or stdio, see
//! [`handlers`].

use std::sync::Arc;

use rmcp::{
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::{Json, Parameters},
    model::*,
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use tracing::debug;

mod handlers;

pub use handlers::{run_mcp_server, streamable_http_service, MCP_PATH};

use crate::domain::{self, EchoConfig, EchoRequest, EchoResponse};

/// Echo MCP Server
#[derive(Clone)]
pub struct EchoMcpServer {
    config: Arc<EchoConfig>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl EchoMcpServer {
    /// Create a new echo MCP server
    pub fn new(config: Arc<EchoConfig>) -> Self {
        Self {
            config,
            tool_router: Self::tool_router(),
        }
    }

    /// Echoes back the received message.
    #[tool(
        name = "echo",
        description = "Echoes back the received message. Returns the message exactly as it was received together with this server's hidden message."
    )]
    fn echo(
        &self,
        Parameters(request): Parameters<EchoRequest>,
    ) -> Result<Json<EchoResponse>, McpError> {
        debug!(len = request.message.len(), "MCP echo");
        Ok(Json(domain::echo(&self.config, request)))
    }
}

#[tool_handler]
impl ServerHandler for EchoMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "echo-probe".to_string(),
                title: None,
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Call the `echo` tool with a `message`; it returns the message and a hidden message."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::ServiceExt;
    use serde_json::json;

    fn server(secret: &str) -> EchoMcpServer {
        EchoMcpServer::new(Arc::new(EchoConfig::new(secret)))
    }

    fn call_params(arguments: serde_json::Value) -> CallToolRequestParam {
        serde_json::from_value(json!({ "name": "echo", "arguments": arguments })).unwrap()
    }

    #[test]
    fn test_echo_tool_direct() {
        let server = server("s3cret");
        let Json(response) = server
            .echo(Parameters(EchoRequest {
                message: "hi".to_string(),
            }))
            .unwrap();
        assert_eq!(response.received_message, "hi");
        assert_eq!(response.hidden_message, "s3cret");
    }

    #[test]
    fn test_tool_listing() {
        let tools = server("s3cret").tool_router.list_all();
        assert_eq!(tools.len(), 1);

        let tool = &tools[0];
        assert_eq!(tool.name, "echo");
        assert!(tool
            .description
            .as_deref()
            .unwrap_or_default()
            .contains("Echoes back"));

        let input = serde_json::Value::Object((*tool.input_schema).clone());
        assert_eq!(input["properties"]["message"]["type"], "string");
        assert_eq!(input["required"], json!(["message"]));

        let output = tool.output_schema.as_ref().expect("output schema");
        let output = serde_json::Value::Object((**output).clone());
        assert_eq!(output["properties"]["received_message"]["type"], "string");
        assert_eq!(output["properties"]["hidden_message"]["type"], "string");
    }

    #[test]
    fn test_server_info() {
        let info = server("s3cret").get_info();
        assert_eq!(info.server_info.name, "echo-probe");
        assert!(info.capabilities.tools.is_some());
    }

    #[tokio::test]
    async fn test_echo_over_client() {
        let (server_transport, client_transport) = tokio::io::duplex(4096);
        tokio::spawn(async move {
            if let Ok(running) = server("s3cret").serve(server_transport).await {
                let _ = running.waiting().await;
            }
        });

        let client = ().serve(client_transport).await.unwrap();

        let tools = client.list_tools(Default::default()).await.unwrap();
        assert_eq!(tools.tools.len(), 1);

        let result = client
            .call_tool(call_params(json!({ "message": "héllo 👋" })))
            .await
            .unwrap();
        assert_ne!(result.is_error, Some(true));
        assert_eq!(
            result.structured_content,
            Some(json!({ "received_message": "héllo 👋", "hidden_message": "s3cret" }))
        );

        client.cancel().await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_arguments_rejected() {
        let (server_transport, client_transport) = tokio::io::duplex(4096);
        tokio::spawn(async move {
            if let Ok(running) = server("s3cret").serve(server_transport).await {
                let _ = running.waiting().await;
            }
        });

        let client = ().serve(client_transport).await.unwrap();

        assert!(client.call_tool(call_params(json!({}))).await.is_err());
        assert!(client
            .call_tool(call_params(json!({ "message": 7 })))
            .await
            .is_err());

        client.cancel().await.unwrap();
    }
}
