//! Echo domain types shared across transports.
//!
//! Every binding (REST, MCP over HTTP, MCP over stdio) decodes into
//! [`EchoRequest`], calls [`echo`], and encodes the resulting
//! [`EchoResponse`]. Nothing in here performs I/O.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Value of `hidden_message` when `HIDDEN_MESSAGE` is not set.
pub const DEFAULT_HIDDEN_MESSAGE: &str = "failed";

/// Process-wide configuration, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoConfig {
    /// Secret returned alongside every echoed message.
    pub hidden_message: String,
}

impl EchoConfig {
    pub fn new(hidden_message: impl Into<String>) -> Self {
        Self {
            hidden_message: hidden_message.into(),
        }
    }
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HIDDEN_MESSAGE)
    }
}

/// Input of the echo operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EchoRequest {
    /// The message to echo back
    pub message: String,
}

/// Output of the echo operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EchoResponse {
    /// The message exactly as it was received
    pub received_message: String,
    /// The secret configured for this process
    pub hidden_message: String,
}

/// Echo `request` back together with the configured secret.
pub fn echo(config: &EchoConfig, request: EchoRequest) -> EchoResponse {
    EchoResponse {
        received_message: request.message,
        hidden_message: config.hidden_message.clone(),
    }
}
