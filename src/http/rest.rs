//! Plain REST binding: `POST /echo/`.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use super::decode::decode_echo_request;
use crate::domain::{self, EchoConfig};

/// Decode the body, echo it, and answer with the echo response or a 422.
pub async fn echo_message(State(config): State<Arc<EchoConfig>>, body: Bytes) -> Response {
    match decode_echo_request(&body) {
        Ok(request) => {
            debug!(len = request.message.len(), "REST echo");
            Json(domain::echo(&config, request)).into_response()
        }
        Err(e) => {
            debug!("Rejected echo request: {}", e);
            e.into_response()
        }
    }
}
