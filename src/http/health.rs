//! Liveness probe.

use axum::Json;
use serde_json::{json, Value};

/// `GET /health`: always `{"status": "ok"}`.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
