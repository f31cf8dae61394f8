use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use http::{header, StatusCode};
use serde_json::json;
use std::sync::Arc;

use crate::mcp::McpServer;
use crate::metrics::gather_metrics;

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

pub async fn metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        gather_metrics(),
    )
}

/// One JSON-RPC message per request body.
pub async fn mcp(State(mcp): State<Arc<McpServer>>, body: String) -> Response {
    match mcp.handle_message(&body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
