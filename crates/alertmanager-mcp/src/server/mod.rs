mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::mcp::McpServer;

pub struct Server {
    mcp: Arc<McpServer>,
}

impl Server {
    pub fn new(mcp: Arc<McpServer>) -> Self {
        Self { mcp }
    }

    pub fn build_router(self) -> Router {
        Router::new()
            .route("/health", get(routes::health))
            .route("/metrics", get(routes::metrics))
            .route("/mcp", post(routes::mcp))
            .layer(TraceLayer::new_for_http())
            .with_state(self.mcp)
    }

    pub async fn start(self, addr: &str) -> std::io::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("MCP HTTP transport listening on {}", listener.local_addr()?);
        axum::serve(listener, self.build_router()).await
    }
}
