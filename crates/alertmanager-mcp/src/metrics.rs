use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref TOOL_CALLS_TOTAL: IntCounterVec = {
        let counter = IntCounterVec::new(
            Opts::new(
                "alertmanager_mcp_tool_calls_total",
                "Total number of tool invocations by outcome.",
            ),
            &["tool", "outcome"],
        )
        .expect("valid tool call metric");
        REGISTRY
            .register(Box::new(counter.clone()))
            .expect("Failed to register TOOL_CALLS_TOTAL");
        counter
    };
    pub static ref UPSTREAM_REQUESTS_TOTAL: IntCounterVec = {
        let counter = IntCounterVec::new(
            Opts::new(
                "alertmanager_mcp_upstream_requests_total",
                "Total number of Alertmanager API requests by response status.",
            ),
            &["method", "path", "status"],
        )
        .expect("valid upstream request metric");
        REGISTRY
            .register(Box::new(counter.clone()))
            .expect("Failed to register UPSTREAM_REQUESTS_TOTAL");
        counter
    };
}

/// `outcome` is `ok` or an [`crate::Error::kind`] tag.
pub fn record_tool_call(tool: &str, outcome: &str) {
    TOOL_CALLS_TOTAL.with_label_values(&[tool, outcome]).inc();
}

/// A missing status means the request never got a response.
pub fn record_upstream_request(method: &str, path: &str, status: Option<u16>) {
    let status = status.map_or_else(|| "error".to_string(), |s| s.to_string());
    UPSTREAM_REQUESTS_TOTAL
        .with_label_values(&[method, path, status.as_str()])
        .inc();
}

// Function to gather metrics for exposition
pub fn gather_metrics() -> String {
    let mut buffer = vec![];
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
    }
    String::from_utf8(buffer).unwrap_or_default()
}
