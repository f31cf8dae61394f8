//! Agent Tools Module
//!
//! The four Alertmanager operations exposed to agents, each as a [`Tool`]
//! with a JSON-Schema description of its arguments.

pub mod alerts;
pub mod silences;

use std::sync::Arc;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::client::AlertmanagerApi;
use crate::metrics;

pub use alerts::{
    get_alert_details, get_alerts, AlertDetailsResponse, AlertsResponse, GetAlertDetailsTool,
    GetAlertsTool,
};
pub use silences::{
    list_silences, silence_alert, ListSilencesTool, SilenceAlertTool, SilenceResponse,
    SilencesResponse,
};

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Failed(#[from] crate::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Common trait for all agent tools
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool name
    fn name(&self) -> &str;

    /// Get the tool description for the LLM
    fn description(&self) -> &str;

    /// JSON Schema of the `arguments` object
    fn input_schema(&self) -> Value;

    async fn call(&self, arguments: Value) -> Result<Value, ToolError>;
}

/// Tools in registration order.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// The full Alertmanager tool set over one shared client.
    pub fn alertmanager(api: Arc<dyn AlertmanagerApi>, created_by: impl Into<String>) -> Self {
        Self::new()
            .with(GetAlertsTool::new(api.clone()))
            .with(GetAlertDetailsTool::new(api.clone()))
            .with(SilenceAlertTool::new(api.clone(), created_by))
            .with(ListSilencesTool::new(api))
    }

    pub fn with(mut self, tool: impl Tool + 'static) -> Self {
        self.tools.push(Box::new(tool));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Tool> {
        self.tools.iter().map(|t| t.as_ref())
    }

    pub async fn call(&self, name: &str, arguments: Value) -> Result<Value, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        info!(tool = name, "Calling tool");
        let result = tool.call(arguments).await;

        let outcome = match &result {
            Ok(_) => "ok",
            Err(ToolError::Failed(e)) => e.kind(),
            Err(ToolError::Internal(_)) => "internal_error",
            Err(_) => "invalid_arguments",
        };
        metrics::record_tool_call(name, outcome);
        result
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Missing arguments are treated as an empty object.
pub(crate) fn parse_arguments<T: DeserializeOwned>(arguments: Value) -> Result<T, ToolError> {
    let arguments = if arguments.is_null() {
        Value::Object(Default::default())
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

pub(crate) fn schema_of<T: JsonSchema>() -> Value {
    let mut schema = serde_json::to_value(schemars::schema_for!(T)).unwrap_or_default();
    if let Some(obj) = schema.as_object_mut() {
        obj.remove("$schema");
        obj.remove("title");
    }
    schema
}

pub(crate) fn to_json<T: serde::Serialize>(value: T) -> Result<Value, ToolError> {
    serde_json::to_value(value)
        .map_err(|e| ToolError::Internal(format!("unserializable result: {}", e)))
}
