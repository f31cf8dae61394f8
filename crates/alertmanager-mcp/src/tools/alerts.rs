//! Alert read tools: `get_alerts` and `get_alert_details`.

use std::sync::Arc;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use super::{parse_arguments, schema_of, to_json, Tool, ToolError};
use crate::client::AlertmanagerApi;
use crate::directory::{summarize, AlertDirectory};
use crate::models::{Alert, AlertSummary};
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertsResponse {
    pub alerts: Vec<AlertSummary>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertDetailsResponse {
    pub alert: Alert,
}

pub async fn get_alerts(
    api: &dyn AlertmanagerApi,
    active_only: bool,
    filter: Option<&str>,
) -> Result<AlertsResponse> {
    info!(active_only, ?filter, "Getting alerts");
    let alerts = AlertDirectory::new(api)
        .list_alerts(active_only, filter)
        .await?;

    let summaries: Vec<AlertSummary> = alerts.iter().map(summarize).collect();
    info!("Retrieved {} alerts", summaries.len());
    Ok(AlertsResponse {
        count: summaries.len(),
        alerts: summaries,
    })
}

pub async fn get_alert_details(
    api: &dyn AlertmanagerApi,
    fingerprint: &str,
) -> Result<AlertDetailsResponse> {
    info!(fingerprint, "Getting alert details");
    let alert = AlertDirectory::new(api)
        .resolve_by_fingerprint(fingerprint)
        .await?;
    Ok(AlertDetailsResponse { alert })
}

fn default_active_only() -> bool {
    true
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetAlertsArgs {
    /// Fetch only active alerts
    #[serde(default = "default_active_only")]
    pub active_only: bool,
    /// Optional Alertmanager filter query string, e.g. `severity="critical"`
    #[serde(default)]
    pub filter: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetAlertDetailsArgs {
    /// The fingerprint of the alert to retrieve
    pub fingerprint: String,
}

pub struct GetAlertsTool {
    api: Arc<dyn AlertmanagerApi>,
}

impl GetAlertsTool {
    pub fn new(api: Arc<dyn AlertmanagerApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Tool for GetAlertsTool {
    fn name(&self) -> &str {
        "get_alerts"
    }

    fn description(&self) -> &str {
        "Get alerts from Alertmanager (summary view)"
    }

    fn input_schema(&self) -> Value {
        schema_of::<GetAlertsArgs>()
    }

    async fn call(&self, arguments: Value) -> std::result::Result<Value, ToolError> {
        let args: GetAlertsArgs = parse_arguments(arguments)?;
        let response = get_alerts(self.api.as_ref(), args.active_only, args.filter.as_deref()).await?;
        to_json(response)
    }
}

pub struct GetAlertDetailsTool {
    api: Arc<dyn AlertmanagerApi>,
}

impl GetAlertDetailsTool {
    pub fn new(api: Arc<dyn AlertmanagerApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Tool for GetAlertDetailsTool {
    fn name(&self) -> &str {
        "get_alert_details"
    }

    fn description(&self) -> &str {
        "Get detailed information for a specific alert"
    }

    fn input_schema(&self) -> Value {
        schema_of::<GetAlertDetailsArgs>()
    }

    async fn call(&self, arguments: Value) -> std::result::Result<Value, ToolError> {
        let args: GetAlertDetailsArgs = parse_arguments(arguments)?;
        to_json(get_alert_details(self.api.as_ref(), &args.fingerprint).await?)
    }
}
