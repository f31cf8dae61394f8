//! Silence tools: `silence_alert` and `list_silences`.

use std::sync::Arc;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use super::{parse_arguments, schema_of, to_json, Tool, ToolError};
use crate::client::AlertmanagerApi;
use crate::directory::AlertDirectory;
use crate::models::Silence;
use crate::silence::SilenceOrchestrator;
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SilenceResponse {
    pub silence_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SilencesResponse {
    pub silences: Vec<Silence>,
}

pub async fn silence_alert(
    api: &dyn AlertmanagerApi,
    created_by: &str,
    fingerprint: &str,
    duration: &str,
    comment: &str,
) -> Result<SilenceResponse> {
    info!(fingerprint, duration, comment, "Silencing alert");
    let silence_id = SilenceOrchestrator::new(api, created_by)
        .create_silence_for_alert(fingerprint, duration, comment)
        .await?;
    Ok(SilenceResponse { silence_id })
}

pub async fn list_silences(api: &dyn AlertmanagerApi) -> Result<SilencesResponse> {
    info!("Listing silences");
    let silences = AlertDirectory::new(api).list_silences().await?;
    info!("Retrieved {} silences", silences.len());
    Ok(SilencesResponse { silences })
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SilenceAlertArgs {
    /// The fingerprint of the alert to silence
    pub fingerprint: String,
    /// Duration of the silence, e.g. "2h", "1d", "1w", "1m" (30 days) or "1y" (365 days)
    pub duration: String,
    /// A comment explaining the reason for the silence
    pub comment: String,
}

/// Takes no arguments.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListSilencesArgs {}

pub struct SilenceAlertTool {
    api: Arc<dyn AlertmanagerApi>,
    created_by: String,
}

impl SilenceAlertTool {
    pub fn new(api: Arc<dyn AlertmanagerApi>, created_by: impl Into<String>) -> Self {
        Self {
            api,
            created_by: created_by.into(),
        }
    }
}

#[async_trait]
impl Tool for SilenceAlertTool {
    fn name(&self) -> &str {
        "silence_alert"
    }

    fn description(&self) -> &str {
        "Silence an alert in Alertmanager"
    }

    fn input_schema(&self) -> Value {
        schema_of::<SilenceAlertArgs>()
    }

    async fn call(&self, arguments: Value) -> std::result::Result<Value, ToolError> {
        let args: SilenceAlertArgs = parse_arguments(arguments)?;
        let response = silence_alert(
            self.api.as_ref(),
            &self.created_by,
            &args.fingerprint,
            &args.duration,
            &args.comment,
        )
        .await?;
        to_json(response)
    }
}

pub struct ListSilencesTool {
    api: Arc<dyn AlertmanagerApi>,
}

impl ListSilencesTool {
    pub fn new(api: Arc<dyn AlertmanagerApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Tool for ListSilencesTool {
    fn name(&self) -> &str {
        "list_silences"
    }

    fn description(&self) -> &str {
        "List silences from Alertmanager"
    }

    fn input_schema(&self) -> Value {
        schema_of::<ListSilencesArgs>()
    }

    async fn call(&self, arguments: Value) -> std::result::Result<Value, ToolError> {
        let _: ListSilencesArgs = parse_arguments(arguments)?;
        to_json(list_silences(self.api.as_ref()).await?)
    }
}
