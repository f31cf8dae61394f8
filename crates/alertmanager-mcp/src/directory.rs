//! Read path over the upstream alert population.

use tracing::{debug, warn};

use crate::client::AlertmanagerApi;
use crate::models::{Alert, AlertSummary, Silence};
use crate::{Error, Result};

/// How many fingerprints a not-found diagnostic lists before summarizing the rest.
const FINGERPRINT_PREVIEW: usize = 3;

pub struct AlertDirectory<'a> {
    api: &'a dyn AlertmanagerApi,
}

impl<'a> AlertDirectory<'a> {
    pub fn new(api: &'a dyn AlertmanagerApi) -> Self {
        Self { api }
    }

    pub async fn list_alerts(&self, active_only: bool, filter: Option<&str>) -> Result<Vec<Alert>> {
        let filter = filter.filter(|f| !f.is_empty()).map(str::to_string);
        self.api.get_alerts(active_only, filter).await
    }

    pub async fn list_silences(&self) -> Result<Vec<Silence>> {
        self.api.get_silences().await
    }

    /// Fetches every alert, active or not, and returns the first whose
    /// fingerprint matches exactly.
    pub async fn resolve_by_fingerprint(&self, fingerprint: &str) -> Result<Alert> {
        let mut alerts = self.list_alerts(false, None).await?;

        let hit = alerts
            .iter()
            .position(|a| a.fingerprint().is_some_and(|f| !f.is_empty() && f == fingerprint));

        match hit {
            Some(idx) => {
                let alert = alerts.swap_remove(idx);
                debug!(alertname = ?alert.label("alertname"), "Found alert");
                Ok(alert)
            }
            None => {
                warn!(fingerprint, "Alert not found");
                Err(not_found(fingerprint, &alerts))
            }
        }
    }
}

pub fn summarize(alert: &Alert) -> AlertSummary {
    AlertSummary::from(alert)
}

fn not_found(fingerprint: &str, alerts: &[Alert]) -> Error {
    let available: Vec<&str> = alerts
        .iter()
        .filter_map(Alert::fingerprint)
        .filter(|f| !f.is_empty())
        .collect();

    if available.is_empty() {
        return Error::NotFound(format!(
            "Alert with fingerprint '{}' not found. No alerts available.",
            fingerprint
        ));
    }

    let mut preview = available
        .iter()
        .take(FINGERPRINT_PREVIEW)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    if available.len() > FINGERPRINT_PREVIEW {
        preview.push_str(&format!(
            " (and {} more)",
            available.len() - FINGERPRINT_PREVIEW
        ));
    }

    Error::NotFound(format!(
        "Alert with fingerprint '{}' not found. Available fingerprints: {}",
        fingerprint, preview
    ))
}
