//! Alertmanager API v2 payloads.
//!
//! Upstream owns the schema, so every field beyond the ones this crate reads
//! is carried through `extra` untouched. Label and annotation maps keep the
//! order upstream sent them in.

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Longest annotation text kept in an [`AlertSummary`], in characters.
pub const ALERT_SUMMARY_MAX_LENGTH: usize = 200;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    #[serde(default)]
    pub labels: IndexMap<String, String>,
    #[serde(default)]
    pub annotations: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AlertStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Alert {
    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels.get(name).map(String::as_str)
    }

    pub fn annotation(&self, name: &str) -> Option<&str> {
        self.annotations.get(name).map(String::as_str)
    }

    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    pub fn state(&self) -> Option<&str> {
        self.status.as_ref().and_then(|s| s.state.as_deref())
    }

    /// One exact-match matcher per label, in label order.
    pub fn matchers(&self) -> Vec<Matcher> {
        self.labels
            .iter()
            .map(|(name, value)| Matcher::exact(name, value))
            .collect()
    }
}

/// Compact projection of an [`Alert`] for list views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertSummary {
    pub fingerprint: Option<String>,
    pub alertname: Option<String>,
    pub severity: Option<String>,
    pub namespace: Option<String>,
    pub pod: Option<String>,
    pub state: Option<String>,
    pub starts_at: Option<String>,
    pub summary: String,
}

impl From<&Alert> for AlertSummary {
    fn from(alert: &Alert) -> Self {
        let owned = |v: Option<&str>| v.map(str::to_string);
        let text = alert
            .annotation("summary")
            .or_else(|| alert.annotation("description"))
            .unwrap_or("");

        AlertSummary {
            fingerprint: alert.fingerprint.clone(),
            alertname: owned(alert.label("alertname")),
            severity: owned(alert.label("severity")),
            namespace: owned(alert.label("namespace")),
            pod: owned(alert.label("pod")),
            state: owned(alert.state()),
            starts_at: alert.starts_at.clone(),
            summary: text.chars().take(ALERT_SUMMARY_MAX_LENGTH).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matcher {
    pub name: String,
    pub value: String,
    pub is_regex: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_equal: Option<bool>,
}

impl Matcher {
    pub fn exact(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            is_regex: false,
            is_equal: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Silence {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub matchers: Vec<Matcher>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SilenceStatus>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SilenceStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /api/v2/silences`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostableSilence {
    pub matchers: Vec<Matcher>,
    #[serde(serialize_with = "iso8601")]
    pub starts_at: DateTime<Utc>,
    #[serde(serialize_with = "iso8601")]
    pub ends_at: DateTime<Utc>,
    pub comment: String,
    pub created_by: String,
}

/// Response of `POST /api/v2/silences`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SilenceCreated {
    #[serde(rename = "silenceID", default)]
    pub silence_id: Option<String>,
}

// `2025-12-11T10:00:00.123456+00:00`
fn iso8601<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Micros, false))
}
