//! Alertmanager v2 HTTP client.
//!
//! One request per call, no retries. Any transport failure or non-2xx status
//! comes back as [`Error::Transport`].

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

use crate::config::AlertmanagerConfig;
use crate::metrics;
use crate::models::{Alert, PostableSilence, Silence, SilenceCreated};
use crate::{Error, Result};

pub const ALERTS_PATH: &str = "/api/v2/alerts";
pub const SILENCES_PATH: &str = "/api/v2/silences";

/// The upstream calls the tools depend on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertmanagerApi: Send + Sync {
    /// `GET /api/v2/alerts?active=<bool>[&filter=<query>]`
    async fn get_alerts(&self, active_only: bool, filter: Option<String>) -> Result<Vec<Alert>>;

    /// `GET /api/v2/silences`
    async fn get_silences(&self) -> Result<Vec<Silence>>;

    /// `POST /api/v2/silences`
    async fn create_silence(&self, silence: PostableSilence) -> Result<SilenceCreated>;
}

pub struct AlertmanagerClient {
    config: AlertmanagerConfig,
    client: Client,
}

impl AlertmanagerClient {
    pub fn new(config: AlertmanagerConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        if config.basic_auth().is_some() {
            debug!("HTTP Basic Auth configured for Alertmanager client");
        } else {
            debug!("No authentication configured for Alertmanager client");
        }

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> Result<Url> {
        // Keep any path prefix on the base URL, e.g. `https://host/alertmanager/`.
        let mut base = self.config.url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path.trim_start_matches('/'))
            .map_err(|e| Error::Config(format!("Invalid Alertmanager URL for {}: {}", path, e)))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let mut request = self
            .client
            .request(method, self.url(path)?)
            .timeout(self.config.timeout);

        if let Some((username, password)) = self.config.basic_auth() {
            request = request.basic_auth(username, Some(password));
        }

        Ok(request)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T> {
        let transport_error = |status: Option<u16>, message: String| {
            error!(%method, path, ?status, %message, "Alertmanager API error");
            metrics::record_upstream_request(method.as_str(), path, status);
            Error::Transport {
                method: method.to_string(),
                path: path.to_string(),
                status,
                message,
            }
        };

        debug!(%method, path, "Alertmanager API request");

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(None, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                status.to_string()
            } else {
                format!("{}: {}", status, body.trim())
            };
            return Err(transport_error(Some(status.as_u16()), message));
        }

        debug!(%method, path, status = status.as_u16(), "Alertmanager API response");

        let parsed = response
            .json::<T>()
            .await
            .map_err(|e| transport_error(Some(status.as_u16()), format!("invalid JSON body: {}", e)))?;

        metrics::record_upstream_request(method.as_str(), path, Some(status.as_u16()));
        Ok(parsed)
    }
}

#[async_trait]
impl AlertmanagerApi for AlertmanagerClient {
    async fn get_alerts(&self, active_only: bool, filter: Option<String>) -> Result<Vec<Alert>> {
        let mut params = vec![("active", active_only.to_string())];
        if let Some(filter) = filter.filter(|f| !f.is_empty()) {
            params.push(("filter", filter));
        }
        debug!(?params, "Request params");

        let request = self.request(Method::GET, ALERTS_PATH)?.query(&params);
        self.send(Method::GET, ALERTS_PATH, request).await
    }

    async fn get_silences(&self) -> Result<Vec<Silence>> {
        let request = self.request(Method::GET, SILENCES_PATH)?;
        self.send(Method::GET, SILENCES_PATH, request).await
    }

    async fn create_silence(&self, silence: PostableSilence) -> Result<SilenceCreated> {
        let request = self.request(Method::POST, SILENCES_PATH)?.json(&silence);
        self.send(Method::POST, SILENCES_PATH, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn client(base: &str) -> AlertmanagerClient {
        AlertmanagerClient::new(AlertmanagerConfig {
            url: Url::parse(base).unwrap(),
            username: None,
            password: None,
            timeout: Duration::from_secs(30),
            created_by: "alertmanager-mcp".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn joins_api_paths_onto_the_base_url() {
        let url = client("http://fake-alertmanager").url(ALERTS_PATH).unwrap();
        assert_eq!(url.as_str(), "http://fake-alertmanager/api/v2/alerts");
    }

    #[test]
    fn keeps_a_base_path_prefix() {
        let url = client("https://example.com/alertmanager")
            .url(SILENCES_PATH)
            .unwrap();
        assert_eq!(url.as_str(), "https://example.com/alertmanager/api/v2/silences");
    }
}
