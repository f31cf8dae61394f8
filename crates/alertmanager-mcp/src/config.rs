use std::time::Duration;

use url::Url;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CREATED_BY: &str = "alertmanager-mcp";
pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct Config {
    pub alertmanager: AlertmanagerConfig,
    pub server: ServerConfig,
}

#[derive(Clone)]
pub struct AlertmanagerConfig {
    pub url: Url,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout: Duration,
    pub created_by: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: String,
}

impl AlertmanagerConfig {
    /// Basic auth credentials, only when both halves are configured.
    pub fn basic_auth(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(user), Some(pass)) => Some((user, pass)),
            _ => None,
        }
    }
}

// Keep the password out of `{:?}` output.
impl std::fmt::Debug for AlertmanagerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertmanagerConfig")
            .field("url", &self.url.as_str())
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .field("created_by", &self.created_by)
            .finish()
    }
}

impl Config {
    pub fn load() -> crate::Result<Self> {
        // Load environment variables from .env file if it exists
        let _ = dotenvy::dotenv();
        tracing::debug!("Loading Alertmanager MCP configuration from environment");

        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        let auth_status = if config.alertmanager.basic_auth().is_some() {
            "enabled"
        } else {
            "disabled"
        };

        tracing::info!(
            url = %config.alertmanager.url,
            timeout_secs = config.alertmanager.timeout.as_secs(),
            auth = auth_status,
            created_by = %config.alertmanager.created_by,
            "Alertmanager config loaded"
        );

        Ok(config)
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup("ALERTMANAGER_URL")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                tracing::error!("Missing required environment variable: ALERTMANAGER_URL");
                crate::Error::Config(
                    "Missing required environment variable: ALERTMANAGER_URL".to_string(),
                )
            })?;
        let url = Url::parse(raw_url.trim()).map_err(|e| {
            crate::Error::Config(format!("Invalid ALERTMANAGER_URL value {:?}: {}", raw_url, e))
        })?;
        // `localhost:9093` parses with scheme `localhost` and can't take API paths
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            tracing::error!(value = %raw_url, "ALERTMANAGER_URL is not an http(s) base URL");
            return Err(crate::Error::Config(format!(
                "Invalid ALERTMANAGER_URL value {:?}: expected an http:// or https:// URL",
                raw_url
            )));
        }

        let timeout_raw =
            lookup("ALERTMANAGER_TIMEOUT").unwrap_or_else(|| DEFAULT_TIMEOUT_SECS.to_string());
        let timeout_secs = match timeout_raw.trim().parse::<i64>() {
            Ok(secs) if secs > 0 => secs as u64,
            _ => {
                tracing::error!(value = %timeout_raw, "Invalid ALERTMANAGER_TIMEOUT value");
                return Err(crate::Error::Config(format!(
                    "Invalid ALERTMANAGER_TIMEOUT value: must be positive integer, got {:?}",
                    timeout_raw
                )));
            }
        };

        Ok(Config {
            alertmanager: AlertmanagerConfig {
                url,
                username: lookup("ALERTMANAGER_USERNAME").filter(|s| !s.is_empty()),
                password: lookup("ALERTMANAGER_PASSWORD").filter(|s| !s.is_empty()),
                timeout: Duration::from_secs(timeout_secs),
                created_by: lookup("ALERTMANAGER_CREATED_BY")
                    .unwrap_or_else(|| DEFAULT_CREATED_BY.to_string()),
            },
            server: ServerConfig {
                addr: lookup("MCP_HTTP_ADDR").unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string()),
            },
        })
    }
}
