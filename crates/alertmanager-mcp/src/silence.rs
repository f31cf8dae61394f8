use chrono::Utc;
use tracing::{debug, info};

use crate::client::AlertmanagerApi;
use crate::directory::AlertDirectory;
use crate::duration::parse_duration;
use crate::models::PostableSilence;
use crate::{Error, Result};

/// Creates silences that match one resolved alert exactly.
pub struct SilenceOrchestrator<'a> {
    api: &'a dyn AlertmanagerApi,
    created_by: &'a str,
}

impl<'a> SilenceOrchestrator<'a> {
    pub fn new(api: &'a dyn AlertmanagerApi, created_by: &'a str) -> Self {
        Self { api, created_by }
    }

    /// Silences the alert with `fingerprint` from now until now + `duration`.
    ///
    /// Returns the upstream silence ID, or `None` when upstream omits it.
    pub async fn create_silence_for_alert(
        &self,
        fingerprint: &str,
        duration: &str,
        comment: &str,
    ) -> Result<Option<String>> {
        let alert = AlertDirectory::new(self.api)
            .resolve_by_fingerprint(fingerprint)
            .await?;
        let matchers = alert.matchers();

        let length = parse_duration(duration)?;
        let starts_at = Utc::now();
        let ends_at = starts_at
            .checked_add_signed(length)
            .ok_or_else(|| Error::InvalidDuration(duration.to_string()))?;

        debug!(matchers = matchers.len(), %ends_at, "Creating silence");
        let created = self
            .api
            .create_silence(PostableSilence {
                matchers,
                starts_at,
                ends_at,
                comment: comment.to_string(),
                created_by: self.created_by.to_string(),
            })
            .await?;

        info!(silence_id = ?created.silence_id, "Silence created");
        Ok(created.silence_id)
    }
}
