//! Client for the user settings document.

use std::time::Duration;

use async_trait::async_trait;
use nowmodel::OverlaySettings;
use reqwest::Client;

use crate::error::Result;
use crate::{SettingsSource, DEFAULT_FILES_BASE};

/// File name of the settings document under the files base URL.
pub const SETTINGS_FILE: &str = "settings.json";

/// Default timeout for a settings fetch.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

/// HTTP client for the settings document.
///
/// Settings are re-fetched at every transition rather than cached, so edits
/// to the file take effect on the next track change without a restart.
#[derive(Debug, Clone)]
pub struct SettingsClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for SettingsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsClient {
    /// Client with the default local base URL.
    pub fn new() -> Self {
        SettingsClient {
            client: Client::new(),
            base_url: DEFAULT_FILES_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Override the base URL (tests point this at a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Share an existing HTTP connection pool.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    fn settings_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), SETTINGS_FILE)
    }
}

#[async_trait]
impl SettingsSource for SettingsClient {
    async fn fetch(&self) -> Result<OverlaySettings> {
        let settings = self
            .client
            .get(self.settings_url())
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(settings)
    }
}
