//! Client for the playback status document.

use std::time::Duration;

use async_trait::async_trait;
use nowmodel::TrackSnapshot;
use reqwest::Client;
use tracing::trace;

use crate::error::Result;
use crate::models::StatusDocument;
use crate::{StatusSource, DEFAULT_FILES_BASE};

/// File name of the status document under the files base URL.
pub const STATUS_FILE: &str = "Spotilocal.json";

/// Default timeout for a status fetch. Kept short: the document is served
/// locally and a hung fetch would stall the poll cadence.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

/// HTTP client for the playback status document.
#[derive(Debug, Clone)]
pub struct StatusClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for StatusClient {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusClient {
    /// Client with the default local base URL.
    pub fn new() -> Self {
        StatusClient {
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

    fn status_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), STATUS_FILE)
    }
}

#[async_trait]
impl StatusSource for StatusClient {
    async fn fetch(&self) -> Result<TrackSnapshot> {
        let document: StatusDocument = self
            .client
            .get(self.status_url())
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let snapshot = document.into_snapshot();
        trace!(?snapshot, "fetched status");
        Ok(snapshot)
    }
}
