//! Client for the canvas lookup endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::trace;
use url::Url;

use crate::error::{Error, Result};
use crate::models::CanvasResponse;
use crate::{CanvasLookup, CanvasOutcome};

/// Default canvas lookup endpoint.
pub const DEFAULT_CANVAS_API: &str = "https://api.paxsenix.biz.id/spotify/canvas";

/// Default timeout for a lookup request. The caller already retries, so a
/// single attempt should fail fast.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// HTTP client for the canvas lookup endpoint.
///
/// Distinguishes a definitive "no canvas for this track" answer from
/// retryable failures through [`CanvasOutcome`]: anything malformed or
/// unsuccessful becomes an `Err` and the loader retries it.
#[derive(Debug, Clone)]
pub struct CanvasClient {
    client: Client,
    api_url: String,
    timeout: Duration,
}

impl Default for CanvasClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasClient {
    /// Client against the default endpoint.
    pub fn new() -> Self {
        CanvasClient {
            client: Client::new(),
            api_url: DEFAULT_CANVAS_API.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Override the endpoint URL (tests point this at a mock server).
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
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

    fn lookup_url(&self, track_id: &str) -> Result<Url> {
        let mut url = Url::parse(&self.api_url)?;
        url.query_pairs_mut().append_pair("id", track_id);
        Ok(url)
    }
}

#[async_trait]
impl CanvasLookup for CanvasClient {
    async fn lookup(&self, track_id: &str) -> Result<CanvasOutcome> {
        let response: CanvasResponse = self
            .client
            .get(self.lookup_url(track_id)?)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !response.ok {
            return Err(Error::api_error("canvas endpoint reported ok=false"));
        }
        let canvases = response
            .data
            .and_then(|data| data.canvases_list)
            .ok_or_else(|| Error::api_error("canvas response missing canvases list"))?;

        match canvases.into_iter().next() {
            Some(canvas) if !canvas.canvas_url.is_empty() => {
                trace!(track_id, url = %canvas.canvas_url, "canvas found");
                Ok(CanvasOutcome::Found(canvas.canvas_url))
            }
            Some(_) => Err(Error::api_error("canvas entry carries no URL")),
            // An explicitly empty list is the endpoint's way of saying the
            // track has no canvas at all.
            None => Ok(CanvasOutcome::NoCanvas),
        }
    }
}
