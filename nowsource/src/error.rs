//! Error types for the overlay's external sources.

/// Result type alias for source operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fetching the status, settings or canvas
/// lookup resources.
///
/// All of these are transient from the widget's point of view: the poll
/// loop skips the tick, the settings consumer falls back to defaults, and
/// the canvas loader retries.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The endpoint answered but not with a usable payload
    #[error("API error: {0}")]
    ApiError(String),
}

impl Error {
    /// Create an API error
    pub fn api_error(msg: impl Into<String>) -> Self {
        Self::ApiError(msg.into())
    }
}
