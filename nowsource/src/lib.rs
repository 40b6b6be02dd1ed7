//! External data sources for the now-playing overlay.
//!
//! Three JSON resources feed the widget:
//! - the playback status document (`Spotilocal.json`),
//! - the user settings document (`settings.json`),
//! - the canvas lookup endpoint (an optional looping video per track).
//!
//! Each resource is reached through a capability trait so the widget core
//! can be tested against fakes, with a `reqwest`-backed client as the
//! production implementation. Clients are cheap to clone and configurable
//! through chained setters; tests point the base URLs at a mock server.

pub mod canvas;
pub mod error;
pub mod models;
pub mod settings;
pub mod status;

pub use canvas::{CanvasClient, DEFAULT_CANVAS_API};
pub use error::{Error, Result};
pub use settings::{SettingsClient, SETTINGS_FILE};
pub use status::{StatusClient, STATUS_FILE};

use async_trait::async_trait;
use nowmodel::{OverlaySettings, TrackSnapshot};

/// Base URL the overlay's local files are served from by default.
pub const DEFAULT_FILES_BASE: &str = "http://127.0.0.1:8080";

/// Source of playback status snapshots, polled by the widget.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch(&self) -> Result<TrackSnapshot>;
}

/// Source of the three user settings the overlay consumes.
#[async_trait]
pub trait SettingsSource: Send + Sync {
    async fn fetch(&self) -> Result<OverlaySettings>;
}

/// Outcome of a canvas lookup that reached the endpoint and got a
/// well-formed answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasOutcome {
    /// A usable asset location for the track.
    Found(String),
    /// The endpoint answered definitively that no canvas exists for this
    /// track. Not retryable.
    NoCanvas,
}

/// Lookup of the optional looping video asset for a track.
///
/// An `Err` is retryable (network failure, malformed body, non-success
/// status); `Ok(CanvasOutcome::NoCanvas)` is a definitive negative answer
/// that ends the whole operation.
#[async_trait]
pub trait CanvasLookup: Send + Sync {
    async fn lookup(&self, track_id: &str) -> Result<CanvasOutcome>;
}
