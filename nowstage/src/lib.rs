//! Rendering seam for the now-playing overlay.
//!
//! The overlay core never touches a real DOM; it drives a [`Stage`], the
//! capability trait behind which the rendering runtime lives. A stage owns
//! four elements (album art, two labels, an optional video surface) and
//! promises idempotent show/hide semantics so that concurrent animation
//! branches can never deadlock a sequence.
//!
//! Two concrete stages ship with this crate:
//! - [`TracingStage`], a headless stage that tracks visibility and logs
//!   every action, used by the binary and as a reference implementation of
//!   the contract;
//! - [`RecordingStage`], a deterministic stage for tests, with scriptable
//!   video outcomes.

mod recording;
mod tracing_stage;

pub use recording::{RecordingStage, StageAction, VideoScript};
pub use tracing_stage::TracingStage;

use async_trait::async_trait;

/// The overlay elements a stage manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    AlbumArt,
    TopLabel,
    BottomLabel,
    VideoSurface,
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Element::AlbumArt => "album art",
            Element::TopLabel => "top label",
            Element::BottomLabel => "bottom label",
            Element::VideoSurface => "video surface",
        };
        f.write_str(name)
    }
}

/// Named animation effects, mirroring the CSS animation vocabulary of the
/// overlay page. The stage decides what each one looks like; the core only
/// picks which one to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    FadeInLeft,
    FadeOutLeft,
    FadeInUp,
    FadeOutDown,
    FadeIn,
    FadeOut,
}

/// Box metrics of an element. The video surface mirrors the album art's
/// metrics so the looping video sits exactly where the art was.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxMetrics {
    pub width: f64,
    pub height: f64,
    pub top: f64,
    pub left: f64,
    pub border_radius: f64,
}

/// Errors a stage can report.
///
/// The sequencer swallows these per animation branch (a failed animation
/// must never block state advancement); the canvas loader reacts to the
/// media variants by falling back to the static art.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    /// A required element is missing from the rendering runtime.
    #[error("element not available: {0}")]
    MissingElement(Element),

    /// The media resource failed to load.
    #[error("media load failed: {0}")]
    MediaLoad(String),

    /// Playback start was refused (autoplay policy, decoder error).
    #[error("media playback refused: {0}")]
    PlaybackRefused(String),

    /// Anything else the rendering runtime reports.
    #[error("{0}")]
    Other(String),
}

/// Result type alias for stage operations.
pub type Result<T> = std::result::Result<T, StageError>;

/// Capability interface to the rendering runtime.
///
/// # Contract
///
/// - `show` and `hide` are idempotent: showing an already-visible element
///   or hiding an already-hidden one is a no-op that still resolves.
/// - `show`/`hide` resolve when the animation completes, not when it
///   starts.
/// - `load_video` resolves on the loaded-data event and errors on the media
///   error event; it carries no timeout of its own. The caller races it
///   against a deadline and cancelling the future must abort the load.
/// - `clear_video` is idempotent and safe to call with no surface attached.
#[async_trait]
pub trait Stage: Send + Sync {
    /// Reveal an element with the given effect.
    async fn show(&self, element: Element, effect: Effect) -> Result<()>;

    /// Hide an element with the given effect.
    async fn hide(&self, element: Element, effect: Effect) -> Result<()>;

    /// Set a label's text. Only meaningful for the two label elements.
    async fn set_label(&self, element: Element, text: &str) -> Result<()>;

    /// Re-request the static album art with a cache-busting token.
    async fn refresh_album_art(&self, cache_token: i64) -> Result<()>;

    /// Create the video surface if it does not exist yet, mirroring the
    /// album art's [`BoxMetrics`], and reset it to the hidden state.
    async fn ensure_video_surface(&self) -> Result<()>;

    /// Begin loading a video into the surface. Resolves once the media is
    /// ready to play, errors if loading fails.
    async fn load_video(&self, url: &str) -> Result<()>;

    /// Attempt to start video playback.
    async fn play_video(&self) -> Result<()>;

    /// Stop playback, detach the source and hide the surface.
    async fn clear_video(&self) -> Result<()>;

    /// Whether the video surface is currently visible.
    async fn is_video_showing(&self) -> bool;

    /// Re-copy the album art's metrics onto the video surface, after a
    /// viewport resize. Headless stages treat this as a no-op.
    async fn sync_video_geometry(&self) -> Result<()>;
}
