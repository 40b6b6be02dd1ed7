//! Bounded-retry loader for the per-track canvas video.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use nowsource::{CanvasLookup, CanvasOutcome};
use nowstage::{Effect, Element, Stage};
use tokio::sync::watch;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use crate::best_effort;

/// How many times the canvas lookup is attempted per track.
pub const MAX_LOOKUP_ATTEMPTS: u32 = 10;

/// Delay between two lookup attempts.
pub const LOOKUP_RETRY_DELAY: Duration = Duration::from_millis(1000);

/// How long the video is given to finish loading before the session is
/// abandoned.
pub const VIDEO_LOAD_TIMEOUT: Duration = Duration::from_millis(50_000);

/// Fetches and attaches the optional looping video for a track, falling
/// back to the static album art at every dead end.
///
/// At most one session runs at a time: a `load` call while another is in
/// flight is a logged no-op. Cancellation is cooperative — pausing or
/// switching tracks does not abort an in-flight session, but the session
/// re-checks the playing flag once the video has loaded and discards stale
/// results.
pub struct CanvasLoader {
    stage: Arc<dyn Stage>,
    lookup: Arc<dyn CanvasLookup>,
    playing: watch::Receiver<bool>,
    loading: AtomicBool,
}

impl CanvasLoader {
    /// `playing` is the poll loop's live view of the playback flag, used
    /// for the precondition and for the staleness check after the load.
    pub fn new(
        stage: Arc<dyn Stage>,
        lookup: Arc<dyn CanvasLookup>,
        playing: watch::Receiver<bool>,
    ) -> Self {
        CanvasLoader {
            stage,
            lookup,
            playing,
            loading: AtomicBool::new(false),
        }
    }

    /// Whether a session is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Try to fetch and attach the canvas video for `track_id`.
    ///
    /// Never fails: every outcome that is not a playing video ends with the
    /// static album art still visible.
    pub async fn load(&self, track_id: &str) {
        // Claim the single-flight slot before the first await; a second
        // call arriving while the opening fade is still settling must
        // already see it taken.
        if self
            .loading
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("canvas load already in flight, skipping request");
            return;
        }
        if track_id.is_empty() || !*self.playing.borrow() {
            debug!("no track id or playback paused, keeping the static art");
            best_effort(self.stage.show(Element::AlbumArt, Effect::FadeIn), "show art").await;
            self.loading.store(false, Ordering::SeqCst);
            return;
        }

        // The static art covers the lookup and load latency.
        best_effort(self.stage.show(Element::AlbumArt, Effect::FadeIn), "show art").await;

        debug!(track_id, "canvas session started");
        self.run_session(track_id).await;
        self.loading.store(false, Ordering::SeqCst);
    }

    async fn run_session(&self, track_id: &str) {
        let Some(url) = self.find_canvas(track_id).await else {
            return;
        };
        self.attach(&url).await;
    }

    /// Query the lookup endpoint with bounded retries. `None` means no
    /// usable asset: either a definitive negative answer or exhaustion.
    async fn find_canvas(&self, track_id: &str) -> Option<String> {
        for attempt in 1..=MAX_LOOKUP_ATTEMPTS {
            debug!(track_id, "canvas lookup attempt {attempt}/{MAX_LOOKUP_ATTEMPTS}");
            match self.lookup.lookup(track_id).await {
                Ok(CanvasOutcome::Found(url)) => return Some(url),
                Ok(CanvasOutcome::NoCanvas) => {
                    debug!(track_id, "track has no canvas, keeping the static art");
                    return None;
                }
                Err(e) => debug!("canvas lookup failed: {e}"),
            }
            if attempt < MAX_LOOKUP_ATTEMPTS {
                sleep(LOOKUP_RETRY_DELAY).await;
            }
        }
        debug!(track_id, "no usable canvas after {MAX_LOOKUP_ATTEMPTS} attempts");
        None
    }

    /// Load the asset into the video surface and start playback.
    ///
    /// Exactly one of timeout, load error or load success takes effect: the
    /// timeout wrapper drops (cancels) the load future when it fires, and
    /// success and error are mutually exclusive by construction.
    async fn attach(&self, url: &str) {
        if let Err(e) = self.stage.ensure_video_surface().await {
            warn!("cannot prepare video surface: {e}");
            return;
        }

        match timeout(VIDEO_LOAD_TIMEOUT, self.stage.load_video(url)).await {
            Err(_) => {
                warn!(
                    "canvas video did not load within {}s, giving up",
                    VIDEO_LOAD_TIMEOUT.as_secs()
                );
                best_effort(self.stage.clear_video(), "clear video").await;
            }
            Ok(Err(e)) => {
                warn!("canvas video failed to load: {e}");
                best_effort(self.stage.clear_video(), "clear video").await;
            }
            Ok(Ok(())) => {
                // The load may have raced a pause; stale results are
                // discarded rather than shown.
                if !*self.playing.borrow() {
                    debug!("playback stopped while the canvas was loading");
                    best_effort(self.stage.clear_video(), "clear video").await;
                    return;
                }
                match self.stage.play_video().await {
                    Ok(()) => {
                        best_effort(
                            self.stage.show(Element::VideoSurface, Effect::FadeIn),
                            "show video",
                        )
                        .await;
                        best_effort(
                            self.stage.hide(Element::AlbumArt, Effect::FadeOut),
                            "hide art",
                        )
                        .await;
                        info!("canvas video playing");
                    }
                    Err(e) => {
                        warn!("canvas playback refused, keeping the static art: {e}");
                        best_effort(self.stage.clear_video(), "clear video").await;
                    }
                }
            }
        }
    }
}
