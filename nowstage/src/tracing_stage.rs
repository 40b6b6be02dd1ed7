//! Headless stage backed by `tracing`.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::{Element, Effect, Result, Stage};

/// Default time a show/hide effect takes to settle, matching the overlay
/// page's 500 ms fade.
pub const DEFAULT_EFFECT_DURATION: Duration = Duration::from_millis(500);

#[derive(Debug, Default)]
struct VideoState {
    exists: bool,
    source: Option<String>,
    playing: bool,
}

/// A stage with no rendering runtime behind it.
///
/// Tracks per-element visibility so the idempotence contract holds, logs
/// every effective action, and emulates animation latency by sleeping for
/// a configurable effect duration. This is what the binary runs against
/// when no real overlay page is wired up.
pub struct TracingStage {
    visible: Mutex<HashMap<Element, bool>>,
    video: Mutex<VideoState>,
    labels: Mutex<HashMap<Element, String>>,
    effect_duration: Duration,
}

impl Default for TracingStage {
    fn default() -> Self {
        Self::new()
    }
}

impl TracingStage {
    pub fn new() -> Self {
        TracingStage {
            visible: Mutex::new(HashMap::new()),
            video: Mutex::new(VideoState::default()),
            labels: Mutex::new(HashMap::new()),
            effect_duration: DEFAULT_EFFECT_DURATION,
        }
    }

    /// Override how long a show/hide effect takes to settle.
    pub fn with_effect_duration(mut self, duration: Duration) -> Self {
        self.effect_duration = duration;
        self
    }

    fn is_visible(&self, element: Element) -> bool {
        *self
            .visible
            .lock()
            .unwrap()
            .get(&element)
            .unwrap_or(&false)
    }

    fn set_visible(&self, element: Element, visible: bool) {
        self.visible.lock().unwrap().insert(element, visible);
    }

    async fn settle(&self) {
        if !self.effect_duration.is_zero() {
            tokio::time::sleep(self.effect_duration).await;
        }
    }
}

#[async_trait]
impl Stage for TracingStage {
    async fn show(&self, element: Element, effect: Effect) -> Result<()> {
        if self.is_visible(element) {
            debug!("{element} already visible, show is a no-op");
            return Ok(());
        }
        self.settle().await;
        self.set_visible(element, true);
        info!("showed {element} ({effect:?})");
        Ok(())
    }

    async fn hide(&self, element: Element, effect: Effect) -> Result<()> {
        if !self.is_visible(element) {
            debug!("{element} already hidden, hide is a no-op");
            return Ok(());
        }
        self.settle().await;
        self.set_visible(element, false);
        info!("hid {element} ({effect:?})");
        Ok(())
    }

    async fn set_label(&self, element: Element, text: &str) -> Result<()> {
        self.labels
            .lock()
            .unwrap()
            .insert(element, text.to_string());
        debug!("{element} text set to {text:?}");
        Ok(())
    }

    async fn refresh_album_art(&self, cache_token: i64) -> Result<()> {
        debug!("album art refreshed (cache token {cache_token})");
        Ok(())
    }

    async fn ensure_video_surface(&self) -> Result<()> {
        let mut video = self.video.lock().unwrap();
        if !video.exists {
            video.exists = true;
            info!("video surface created");
        }
        video.source = None;
        video.playing = false;
        drop(video);
        self.set_visible(Element::VideoSurface, false);
        Ok(())
    }

    async fn load_video(&self, url: &str) -> Result<()> {
        // Pretend the media takes one effect duration to buffer.
        self.settle().await;
        self.video.lock().unwrap().source = Some(url.to_string());
        info!("video loaded from {url}");
        Ok(())
    }

    async fn play_video(&self) -> Result<()> {
        self.video.lock().unwrap().playing = true;
        info!("video playback started");
        Ok(())
    }

    async fn clear_video(&self) -> Result<()> {
        let mut video = self.video.lock().unwrap();
        video.source = None;
        video.playing = false;
        drop(video);
        if self.is_visible(Element::VideoSurface) {
            self.set_visible(Element::VideoSurface, false);
            info!("video surface cleared");
        }
        Ok(())
    }

    async fn is_video_showing(&self) -> bool {
        self.is_visible(Element::VideoSurface)
    }

    async fn sync_video_geometry(&self) -> Result<()> {
        Ok(())
    }
}
