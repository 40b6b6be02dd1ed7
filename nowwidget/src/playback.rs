//! Playing/paused visibility handling.

use std::sync::Arc;

use nowmodel::TrackSnapshot;
use nowstage::{Effect, Element, Stage};
use tracing::debug;

use crate::best_effort;
use crate::canvas::CanvasLoader;

/// Reacts to flips of the playing flag.
///
/// This is pure visibility work, independent of the transition sequencer:
/// pausing fades the whole overlay out, resuming brings the art and labels
/// back and (when possible) restarts a canvas acquisition.
pub struct PlaybackHandler {
    stage: Arc<dyn Stage>,
    canvas: Arc<CanvasLoader>,
}

impl PlaybackHandler {
    pub fn new(stage: Arc<dyn Stage>, canvas: Arc<CanvasLoader>) -> Self {
        PlaybackHandler { stage, canvas }
    }

    /// Handle a playing-flag transition. `incoming` is the snapshot that
    /// carried the new flag.
    pub async fn on_change(&self, playing: bool, incoming: &TrackSnapshot) {
        if !playing {
            debug!("paused, fading the overlay out");
            best_effort(self.stage.clear_video(), "clear video").await;
            tokio::join!(
                best_effort(self.stage.hide(Element::AlbumArt, Effect::FadeOut), "hide art"),
                best_effort(self.stage.hide(Element::TopLabel, Effect::FadeOut), "hide label"),
                best_effort(
                    self.stage.hide(Element::BottomLabel, Effect::FadeOut),
                    "hide label"
                ),
            );
            return;
        }

        if self.canvas.is_loading() {
            // A session already in flight will sort the art/video out.
            return;
        }
        debug!("playing, bringing the overlay back");
        if !incoming.track_id.is_empty() {
            let loader = Arc::clone(&self.canvas);
            let track_id = incoming.track_id.clone();
            tokio::spawn(async move { loader.load(&track_id).await });
        }
        if self.stage.is_video_showing().await {
            // The looping video is still up; the art stays out of its way.
            best_effort(self.stage.hide(Element::AlbumArt, Effect::FadeOut), "hide art").await;
        } else {
            best_effort(self.stage.show(Element::AlbumArt, Effect::FadeIn), "show art").await;
        }
        tokio::join!(
            best_effort(self.stage.show(Element::TopLabel, Effect::FadeIn), "show label"),
            best_effort(
                self.stage.show(Element::BottomLabel, Effect::FadeIn),
                "show label"
            ),
        );
    }
}
