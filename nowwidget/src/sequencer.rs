//! The transition sequencer: runs the chosen animation sequence.

use std::sync::Arc;

use nowmodel::{OverlaySettings, TrackSnapshot};
use nowsource::SettingsSource;
use nowstage::{Effect, Element, Stage};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::artwork::ArtRefresher;
use crate::best_effort;
use crate::canvas::CanvasLoader;
use crate::plan::{select_plan, TransitionPlan};

/// Runs one of the five transition sequences against the stage.
///
/// Every animation step is best-effort: a failing step is logged and the
/// sequence carries on, so the caller can always commit the incoming
/// snapshot afterwards. Concurrent steps are joined — all branches settle
/// before the next step starts, and no branch's failure short-circuits the
/// group.
pub struct Sequencer {
    stage: Arc<dyn Stage>,
    settings: Arc<dyn SettingsSource>,
    canvas: Arc<CanvasLoader>,
    art: ArtRefresher,
}

impl Sequencer {
    pub fn new(
        stage: Arc<dyn Stage>,
        settings: Arc<dyn SettingsSource>,
        canvas: Arc<CanvasLoader>,
    ) -> Self {
        Sequencer {
            stage,
            settings,
            canvas,
            art: ArtRefresher::new(),
        }
    }

    /// Run the full transition from `current` to `incoming`, including the
    /// optional delayed disappearance. Resolves when the overlay is settled.
    pub async fn run_transition(&self, current: &TrackSnapshot, incoming: &TrackSnapshot) {
        let settings = match self.settings.fetch().await {
            Ok(settings) => settings,
            Err(e) => {
                warn!("settings fetch failed, using defaults: {e}");
                OverlaySettings::default()
            }
        };
        let top = settings.top_label().resolve(incoming).to_string();
        let bottom = settings.bottom_label().resolve(incoming).to_string();

        let plan = select_plan(current, incoming, &bottom);
        debug!(?plan, "running transition");

        match plan {
            TransitionPlan::Appear => {
                self.reveal_art(incoming, Effect::FadeInUp).await;
                tokio::join!(
                    self.show_label(Element::TopLabel, &top),
                    self.show_label(Element::BottomLabel, &bottom),
                );
            }
            TransitionPlan::Disappear => {
                tokio::join!(
                    self.hide_label(Element::TopLabel),
                    self.hide_label(Element::BottomLabel),
                );
                self.drop_art(Effect::FadeOutDown).await;
            }
            TransitionPlan::AlbumOrTrackChange => {
                tokio::join!(
                    self.drop_art(Effect::FadeOut),
                    self.hide_label(Element::TopLabel),
                    self.hide_label(Element::BottomLabel),
                );
                tokio::join!(
                    self.reveal_art(incoming, Effect::FadeInUp),
                    self.show_label(Element::TopLabel, &top),
                    self.show_label(Element::BottomLabel, &bottom),
                );
            }
            TransitionPlan::ArtistChange => {
                tokio::join!(
                    self.hide_label(Element::TopLabel),
                    self.hide_label(Element::BottomLabel),
                );
                tokio::join!(
                    self.show_label(Element::TopLabel, &top),
                    self.show_label(Element::BottomLabel, &bottom),
                );
            }
            TransitionPlan::BottomRefresh => {
                self.hide_label(Element::BottomLabel).await;
                self.show_label(Element::BottomLabel, &bottom).await;
            }
        }

        if let Some(delay) = settings.disappear_delay() {
            debug!("overlay disappears in {delay:?}");
            sleep(delay).await;
            tokio::join!(
                self.hide_label(Element::TopLabel),
                self.hide_label(Element::BottomLabel),
            );
            self.drop_art(Effect::FadeOutDown).await;
        }
    }

    async fn show_label(&self, element: Element, text: &str) {
        if let Err(e) = self.stage.set_label(element, text).await {
            debug!("cannot set {element} text: {e}");
            return;
        }
        best_effort(self.stage.show(element, Effect::FadeInLeft), "show label").await;
    }

    async fn hide_label(&self, element: Element) {
        best_effort(self.stage.hide(element, Effect::FadeOutLeft), "hide label").await;
    }

    /// Re-show the album art: refresh the cached image, kick off a canvas
    /// load for the incoming track, then run the reveal effect.
    async fn reveal_art(&self, incoming: &TrackSnapshot, effect: Effect) {
        self.art.refresh(self.stage.as_ref()).await;
        if incoming.playing && !incoming.track_id.is_empty() && !self.canvas.is_loading() {
            let loader = Arc::clone(&self.canvas);
            let track_id = incoming.track_id.clone();
            tokio::spawn(async move { loader.load(&track_id).await });
        }
        best_effort(self.stage.show(Element::AlbumArt, effect), "show art").await;
    }

    /// Take the art (and any attached video) out of view.
    async fn drop_art(&self, effect: Effect) {
        best_effort(self.stage.clear_video(), "clear video").await;
        best_effort(self.stage.hide(Element::AlbumArt, effect), "hide art").await;
    }
}
