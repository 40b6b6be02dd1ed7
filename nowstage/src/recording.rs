//! Deterministic stage for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{Element, Effect, Result, Stage, StageError};

/// One effective stage operation, in the order it happened.
///
/// Idempotent no-ops (showing a visible element, hiding a hidden one,
/// clearing a detached video) are not recorded, so a test's action log
/// reads as the sequence of visible changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageAction {
    Show(Element, Effect),
    Hide(Element, Effect),
    SetLabel(Element, String),
    RefreshAlbumArt(i64),
    EnsureVideoSurface,
    LoadVideo(String),
    PlayVideo,
    ClearVideo,
}

/// What the scripted video pipeline should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoScript {
    /// Loading and playback both succeed.
    Play,
    /// The load errors out immediately (media error event).
    FailLoad,
    /// The load never completes; only a caller-side timeout ends it.
    Hang,
    /// Loading succeeds but playback start is refused.
    RefusePlayback,
}

/// A stage that completes everything immediately and records what it did.
///
/// Video behavior is scriptable per test via [`VideoScript`].
pub struct RecordingStage {
    actions: Mutex<Vec<StageAction>>,
    visible: Mutex<HashMap<Element, bool>>,
    labels: Mutex<HashMap<Element, String>>,
    script: Mutex<VideoScript>,
    video_attached: Mutex<bool>,
}

impl Default for RecordingStage {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingStage {
    pub fn new() -> Self {
        RecordingStage {
            actions: Mutex::new(Vec::new()),
            visible: Mutex::new(HashMap::new()),
            labels: Mutex::new(HashMap::new()),
            script: Mutex::new(VideoScript::Play),
            video_attached: Mutex::new(false),
        }
    }

    /// Choose how the scripted video pipeline behaves.
    pub fn script_video(&self, script: VideoScript) {
        *self.script.lock().unwrap() = script;
    }

    /// Pre-set an element's visibility, to start a test mid-scenario.
    pub fn force_visible(&self, element: Element, visible: bool) {
        self.visible.lock().unwrap().insert(element, visible);
    }

    /// The effective operations recorded so far.
    pub fn actions(&self) -> Vec<StageAction> {
        self.actions.lock().unwrap().clone()
    }

    /// Drop the recorded log, keeping visibility state.
    pub fn clear_actions(&self) {
        self.actions.lock().unwrap().clear();
    }

    pub fn visible(&self, element: Element) -> bool {
        *self
            .visible
            .lock()
            .unwrap()
            .get(&element)
            .unwrap_or(&false)
    }

    pub fn label_text(&self, element: Element) -> Option<String> {
        self.labels.lock().unwrap().get(&element).cloned()
    }

    fn record(&self, action: StageAction) {
        self.actions.lock().unwrap().push(action);
    }

    fn set_visible(&self, element: Element, visible: bool) {
        self.visible.lock().unwrap().insert(element, visible);
    }
}

#[async_trait]
impl Stage for RecordingStage {
    async fn show(&self, element: Element, effect: Effect) -> Result<()> {
        if self.visible(element) {
            return Ok(());
        }
        self.set_visible(element, true);
        self.record(StageAction::Show(element, effect));
        Ok(())
    }

    async fn hide(&self, element: Element, effect: Effect) -> Result<()> {
        if !self.visible(element) {
            return Ok(());
        }
        self.set_visible(element, false);
        self.record(StageAction::Hide(element, effect));
        Ok(())
    }

    async fn set_label(&self, element: Element, text: &str) -> Result<()> {
        self.labels
            .lock()
            .unwrap()
            .insert(element, text.to_string());
        self.record(StageAction::SetLabel(element, text.to_string()));
        Ok(())
    }

    async fn refresh_album_art(&self, cache_token: i64) -> Result<()> {
        self.record(StageAction::RefreshAlbumArt(cache_token));
        Ok(())
    }

    async fn ensure_video_surface(&self) -> Result<()> {
        self.set_visible(Element::VideoSurface, false);
        self.record(StageAction::EnsureVideoSurface);
        Ok(())
    }

    async fn load_video(&self, url: &str) -> Result<()> {
        self.record(StageAction::LoadVideo(url.to_string()));
        let script = *self.script.lock().unwrap();
        match script {
            VideoScript::FailLoad => {
                return Err(StageError::MediaLoad("scripted load failure".into()))
            }
            VideoScript::Hang => std::future::pending::<()>().await,
            VideoScript::Play | VideoScript::RefusePlayback => {}
        }
        *self.video_attached.lock().unwrap() = true;
        Ok(())
    }

    async fn play_video(&self) -> Result<()> {
        self.record(StageAction::PlayVideo);
        if *self.script.lock().unwrap() == VideoScript::RefusePlayback {
            return Err(StageError::PlaybackRefused("scripted refusal".into()));
        }
        Ok(())
    }

    async fn clear_video(&self) -> Result<()> {
        let was_attached = {
            let mut attached = self.video_attached.lock().unwrap();
            std::mem::replace(&mut *attached, false)
        };
        if was_attached || self.visible(Element::VideoSurface) {
            self.set_visible(Element::VideoSurface, false);
            self.record(StageAction::ClearVideo);
        }
        Ok(())
    }

    async fn is_video_showing(&self) -> bool {
        self.visible(Element::VideoSurface)
    }

    async fn sync_video_geometry(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_ops_are_not_recorded() {
        let stage = RecordingStage::new();
        stage.hide(Element::TopLabel, Effect::FadeOutLeft).await.unwrap();
        assert!(stage.actions().is_empty());

        stage.show(Element::TopLabel, Effect::FadeInLeft).await.unwrap();
        stage.show(Element::TopLabel, Effect::FadeInLeft).await.unwrap();
        assert_eq!(
            stage.actions(),
            vec![StageAction::Show(Element::TopLabel, Effect::FadeInLeft)]
        );
    }

    #[tokio::test]
    async fn scripted_load_failure() {
        let stage = RecordingStage::new();
        stage.script_video(VideoScript::FailLoad);
        assert!(stage.load_video("https://example.com/c.mp4").await.is_err());
    }

    #[tokio::test]
    async fn scripted_playback_refusal() {
        let stage = RecordingStage::new();
        stage.script_video(VideoScript::RefusePlayback);
        assert!(stage.load_video("https://example.com/c.mp4").await.is_ok());
        assert!(stage.play_video().await.is_err());
    }
}
