#![allow(dead_code)]
//! Shared fakes for the widget scenario tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use nowmodel::{OverlaySettings, TrackSnapshot};
use nowsource::{CanvasLookup, CanvasOutcome, Error, Result, SettingsSource};

/// One scripted answer of the canvas lookup endpoint.
#[derive(Debug, Clone)]
pub enum LookupStep {
    Found(String),
    NoCanvas,
    Fail,
}

/// A canvas lookup that replays a script; the last step repeats once the
/// script is exhausted. Optionally sleeps before answering, to give tests a
/// window to flip state mid-lookup.
pub struct ScriptedLookup {
    steps: Mutex<Vec<LookupStep>>,
    calls: AtomicUsize,
    delay: Duration,
}

impl ScriptedLookup {
    pub fn new(steps: Vec<LookupStep>) -> Self {
        assert!(!steps.is_empty());
        ScriptedLookup {
            steps: Mutex::new(steps),
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    pub fn always(step: LookupStep) -> Self {
        Self::new(vec![step])
    }

    pub fn found(url: &str) -> Self {
        Self::always(LookupStep::Found(url.to_string()))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CanvasLookup for ScriptedLookup {
    async fn lookup(&self, _track_id: &str) -> Result<CanvasOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let step = {
            let mut steps = self.steps.lock().unwrap();
            if steps.len() > 1 {
                steps.remove(0)
            } else {
                steps[0].clone()
            }
        };
        match step {
            LookupStep::Found(url) => Ok(CanvasOutcome::Found(url)),
            LookupStep::NoCanvas => Ok(CanvasOutcome::NoCanvas),
            LookupStep::Fail => Err(Error::api_error("scripted lookup failure")),
        }
    }
}

/// Settings source answering with a fixed document.
pub struct FixedSettings(pub OverlaySettings);

#[async_trait]
impl SettingsSource for FixedSettings {
    async fn fetch(&self) -> Result<OverlaySettings> {
        Ok(self.0.clone())
    }
}

/// Settings source that always fails, to exercise the default fallback.
pub struct FailingSettings;

#[async_trait]
impl SettingsSource for FailingSettings {
    async fn fetch(&self) -> Result<OverlaySettings> {
        Err(Error::api_error("scripted settings failure"))
    }
}

pub fn snapshot(artist: &str, title: &str, album: &str, track_id: &str) -> TrackSnapshot {
    TrackSnapshot {
        artist: artist.into(),
        title: title.into(),
        album: album.into(),
        track_id: track_id.into(),
        playing: true,
    }
}
