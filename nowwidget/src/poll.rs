//! The poll loop driving the overlay.

use std::sync::Arc;
use std::time::Duration;

use nowmodel::TrackSnapshot;
use nowsource::{CanvasLookup, SettingsSource, StatusSource};
use nowstage::Stage;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::canvas::CanvasLoader;
use crate::playback::PlaybackHandler;
use crate::reconciler::Reconciler;
use crate::sequencer::Sequencer;

/// Pause between two poll cycles, measured from the completion of a tick's
/// work — ticks never overlap, a long transition simply delays the next
/// fetch.
pub const POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Fetches the playback status on a fixed cadence and reacts to changes.
///
/// This is the only unbounded-lifetime operation in the widget. No error
/// escapes a tick: a failed status fetch skips the tick, and everything
/// downstream (sequencer, playback handler, canvas loader) swallows its own
/// failures.
pub struct PollLoop {
    status: Arc<dyn StatusSource>,
    sequencer: Sequencer,
    playback: PlaybackHandler,
    reconciler: Reconciler,
    playing_tx: watch::Sender<bool>,
    last_playing: bool,
    interval: Duration,
}

impl PollLoop {
    /// Wire up the whole widget against the given collaborators.
    pub fn new(
        status: Arc<dyn StatusSource>,
        settings: Arc<dyn SettingsSource>,
        lookup: Arc<dyn CanvasLookup>,
        stage: Arc<dyn Stage>,
    ) -> Self {
        let (playing_tx, playing_rx) = watch::channel(false);
        let canvas = Arc::new(CanvasLoader::new(
            Arc::clone(&stage),
            lookup,
            playing_rx,
        ));
        let sequencer = Sequencer::new(Arc::clone(&stage), settings, Arc::clone(&canvas));
        let playback = PlaybackHandler::new(stage, canvas);
        PollLoop {
            status,
            sequencer,
            playback,
            reconciler: Reconciler::default(),
            playing_tx,
            last_playing: false,
            interval: POLL_INTERVAL,
        }
    }

    /// Override the poll cadence.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// The last fully rendered snapshot.
    pub fn current(&self) -> &TrackSnapshot {
        self.reconciler.current()
    }

    /// The latest fetched snapshot.
    pub fn incoming(&self) -> &TrackSnapshot {
        self.reconciler.incoming()
    }

    /// Run one poll cycle: fetch, diff, and run whatever the diff asks for.
    pub async fn tick(&mut self) {
        let snapshot = match self.status.fetch().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("status fetch failed, skipping tick: {e}");
                return;
            }
        };

        let playing = snapshot.playing;
        let metadata_changed = self.reconciler.observe(snapshot);
        self.playing_tx.send_replace(playing);

        if playing != self.last_playing {
            info!(playing, "playback state changed");
            self.playback
                .on_change(playing, self.reconciler.incoming())
                .await;
            self.last_playing = playing;
        }

        if metadata_changed {
            self.sequencer
                .run_transition(self.reconciler.current(), self.reconciler.incoming())
                .await;
            self.reconciler.commit();
        }
    }

    /// Poll until process teardown.
    pub async fn run(mut self) {
        info!("poll loop started");
        loop {
            self.tick().await;
            sleep(self.interval).await;
        }
    }
}
