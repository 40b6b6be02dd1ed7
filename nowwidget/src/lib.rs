//! Core of the now-playing overlay widget.
//!
//! The widget polls a playback status source, reconciles the fetched
//! snapshot against what is currently displayed, and drives one of five
//! mutually exclusive transition sequences through a [`nowstage::Stage`].
//! An optional looping "canvas" video per track is acquired by a
//! bounded-retry loader that falls back to the static album art.
//!
//! Everything runs on cooperative timers in a single task plus short-lived
//! spawned canvas sessions; the only mutual-exclusion resource is the
//! loader's single-flight flag.
//!
//! Entry point: [`PollLoop::new`] wires the pieces together and
//! [`PollLoop::run`] drives them forever.

pub mod artwork;
pub mod canvas;
pub mod plan;
pub mod playback;
pub mod poll;
pub mod reconciler;
pub mod sequencer;

pub use artwork::ART_REFRESH_MIN_INTERVAL;
pub use canvas::{CanvasLoader, LOOKUP_RETRY_DELAY, MAX_LOOKUP_ATTEMPTS, VIDEO_LOAD_TIMEOUT};
pub use plan::{select_plan, TransitionPlan};
pub use playback::PlaybackHandler;
pub use poll::{PollLoop, POLL_INTERVAL};
pub use reconciler::Reconciler;
pub use sequencer::Sequencer;

use std::future::Future;

use tracing::debug;

/// Await a stage operation and swallow its failure.
///
/// Animation steps are fire-and-forget from the state machine's point of
/// view: a step that fails must not block the sequence or the snapshot
/// commit that follows it.
pub(crate) async fn best_effort(op: impl Future<Output = nowstage::Result<()>>, what: &str) {
    if let Err(e) = op.await {
        debug!("{what} failed: {e}");
    }
}
