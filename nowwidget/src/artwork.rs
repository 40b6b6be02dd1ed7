//! Rate-limited album-art refresh.

use std::sync::Mutex;
use std::time::Duration;

use nowstage::Stage;
use tokio::time::Instant;
use tracing::debug;

/// Minimum spacing between two cache-busted art refreshes.
pub const ART_REFRESH_MIN_INTERVAL: Duration = Duration::from_millis(1000);

/// Re-requests the static album art with a cache-busting token, at most
/// once per [`ART_REFRESH_MIN_INTERVAL`]. The art file on disk changes
/// under the same name when the track changes, so every re-show of the art
/// wants a fresh copy, but back-to-back animation steps must not hammer it.
pub(crate) struct ArtRefresher {
    last_refresh: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl ArtRefresher {
    pub(crate) fn new() -> Self {
        ArtRefresher {
            last_refresh: Mutex::new(None),
            min_interval: ART_REFRESH_MIN_INTERVAL,
        }
    }

    pub(crate) async fn refresh(&self, stage: &dyn Stage) {
        {
            let mut last = self.last_refresh.lock().unwrap();
            let now = Instant::now();
            if matches!(*last, Some(at) if now.duration_since(at) < self.min_interval) {
                return;
            }
            *last = Some(now);
        }
        let token = chrono::Utc::now().timestamp_millis();
        if let Err(e) = stage.refresh_album_art(token).await {
            debug!("album art refresh failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nowstage::{RecordingStage, StageAction};

    #[tokio::test(start_paused = true)]
    async fn refreshes_are_rate_limited() {
        let stage = RecordingStage::new();
        let refresher = ArtRefresher::new();

        refresher.refresh(&stage).await;
        refresher.refresh(&stage).await;
        let refreshes = |stage: &RecordingStage| {
            stage
                .actions()
                .iter()
                .filter(|a| matches!(a, StageAction::RefreshAlbumArt(_)))
                .count()
        };
        assert_eq!(refreshes(&stage), 1);

        tokio::time::sleep(ART_REFRESH_MIN_INTERVAL).await;
        refresher.refresh(&stage).await;
        assert_eq!(refreshes(&stage), 2);
    }
}
