//! Snapshot reconciliation.

use nowmodel::TrackSnapshot;

/// Owns the two snapshots the overlay lives by.
///
/// `current` is what the overlay has fully rendered; `incoming` is the
/// latest snapshot the poll loop fetched. `current` only advances through
/// [`Reconciler::commit`], which the poll loop calls after a transition
/// completed — regardless of whether any animation step inside it failed,
/// so a partial animation failure can never wedge the displayed state.
#[derive(Debug, Default)]
pub struct Reconciler {
    current: TrackSnapshot,
    incoming: TrackSnapshot,
}

impl Reconciler {
    /// Record the latest fetched snapshot. Returns true when its metadata
    /// differs from the rendered state, i.e. a transition must run.
    pub fn observe(&mut self, snapshot: TrackSnapshot) -> bool {
        self.incoming = snapshot;
        self.incoming.metadata_differs(&self.current)
    }

    /// The last fully rendered snapshot.
    pub fn current(&self) -> &TrackSnapshot {
        &self.current
    }

    /// The latest fetched snapshot.
    pub fn incoming(&self) -> &TrackSnapshot {
        &self.incoming
    }

    /// Advance the rendered state to the incoming metadata.
    pub fn commit(&mut self) {
        let incoming = self.incoming.clone();
        self.current.commit_metadata_from(&incoming);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(title: &str, track_id: &str) -> TrackSnapshot {
        TrackSnapshot {
            artist: "Artist".into(),
            title: title.into(),
            album: "Album".into(),
            track_id: track_id.into(),
            playing: true,
        }
    }

    #[test]
    fn observe_detects_metadata_changes() {
        let mut reconciler = Reconciler::default();
        assert!(reconciler.observe(snapshot("Song A", "t1")));
        reconciler.commit();
        // Same metadata again: nothing to do.
        assert!(!reconciler.observe(snapshot("Song A", "t1")));
        assert!(reconciler.observe(snapshot("Song B", "t2")));
    }

    #[test]
    fn incoming_is_overwritten_on_every_observation() {
        let mut reconciler = Reconciler::default();
        reconciler.observe(snapshot("Song A", "t1"));
        reconciler.observe(snapshot("Song B", "t2"));
        assert_eq!(reconciler.incoming().title, "Song B");
        reconciler.commit();
        // The skipped intermediate snapshot never becomes current.
        assert_eq!(reconciler.current().title, "Song B");
        assert_eq!(reconciler.current().track_id, "t2");
    }

    #[test]
    fn current_only_advances_on_commit() {
        let mut reconciler = Reconciler::default();
        reconciler.observe(snapshot("Song A", "t1"));
        assert_eq!(reconciler.current().title, "");
        reconciler.commit();
        assert_eq!(reconciler.current().title, "Song A");
    }
}
