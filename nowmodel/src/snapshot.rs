//! Playback snapshots and change detection.

use serde::{Deserialize, Serialize};

/// A point-in-time view of what the player reports.
///
/// Two snapshots exist at all times in the widget: `current` (the last
/// snapshot fully rendered to the overlay) and `incoming` (the latest
/// fetched one). All string fields are opaque and may be empty; an empty
/// `track_id` means the player did not expose a usable track identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSnapshot {
    pub artist: String,
    pub title: String,
    pub album: String,
    pub track_id: String,
    pub playing: bool,
}

impl TrackSnapshot {
    /// True when any of the four metadata fields differ.
    ///
    /// This is the poll-loop change predicate. It is intentionally not the
    /// same predicate the transition sequencer uses to pick a branch; the
    /// sequencer re-examines the fields in its own priority order.
    pub fn metadata_differs(&self, other: &TrackSnapshot) -> bool {
        self.title != other.title
            || self.artist != other.artist
            || self.album != other.album
            || self.track_id != other.track_id
    }

    /// Copy the four metadata fields from `other`, leaving `playing` alone.
    ///
    /// The playing flag is tracked separately by the poll loop; committing
    /// a rendered transition only advances the displayed metadata.
    pub fn commit_metadata_from(&mut self, other: &TrackSnapshot) {
        self.artist = other.artist.clone();
        self.title = other.title.clone();
        self.album = other.album.clone();
        self.track_id = other.track_id.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(artist: &str, title: &str, album: &str, track_id: &str) -> TrackSnapshot {
        TrackSnapshot {
            artist: artist.into(),
            title: title.into(),
            album: album.into(),
            track_id: track_id.into(),
            playing: true,
        }
    }

    #[test]
    fn metadata_differs_ignores_playing_flag() {
        let a = snapshot("Artist", "Song", "Album", "t1");
        let mut b = a.clone();
        b.playing = false;
        assert!(!a.metadata_differs(&b));
    }

    #[test]
    fn metadata_differs_on_each_field() {
        let base = snapshot("Artist", "Song", "Album", "t1");
        assert!(base.metadata_differs(&snapshot("Other", "Song", "Album", "t1")));
        assert!(base.metadata_differs(&snapshot("Artist", "Other", "Album", "t1")));
        assert!(base.metadata_differs(&snapshot("Artist", "Song", "Other", "t1")));
        assert!(base.metadata_differs(&snapshot("Artist", "Song", "Album", "t2")));
        assert!(!base.metadata_differs(&base.clone()));
    }

    #[test]
    fn commit_copies_metadata_only() {
        let mut current = TrackSnapshot::default();
        let incoming = snapshot("Artist", "Song", "Album", "t1");
        current.commit_metadata_from(&incoming);
        assert_eq!(current.artist, "Artist");
        assert_eq!(current.title, "Song");
        assert_eq!(current.album, "Album");
        assert_eq!(current.track_id, "t1");
        assert!(!current.playing);
    }
}
