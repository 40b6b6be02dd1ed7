//! Wire models for the three fetched JSON resources.
//!
//! The player's status document mixes camelCase keys with one snake_case
//! straggler (`image_large`), and every metadata field may be absent; the
//! models here are tolerant and collapse anything missing to an empty
//! string on conversion.

use nowmodel::TrackSnapshot;
use serde::Deserialize;

/// Prefix stripped from the track URI to obtain the opaque track id.
pub const TRACK_URI_PREFIX: &str = "spotify:track:";

/// The playback status document (`Spotilocal.json`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusDocument {
    pub is_playing: bool,
    pub current_artists: Vec<ArtistRef>,
    pub current_track: Option<TrackRef>,
    pub current_album: Option<AlbumRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArtistRef {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrackRef {
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AlbumRef {
    pub name: String,
    pub image_large: String,
}

impl StatusDocument {
    /// Flatten the document into a snapshot. The first artist wins; a track
    /// URI without the expected prefix yields an empty track id.
    pub fn into_snapshot(self) -> TrackSnapshot {
        let track = self.current_track.unwrap_or_default();
        let album = self.current_album.unwrap_or_default();
        let track_id = track
            .uri
            .strip_prefix(TRACK_URI_PREFIX)
            .unwrap_or_default()
            .to_string();
        TrackSnapshot {
            artist: self
                .current_artists
                .into_iter()
                .next()
                .unwrap_or_default()
                .name,
            title: track.name,
            album: album.name,
            track_id,
            playing: self.is_playing,
        }
    }
}

/// Response of the canvas lookup endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CanvasResponse {
    pub ok: bool,
    pub data: Option<CanvasData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CanvasData {
    #[serde(rename = "canvasesList")]
    pub canvases_list: Option<Vec<CanvasRef>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CanvasRef {
    #[serde(rename = "canvasUrl")]
    pub canvas_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_status_document() {
        let json = r#"{
            "isPlaying": true,
            "currentArtists": [{"name": "Artist A"}, {"name": "Artist B"}],
            "currentTrack": {"name": "Song A", "uri": "spotify:track:abc123"},
            "currentAlbum": {"name": "Album A", "image_large": "large.png"}
        }"#;
        let doc: StatusDocument = serde_json::from_str(json).unwrap();
        let snapshot = doc.into_snapshot();
        assert_eq!(snapshot.artist, "Artist A");
        assert_eq!(snapshot.title, "Song A");
        assert_eq!(snapshot.album, "Album A");
        assert_eq!(snapshot.track_id, "abc123");
        assert!(snapshot.playing);
    }

    #[test]
    fn missing_fields_collapse_to_empty() {
        let doc: StatusDocument = serde_json::from_str("{}").unwrap();
        let snapshot = doc.into_snapshot();
        assert_eq!(snapshot, TrackSnapshot::default());
    }

    #[test]
    fn unprefixed_uri_yields_empty_track_id() {
        let json = r#"{"currentTrack": {"name": "Song", "uri": "spotify:episode:xyz"}}"#;
        let doc: StatusDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.into_snapshot().track_id, "");
    }

    #[test]
    fn canvas_response_variants() {
        let found: CanvasResponse = serde_json::from_str(
            r#"{"ok": true, "data": {"canvasesList": [{"canvasUrl": "https://c/v.mp4"}]}}"#,
        )
        .unwrap();
        assert!(found.ok);
        let list = found.data.unwrap().canvases_list.unwrap();
        assert_eq!(list[0].canvas_url, "https://c/v.mp4");

        let empty: CanvasResponse =
            serde_json::from_str(r#"{"ok": true, "data": {"canvasesList": []}}"#).unwrap();
        assert!(empty.data.unwrap().canvases_list.unwrap().is_empty());

        let missing_list: CanvasResponse =
            serde_json::from_str(r#"{"ok": true, "data": {}}"#).unwrap();
        assert!(missing_list.data.unwrap().canvases_list.is_none());
    }
}
