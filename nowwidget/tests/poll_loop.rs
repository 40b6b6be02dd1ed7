//! End-to-end poll loop tests against a mock HTTP server.

use std::sync::Arc;

use nowsource::{CanvasClient, SettingsClient, StatusClient};
use nowstage::{Element, RecordingStage};
use nowwidget::PollLoop;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn status_body(playing: bool, title: &str, track: &str) -> serde_json::Value {
    json!({
        "isPlaying": playing,
        "currentArtists": [{"name": "Artist A"}],
        "currentTrack": {"name": title, "uri": format!("spotify:track:{track}")},
        "currentAlbum": {"name": "Album A", "image_large": "Spotilocal_Large.png"}
    })
}

async fn poll_loop_against(server: &MockServer) -> (Arc<RecordingStage>, PollLoop) {
    // The canvas endpoint answers "no canvas" so sessions end immediately.
    Mock::given(method("GET"))
        .and(path("/spotify/canvas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "data": {"canvasesList": []}
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/settings.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(server)
        .await;

    let stage = Arc::new(RecordingStage::new());
    let poll = PollLoop::new(
        Arc::new(StatusClient::new().with_base_url(server.uri())),
        Arc::new(SettingsClient::new().with_base_url(server.uri())),
        Arc::new(CanvasClient::new().with_api_url(format!("{}/spotify/canvas", server.uri()))),
        stage.clone(),
    );
    (stage, poll)
}

#[tokio::test]
async fn completed_tick_commits_the_incoming_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Spotilocal.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body(true, "Song A", "t1")))
        .mount(&server)
        .await;
    let (stage, mut poll) = poll_loop_against(&server).await;

    poll.tick().await;

    assert!(!poll.current().metadata_differs(poll.incoming()));
    assert_eq!(poll.current().title, "Song A");
    assert_eq!(poll.current().track_id, "t1");
    assert!(stage.visible(Element::AlbumArt));
    assert!(stage.visible(Element::TopLabel));
    assert!(stage.visible(Element::BottomLabel));
    assert_eq!(stage.label_text(Element::TopLabel).unwrap(), "Artist A");
    assert_eq!(stage.label_text(Element::BottomLabel).unwrap(), "Song A");
}

#[tokio::test]
async fn skipped_snapshots_never_become_current() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Spotilocal.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body(true, "Song A", "t1")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Spotilocal.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body(true, "Song B", "t2")))
        .mount(&server)
        .await;
    let (_stage, mut poll) = poll_loop_against(&server).await;

    poll.tick().await;
    poll.tick().await;

    assert!(!poll.current().metadata_differs(poll.incoming()));
    assert_eq!(poll.current().title, "Song B");
    assert_eq!(poll.current().track_id, "t2");
}

#[tokio::test]
async fn failed_fetch_skips_the_tick_without_touching_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Spotilocal.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let (stage, mut poll) = poll_loop_against(&server).await;

    poll.tick().await;

    assert_eq!(poll.current().title, "");
    assert!(stage.actions().is_empty());
    assert!(!stage.visible(Element::AlbumArt));
}

#[tokio::test]
async fn pause_fades_the_overlay_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Spotilocal.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body(true, "Song A", "t1")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Spotilocal.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body(false, "Song A", "t1")))
        .mount(&server)
        .await;
    let (stage, mut poll) = poll_loop_against(&server).await;

    poll.tick().await;
    assert!(stage.visible(Element::TopLabel));

    poll.tick().await;
    assert!(!stage.visible(Element::AlbumArt));
    assert!(!stage.visible(Element::TopLabel));
    assert!(!stage.visible(Element::BottomLabel));
    // Metadata did not change, so pausing ran no transition.
    assert_eq!(poll.current().title, "Song A");
}
