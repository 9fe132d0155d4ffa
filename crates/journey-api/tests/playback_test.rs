//! Integration tests for background music: gate start, client events, toggle.

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_gate_requests_play_and_client_confirms() {
    let app = common::TestApp::new();

    // POST /api/v1/gate
    let (status, _) = app
        .post("/api/v1/gate", &json!({ "code": common::SECRET }))
        .await;
    assert_eq!(status, StatusCode::OK);

    // GET /api/v1/playback: play is pending, nothing is playing yet
    let (_, json) = app.get("/api/v1/playback").await;
    assert_eq!(json["pending"], "play");
    assert_eq!(json["is_playing"], false);

    // POST /api/v1/playback/events: client reports it started
    let (status, _) = app
        .post("/api/v1/playback/events", &json!({ "event": "started" }))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, json) = app.get("/api/v1/playback").await;
    assert_eq!(json["is_playing"], true);
    assert!(json["pending"].is_null());

    // POST /api/v1/playback/toggle: now requests pause
    let (_, json) = app.post("/api/v1/playback/toggle", &json!({})).await;
    assert_eq!(json["requested"], "pause");

    app.post("/api/v1/playback/events", &json!({ "event": "paused" }))
        .await;
    let (_, json) = app.get("/api/v1/playback").await;
    assert_eq!(json["is_playing"], false);
}

#[tokio::test]
async fn test_track_end_stops_playing() {
    let app = common::TestApp::new();
    app.post("/api/v1/playback/events", &json!({ "event": "started" }))
        .await;

    app.post("/api/v1/playback/events", &json!({ "event": "ended" }))
        .await;

    let (_, json) = app.get("/api/v1/playback").await;
    assert_eq!(json["is_playing"], false);
}

#[tokio::test]
async fn test_background_source_is_exposed_after_initialization() {
    let app = common::TestApp::new();
    app.state
        .playback
        .initialize_background("/audio/background-music.mp3")
        .await;

    let (_, json) = app.get("/api/v1/playback").await;

    assert_eq!(json["source"], "/audio/background-music.mp3");
}
