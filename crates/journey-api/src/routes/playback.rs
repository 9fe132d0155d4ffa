//! Routes for the Playback bounded context.

use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{
    Json, Router,
    routing::{get, post},
};
use journey_core::advisory::Advisory;
use journey_core::audio::AudioEvent;
use journey_playback::application::toggle::{
    self, PlayOutcome, PlaybackRequest, ToggleOutcome,
};
use journey_playback::domain::commands;
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::state::AppState;

/// How long an event report waits for the toggle to mirror it.
const EVENT_SETTLE_TIMEOUT: Duration = Duration::from_secs(1);

/// Response body for GET /.
#[derive(Debug, Serialize)]
pub struct PlaybackResponse {
    /// Whether the client last reported that music is playing.
    pub is_playing: bool,
    /// Track the client should load.
    pub source: Option<String>,
    /// Request the client should carry out.
    pub pending: Option<PlaybackRequest>,
    /// Set while the last play request stands refused.
    pub advisory: Option<Advisory>,
}

/// GET /
#[instrument(skip(state))]
async fn get_playback(State(state): State<AppState>) -> Json<PlaybackResponse> {
    let snapshot = state.audio.snapshot();
    Json(PlaybackResponse {
        is_playing: state.playback.is_playing(),
        source: snapshot.source,
        pending: snapshot.pending,
        advisory: snapshot
            .last_rejection
            .map(|reason| Advisory::autoplay_blocked(reason, state.clock.as_ref())),
    })
}

/// POST /toggle
#[instrument(skip(state))]
async fn toggle_playback(State(state): State<AppState>) -> Json<ToggleOutcome> {
    let command = commands::TogglePlayback {
        correlation_id: Uuid::new_v4(),
    };
    Json(toggle::handle_toggle_playback(&command, &state.playback).await)
}

/// POST /interaction
#[instrument(skip(state))]
async fn interaction(State(state): State<AppState>) -> Json<PlayOutcome> {
    let command = commands::RequestPlay {
        correlation_id: Uuid::new_v4(),
    };
    Json(toggle::handle_request_play(&command, &state.playback).await)
}

/// POST /events
///
/// Returns once the toggle reflects the reported event.
#[instrument(skip(state))]
async fn report_event(State(state): State<AppState>, Json(event): Json<AudioEvent>) -> StatusCode {
    let playing = matches!(event, AudioEvent::Started);
    if let AudioEvent::Rejected { reason } = &event {
        warn!(reason = %reason, "client refused to play audio");
    }
    state.audio.report(event);
    if !state.playback.wait_until(playing, EVENT_SETTLE_TIMEOUT).await {
        warn!(playing, "playback state did not settle after event");
    }
    info!(is_playing = state.playback.is_playing(), "audio event applied");
    StatusCode::NO_CONTENT
}

/// Returns the router for the playback context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_playback))
        .route("/toggle", post(toggle_playback))
        .route("/interaction", post(interaction))
        .route("/events", post(report_event))
}
