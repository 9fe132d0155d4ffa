//! The playback toggle and its command handlers.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use journey_core::advisory::Advisory;
use journey_core::audio::{AudioEvent, AudioResource};
use journey_core::clock::Clock;
use journey_core::command::Command;
use serde::Serialize;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::commands::{RequestPlay, TogglePlayback};
use crate::domain::state::PlaybackState;

/// What a toggle asked the resource to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackRequest {
    /// Start playing.
    Play,
    /// Pause.
    Pause,
}

/// Result of a toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleOutcome {
    /// The request sent to the resource.
    pub requested: PlaybackRequest,
    /// Set when a play request was refused.
    pub advisory: Option<Advisory>,
}

/// Result of an any-interaction play request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayOutcome {
    /// `false` when music was already playing and nothing was requested.
    pub requested: bool,
    /// Set when the play request was refused.
    pub advisory: Option<Advisory>,
}

/// Play/pause control over the shared audio resource.
///
/// `is_playing` is mirrored from the resource's own events by a background
/// task; the toggle never writes it.
pub struct PlaybackToggle {
    resource: Arc<dyn AudioResource>,
    clock: Arc<dyn Clock>,
    state: watch::Receiver<PlaybackState>,
    listener: JoinHandle<()>,
    initialized: AtomicBool,
}

impl fmt::Debug for PlaybackToggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackToggle")
            .field("state", &*self.state.borrow())
            .field("initialized", &self.initialized.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

impl PlaybackToggle {
    /// Subscribes to `resource` and starts mirroring its events.
    ///
    /// Must be called inside a Tokio runtime. The subscription is taken
    /// before this returns, so no event emitted afterwards is missed.
    #[must_use]
    pub fn new(resource: Arc<dyn AudioResource>, clock: Arc<dyn Clock>) -> Self {
        let events = resource.subscribe();
        let (tx, state) = watch::channel(PlaybackState::default());
        let listener = tokio::spawn(mirror_events(events, tx));
        Self {
            resource,
            clock,
            state,
            listener,
            initialized: AtomicBool::new(false),
        }
    }

    /// Whether the resource last reported that it is playing.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state.borrow().is_playing
    }

    /// A receiver that observes every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PlaybackState> {
        self.state.clone()
    }

    /// Waits until the mirrored state reports `playing`, for at most
    /// `within`. Returns whether it did.
    pub async fn wait_until(&self, playing: bool, within: Duration) -> bool {
        let mut state = self.state.clone();
        matches!(
            tokio::time::timeout(within, state.wait_for(|s| s.is_playing == playing)).await,
            Ok(Ok(_))
        )
    }

    /// Sets the background track on the resource. Only the first call has an
    /// effect; returns whether this call set it.
    pub async fn initialize_background(&self, src: &str) -> bool {
        if self.initialized.swap(true, Ordering::AcqRel) {
            debug!(src, "background audio already initialized");
            return false;
        }
        self.resource.set_source(src).await;
        info!(src, "background audio initialized");
        true
    }

    /// Requests pause when playing and play otherwise.
    pub async fn toggle_play_pause(&self) -> ToggleOutcome {
        if self.is_playing() {
            self.resource.pause().await;
            ToggleOutcome {
                requested: PlaybackRequest::Pause,
                advisory: None,
            }
        } else {
            ToggleOutcome {
                requested: PlaybackRequest::Play,
                advisory: self.request_play().await,
            }
        }
    }

    /// Requests play. A refusal is logged and returned as an advisory; it
    /// never fails the caller.
    pub async fn request_play(&self) -> Option<Advisory> {
        match self.resource.play().await {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, "play request rejected");
                Some(Advisory::autoplay_blocked(e.to_string(), self.clock.as_ref()))
            }
        }
    }
}

impl Drop for PlaybackToggle {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

async fn mirror_events(
    mut events: broadcast::Receiver<AudioEvent>,
    tx: watch::Sender<PlaybackState>,
) {
    loop {
        match events.recv().await {
            Ok(event) => {
                debug!(?event, "audio event");
                tx.send_modify(|state| state.apply(&event));
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "audio event listener lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// Handles the `TogglePlayback` command.
pub async fn handle_toggle_playback(
    command: &TogglePlayback,
    toggle: &PlaybackToggle,
) -> ToggleOutcome {
    let outcome = toggle.toggle_play_pause().await;
    info!(
        correlation_id = %command.correlation_id(),
        requested = ?outcome.requested,
        "playback toggled"
    );
    outcome
}

/// Handles the `RequestPlay` command: requests play unless already playing.
pub async fn handle_request_play(command: &RequestPlay, toggle: &PlaybackToggle) -> PlayOutcome {
    if toggle.is_playing() {
        return PlayOutcome {
            requested: false,
            advisory: None,
        };
    }
    let advisory = toggle.request_play().await;
    info!(correlation_id = %command.correlation_id(), "play requested on interaction");
    PlayOutcome {
        requested: true,
        advisory,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use journey_core::advisory::AdvisoryKind;
    use journey_test_support::{AudioRequest, FixedClock, ScriptedAudio};
    use uuid::Uuid;

    use super::*;

    fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()))
    }

    async fn settle(toggle: &PlaybackToggle, playing: bool) {
        assert!(
            toggle.wait_until(playing, Duration::from_secs(1)).await,
            "state did not settle at is_playing = {playing}"
        );
    }

    #[tokio::test]
    async fn test_toggle_from_paused_requests_play_and_mirrors_started() {
        // Arrange
        let audio = Arc::new(ScriptedAudio::accepting());
        let toggle = PlaybackToggle::new(audio.clone(), clock());

        // Act
        let outcome = toggle.toggle_play_pause().await;

        // Assert
        assert_eq!(outcome.requested, PlaybackRequest::Play);
        assert!(outcome.advisory.is_none());
        settle(&toggle, true).await;
        assert!(toggle.is_playing());
        assert_eq!(audio.requests(), vec![AudioRequest::Play]);
    }

    #[tokio::test]
    async fn test_toggle_while_playing_requests_pause() {
        // Arrange
        let audio = Arc::new(ScriptedAudio::accepting());
        let toggle = PlaybackToggle::new(audio.clone(), clock());
        toggle.toggle_play_pause().await;
        settle(&toggle, true).await;

        // Act
        let outcome = toggle.toggle_play_pause().await;

        // Assert
        assert_eq!(outcome.requested, PlaybackRequest::Pause);
        settle(&toggle, false).await;
        assert_eq!(
            audio.requests(),
            vec![AudioRequest::Play, AudioRequest::Pause]
        );
    }

    #[tokio::test]
    async fn test_rejected_play_yields_advisory_and_stays_paused() {
        // Arrange
        let audio = Arc::new(ScriptedAudio::rejecting("NotAllowedError"));
        let toggle = PlaybackToggle::new(audio, clock());

        // Act
        let outcome = toggle.toggle_play_pause().await;

        // Assert
        let advisory = outcome.advisory.unwrap();
        assert_eq!(advisory.kind, AdvisoryKind::AutoplayBlocked);
        assert!(advisory.detail.contains("NotAllowedError"));
        assert!(!toggle.is_playing());
    }

    #[tokio::test]
    async fn test_track_ending_clears_is_playing() {
        let audio = Arc::new(ScriptedAudio::accepting());
        let toggle = PlaybackToggle::new(audio.clone(), clock());
        toggle.request_play().await;
        settle(&toggle, true).await;

        audio.emit(AudioEvent::Ended);

        settle(&toggle, false).await;
    }

    #[tokio::test]
    async fn test_background_source_is_set_once() {
        let audio = Arc::new(ScriptedAudio::accepting());
        let toggle = PlaybackToggle::new(audio.clone(), clock());

        assert!(toggle.initialize_background("/audio/a.mp3").await);
        assert!(!toggle.initialize_background("/audio/b.mp3").await);

        assert_eq!(
            audio.requests(),
            vec![AudioRequest::SetSource("/audio/a.mp3".to_owned())]
        );
    }

    #[tokio::test]
    async fn test_request_play_on_interaction_is_skipped_while_playing() {
        // Arrange
        let audio = Arc::new(ScriptedAudio::accepting());
        let toggle = PlaybackToggle::new(audio.clone(), clock());
        let command = RequestPlay {
            correlation_id: Uuid::new_v4(),
        };
        let first = handle_request_play(&command, &toggle).await;
        settle(&toggle, true).await;

        // Act
        let second = handle_request_play(&command, &toggle).await;

        // Assert
        assert!(first.requested);
        assert!(!second.requested);
        assert_eq!(audio.requests(), vec![AudioRequest::Play]);
    }

    #[tokio::test]
    async fn test_handle_toggle_playback_delegates_to_toggle() {
        let audio = Arc::new(ScriptedAudio::accepting());
        let toggle = PlaybackToggle::new(audio, clock());
        let command = TogglePlayback {
            correlation_id: Uuid::new_v4(),
        };

        let outcome = handle_toggle_playback(&command, &toggle).await;

        assert_eq!(outcome.requested, PlaybackRequest::Play);
    }
}
