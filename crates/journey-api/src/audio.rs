//! The browser-side audio element, seen from the server.
//!
//! The server cannot play sound. [`ClientAudioBridge`] records the last
//! source and the pending request for the client to pick up, and republishes
//! the events the client reports back.

use std::sync::Mutex;

use async_trait::async_trait;
use journey_core::audio::{AudioEvent, AudioResource};
use journey_core::error::JourneyError;
use journey_playback::application::toggle::PlaybackRequest;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

const EVENT_CAPACITY: usize = 32;

/// What the client should be doing with its audio element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BridgeSnapshot {
    /// Track URL, once initialized.
    pub source: Option<String>,
    /// Request not yet acknowledged by an event.
    pub pending: Option<PlaybackRequest>,
    /// Reason the last play request was refused, until playback next starts.
    pub last_rejection: Option<String>,
}

/// [`AudioResource`] backed by a polling browser client.
#[derive(Debug)]
pub struct ClientAudioBridge {
    events: broadcast::Sender<AudioEvent>,
    snapshot: Mutex<BridgeSnapshot>,
}

impl ClientAudioBridge {
    /// Creates a bridge with no source and nothing pending.
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            events,
            snapshot: Mutex::new(BridgeSnapshot::default()),
        }
    }

    /// Current source and pending request.
    #[must_use]
    pub fn snapshot(&self) -> BridgeSnapshot {
        self.lock().clone()
    }

    /// Records an event reported by the client and republishes it.
    pub fn report(&self, event: AudioEvent) {
        {
            let mut snapshot = self.lock();
            match &event {
                AudioEvent::Started => {
                    snapshot.last_rejection = None;
                    snapshot.pending = None;
                }
                AudioEvent::Rejected { reason } => {
                    snapshot.last_rejection = Some(reason.clone());
                    snapshot.pending = None;
                }
                AudioEvent::Paused | AudioEvent::Ended => {
                    if snapshot.pending == Some(PlaybackRequest::Pause) {
                        snapshot.pending = None;
                    }
                }
            }
        }
        debug!(?event, "client audio event");
        // Nobody listening is not an error; the toggle subscribes at startup.
        let _ = self.events.send(event);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BridgeSnapshot> {
        // A poisoned lock still holds a consistent snapshot.
        self.snapshot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Default for ClientAudioBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioResource for ClientAudioBridge {
    async fn set_source(&self, src: &str) {
        self.lock().source = Some(src.to_owned());
    }

    async fn play(&self) -> Result<(), JourneyError> {
        self.lock().pending = Some(PlaybackRequest::Play);
        Ok(())
    }

    async fn pause(&self) {
        self.lock().pending = Some(PlaybackRequest::Pause);
    }

    fn subscribe(&self) -> broadcast::Receiver<AudioEvent> {
        self.events.subscribe()
    }
}
