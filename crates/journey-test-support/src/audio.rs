//! Scripted audio resource for playback tests.

use std::sync::Mutex;

use async_trait::async_trait;
use journey_core::audio::{AudioEvent, AudioResource};
use journey_core::error::JourneyError;
use tokio::sync::broadcast;

/// A call observed by [`ScriptedAudio`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioRequest {
    /// `set_source(src)`.
    SetSource(String),
    /// `play()`.
    Play,
    /// `pause()`.
    Pause,
}

/// An audio resource that either accepts or rejects every play request and
/// emits the matching event synchronously.
#[derive(Debug)]
pub struct ScriptedAudio {
    rejection: Option<String>,
    events: broadcast::Sender<AudioEvent>,
    requests: Mutex<Vec<AudioRequest>>,
}

impl ScriptedAudio {
    /// A resource that starts playing on every play request.
    #[must_use]
    pub fn accepting() -> Self {
        Self::scripted(None)
    }

    /// A resource that refuses every play request with `reason`.
    #[must_use]
    pub fn rejecting(reason: &str) -> Self {
        Self::scripted(Some(reason.to_owned()))
    }

    fn scripted(rejection: Option<String>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            rejection,
            events,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Emits `event` as if the resource had produced it, e.g. `Ended`.
    pub fn emit(&self, event: AudioEvent) {
        // No subscribers is fine in tests that never build a toggle.
        let _ = self.events.send(event);
    }

    /// Returns a snapshot of all requests so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<AudioRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, request: AudioRequest) {
        self.requests.lock().unwrap().push(request);
    }
}

#[async_trait]
impl AudioResource for ScriptedAudio {
    async fn set_source(&self, src: &str) {
        self.record(AudioRequest::SetSource(src.to_owned()));
    }

    async fn play(&self) -> Result<(), JourneyError> {
        self.record(AudioRequest::Play);
        match &self.rejection {
            None => {
                self.emit(AudioEvent::Started);
                Ok(())
            }
            Some(reason) => {
                self.emit(AudioEvent::Rejected {
                    reason: reason.clone(),
                });
                Err(JourneyError::Playback(reason.clone()))
            }
        }
    }

    async fn pause(&self) {
        self.record(AudioRequest::Pause);
        self.emit(AudioEvent::Paused);
    }

    fn subscribe(&self) -> broadcast::Receiver<AudioEvent> {
        self.events.subscribe()
    }
}
