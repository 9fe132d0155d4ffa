//! Derived playback state.

use journey_core::audio::AudioEvent;
use serde::Serialize;

/// Whether music is playing, as last reported by the audio resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlaybackState {
    /// `true` between `Started` and the next `Paused`, `Ended` or `Rejected`.
    pub is_playing: bool,
}

impl PlaybackState {
    /// Folds one resource event into the state.
    pub fn apply(&mut self, event: &AudioEvent) {
        self.is_playing = matches!(event, AudioEvent::Started);
    }
}
