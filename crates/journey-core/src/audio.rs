//! The single audio resource shared by the gate and the playback toggle.
//!
//! Playback truth lives in the resource: callers request play or pause and
//! learn the outcome only from the events it broadcasts.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::JourneyError;

/// Notification emitted by an [`AudioResource`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AudioEvent {
    /// Playback began.
    Started,
    /// Playback paused.
    Paused,
    /// The track finished.
    Ended,
    /// A play request was refused.
    Rejected {
        /// Why the resource refused, e.g. an autoplay policy.
        reason: String,
    },
}

/// An audio output that can be started and paused.
#[async_trait]
pub trait AudioResource: Send + Sync {
    /// Sets the track to play.
    async fn set_source(&self, src: &str);

    /// Requests playback.
    ///
    /// `Ok` means the request was accepted for processing, not that audio is
    /// playing; wait for [`AudioEvent::Started`] for that.
    ///
    /// # Errors
    ///
    /// Returns `JourneyError::Playback` if the resource refuses outright.
    async fn play(&self) -> Result<(), JourneyError>;

    /// Requests a pause. Pausing never fails.
    async fn pause(&self);

    /// Subscribes to the resource's events.
    fn subscribe(&self) -> broadcast::Receiver<AudioEvent>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_are_tagged_snake_case() {
        let rejected: AudioEvent =
            serde_json::from_str(r#"{"event":"rejected","reason":"NotAllowedError"}"#).unwrap();

        assert_eq!(
            rejected,
            AudioEvent::Rejected {
                reason: "NotAllowedError".to_owned()
            }
        );
        assert_eq!(
            serde_json::to_value(AudioEvent::Ended).unwrap(),
            serde_json::json!({ "event": "ended" })
        );
    }
}
