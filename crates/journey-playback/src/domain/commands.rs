//! Commands for the Playback context.

use journey_core::command::Command;
use uuid::Uuid;

/// Flip between playing and paused.
#[derive(Debug, Clone)]
pub struct TogglePlayback {
    /// Correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for TogglePlayback {
    fn command_type(&self) -> &'static str {
        "playback.toggle"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Start playback if it is not already running. Sent on any user interaction.
#[derive(Debug, Clone)]
pub struct RequestPlay {
    /// Correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for RequestPlay {
    fn command_type(&self) -> &'static str {
        "playback.request_play"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
