//! Commands for the Screen Navigation context.

use journey_core::command::Command;
use uuid::Uuid;

/// Command to move from the displayed screen to its successor.
#[derive(Debug, Clone)]
pub struct AdvanceScreen {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The screen identifier the user is advancing from, as routed.
    pub from_screen: String,
}

impl Command for AdvanceScreen {
    fn command_type(&self) -> &'static str {
        "navigation.advance_screen"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to send the user back to the first screen.
#[derive(Debug, Clone)]
pub struct RestartJourney {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for RestartJourney {
    fn command_type(&self) -> &'static str {
        "navigation.restart_journey"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
