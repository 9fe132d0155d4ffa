//! Commands for the Gate context.

use journey_core::command::Command;
use uuid::Uuid;

/// Command to check a candidate secret code.
#[derive(Debug, Clone)]
pub struct SubmitCode {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The code exactly as entered.
    pub code: String,
}

impl Command for SubmitCode {
    fn command_type(&self) -> &'static str {
        "gate.submit_code"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
