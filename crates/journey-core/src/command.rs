//! Commands accepted by the journey's bounded contexts.

use uuid::Uuid;

/// A request to change journey state, traced by correlation ID.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Stable name used in logs, e.g. `navigation.advance_screen`.
    fn command_type(&self) -> &'static str;

    /// Correlation ID tying the command to its log lines and advisories.
    fn correlation_id(&self) -> Uuid;
}
