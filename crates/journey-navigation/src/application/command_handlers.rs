//! Command handlers for the Screen Navigation context.
//!
//! Each handler resolves the navigator, persists the new cursor, and only
//! then reports the route to move to, so a reload right after advancing
//! resumes at the new screen.

use journey_catalog::domain::catalog::ScreenSource;
use journey_core::advisory::Advisory;
use journey_core::busy::BusyFlag;
use journey_core::clock::Clock;
use journey_core::command::Command;
use journey_core::error::JourneyError;
use journey_core::screen_id::ScreenId;
use journey_core::store::{CURRENT_SCREEN_KEY, KeyValueStore};
use tracing::{info, warn};

use crate::domain::commands::{AdvanceScreen, RestartJourney};
use crate::domain::navigator::{NavigationState, ScreenNavigator};

/// Result of a navigation command.
#[derive(Debug)]
pub struct NavigationOutcome {
    /// The screen the client should route to.
    pub target: ScreenId,
    /// The state the target resolved to.
    pub state: NavigationState,
    /// Raised when the cursor could not be persisted.
    pub advisory: Option<Advisory>,
}

impl NavigationOutcome {
    /// Client route for the target.
    #[must_use]
    pub fn route(&self) -> String {
        self.target.route()
    }

    /// Whether the cursor reached the store.
    #[must_use]
    pub fn persisted(&self) -> bool {
        self.advisory.is_none()
    }
}

/// Writes the cursor. Failure is reported as an advisory, never an error.
async fn persist_cursor(
    store: &dyn KeyValueStore,
    id: ScreenId,
    clock: &dyn Clock,
) -> Option<Advisory> {
    match store.set(CURRENT_SCREEN_KEY, &id.to_string()).await {
        Ok(()) => None,
        Err(e) => {
            warn!(error = %e, screen_id = %id, "failed to persist navigation cursor");
            Some(Advisory::persistence_unavailable(e.to_string(), clock))
        }
    }
}

/// Handles the `AdvanceScreen` command: resolves the current screen, computes
/// its successor, persists it, and resolves the successor.
///
/// # Errors
///
/// Returns `JourneyError::AlreadyInFlight` without side effects if another
/// advance holds `in_flight`, and `JourneyError::InvalidTransition` if the
/// current target is not a displayed screen.
pub async fn handle_advance_screen(
    command: &AdvanceScreen,
    source: &dyn ScreenSource,
    store: &dyn KeyValueStore,
    in_flight: &BusyFlag,
    clock: &dyn Clock,
) -> Result<NavigationOutcome, JourneyError> {
    let Some(_guard) = in_flight.try_begin() else {
        info!(correlation_id = %command.correlation_id(), "advance already in flight; ignoring");
        return Err(JourneyError::AlreadyInFlight("advance"));
    };

    let mut navigator = ScreenNavigator::open(source, command.from_screen.as_str());
    let next = navigator.next_target(source)?;

    let advisory = persist_cursor(store, next, clock).await;
    let state = navigator.advance_to(source, next).clone();

    info!(
        correlation_id = %command.correlation_id(),
        from = %command.from_screen,
        to = %next,
        "advanced screen"
    );

    Ok(NavigationOutcome {
        target: next,
        state,
        advisory,
    })
}

/// Handles the `RestartJourney` command: resets the persisted cursor to the
/// first screen and resolves it.
///
/// # Errors
///
/// Currently infallible; the `Result` matches the other handlers.
pub async fn handle_restart_journey(
    command: &RestartJourney,
    source: &dyn ScreenSource,
    store: &dyn KeyValueStore,
    clock: &dyn Clock,
) -> Result<NavigationOutcome, JourneyError> {
    let advisory = persist_cursor(store, ScreenId::FIRST, clock).await;

    let mut navigator = ScreenNavigator::seed(ScreenId::FIRST.to_string());
    let state = navigator.restart(source).clone();

    info!(correlation_id = %command.correlation_id(), "journey restarted");

    Ok(NavigationOutcome {
        target: ScreenId::FIRST,
        state,
        advisory,
    })
}
