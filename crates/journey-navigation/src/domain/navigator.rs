//! The screen navigation state machine.

use journey_catalog::domain::catalog::ScreenSource;
use journey_catalog::domain::records::{Animation, ScreenRecord};
use journey_core::error::JourneyError;
use journey_core::screen_id::ScreenId;
use tracing::error;

use super::cursor::{NavigationCursor, next_screen_id};

/// What the user sees for the current target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationState {
    /// The target changed and has not been resolved yet.
    Loading,
    /// The target could not be shown. Terminal until restart.
    Error {
        /// User-facing explanation.
        message: String,
    },
    /// A catalog record is on screen.
    Displaying(Box<ScreenRecord>),
    /// The target is past the last screen. Terminal until restart.
    Completed,
}

/// Resolves targets against a [`ScreenSource`] and tracks the active
/// presentation state.
///
/// The navigator never mutates the source. It is seeded with a raw target
/// (usually a route parameter) and moves through `Loading` to one of the
/// settled states.
#[derive(Debug)]
pub struct ScreenNavigator {
    target: String,
    state: NavigationState,
    active_animations: Vec<Animation>,
}

impl ScreenNavigator {
    /// Creates a navigator in `Loading` for `target`.
    #[must_use]
    pub fn seed(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            state: NavigationState::Loading,
            active_animations: Vec::new(),
        }
    }

    /// Creates a navigator for `target` and resolves it immediately.
    #[must_use]
    pub fn open(source: &dyn ScreenSource, target: impl Into<String>) -> Self {
        let mut navigator = Self::seed(target);
        navigator.resolve(source);
        navigator
    }

    /// The raw target identifier.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Animations of the displayed record; empty in every other state.
    #[must_use]
    pub fn active_animations(&self) -> &[Animation] {
        &self.active_animations
    }

    /// The cursor for the displayed screen, if one is displayed.
    #[must_use]
    pub fn cursor(&self) -> Option<NavigationCursor> {
        match &self.state {
            NavigationState::Displaying(record) => Some(NavigationCursor {
                current_id: record.id,
            }),
            _ => None,
        }
    }

    /// Points the navigator at a new target. Re-enters `Loading` only when
    /// the target actually changes.
    pub fn retarget(&mut self, target: impl Into<String>) {
        let target = target.into();
        if target != self.target {
            self.target = target;
            self.state = NavigationState::Loading;
            self.active_animations.clear();
        }
    }

    /// Settles a `Loading` navigator. Settled states are left untouched.
    pub fn resolve(&mut self, source: &dyn ScreenSource) -> &NavigationState {
        if self.state == NavigationState::Loading {
            self.state = resolve_target(source, &self.target);
            self.active_animations = match &self.state {
                NavigationState::Displaying(record) => record.active_animations(),
                _ => Vec::new(),
            };
        }
        &self.state
    }

    /// Computes where advancing from the displayed screen leads.
    ///
    /// # Errors
    ///
    /// Returns `JourneyError::InvalidTransition` unless a screen is displayed.
    pub fn next_target(&self, source: &dyn ScreenSource) -> Result<ScreenId, JourneyError> {
        match &self.state {
            NavigationState::Displaying(record) => {
                Ok(next_screen_id(record, source.max_screen()))
            }
            other => Err(JourneyError::InvalidTransition(format!(
                "cannot advance from {} state",
                state_name(other)
            ))),
        }
    }

    /// Moves to `next` and resolves it.
    pub fn advance_to(&mut self, source: &dyn ScreenSource, next: ScreenId) -> &NavigationState {
        self.retarget(next.to_string());
        self.resolve(source)
    }

    /// Returns to the first screen and resolves it.
    ///
    /// Allowed from any state; this is the escape hatch every error and
    /// completion view offers.
    pub fn restart(&mut self, source: &dyn ScreenSource) -> &NavigationState {
        self.target = ScreenId::FIRST.to_string();
        self.state = NavigationState::Loading;
        self.active_animations.clear();
        self.resolve(source)
    }
}

/// Resolves a raw target to a settled state.
///
/// Unparseable or zero targets take the not-found path instead of failing.
#[must_use]
pub fn resolve_target(source: &dyn ScreenSource, target: &str) -> NavigationState {
    let Ok(id) = target.parse::<ScreenId>() else {
        return missing_screen(target);
    };
    if id.get() > source.max_screen() {
        return NavigationState::Completed;
    }
    match source.find(id) {
        Some(record) => NavigationState::Displaying(Box::new(record.clone())),
        None => {
            let fault = JourneyError::ScreenNotFound(id.get());
            error!(error = %fault, "screen definition not found in catalog");
            missing_screen(target)
        }
    }
}

fn missing_screen(target: &str) -> NavigationState {
    NavigationState::Error {
        message: format!("Oops! Screen {target} seems to be missing. Let's guide you back."),
    }
}

/// Short lowercase name of a state, for messages and logs.
#[must_use]
pub fn state_name(state: &NavigationState) -> &'static str {
    match state {
        NavigationState::Loading => "loading",
        NavigationState::Error { .. } => "error",
        NavigationState::Displaying(_) => "displaying",
        NavigationState::Completed => "completed",
    }
}
