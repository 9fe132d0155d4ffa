//! Non-fatal notices surfaced to the user alongside a successful result.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::clock::Clock;

/// What an advisory is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryKind {
    /// The audio resource refused to start playback.
    AutoplayBlocked,
    /// The key-value store could not be written.
    PersistenceUnavailable,
}

/// A user-visible notice that does not change the outcome of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    /// Advisory category.
    pub kind: AdvisoryKind,
    /// Short headline.
    pub title: String,
    /// Guidance for the user.
    pub message: String,
    /// Underlying cause, for diagnostics.
    pub detail: String,
    /// When the advisory was raised.
    pub occurred_at: DateTime<Utc>,
}

impl Advisory {
    /// Playback was refused, typically by an autoplay policy.
    #[must_use]
    pub fn autoplay_blocked(detail: impl Into<String>, clock: &dyn Clock) -> Self {
        Self {
            kind: AdvisoryKind::AutoplayBlocked,
            title: "Autoplay Blocked".to_owned(),
            message: "Please click anywhere on the page to enable background music.".to_owned(),
            detail: detail.into(),
            occurred_at: clock.now(),
        }
    }

    /// Progress could not be saved; the journey continues regardless.
    #[must_use]
    pub fn persistence_unavailable(detail: impl Into<String>, clock: &dyn Clock) -> Self {
        Self {
            kind: AdvisoryKind::PersistenceUnavailable,
            title: "Progress Not Saved".to_owned(),
            message: "Your place in the journey may not survive a reload.".to_owned(),
            detail: detail.into(),
            occurred_at: clock.now(),
        }
    }
}
