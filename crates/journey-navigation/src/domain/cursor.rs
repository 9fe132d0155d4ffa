//! The navigation cursor and the successor rule.

use journey_catalog::domain::records::ScreenRecord;
use journey_core::screen_id::ScreenId;

/// The screen the user is currently on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationCursor {
    /// Current screen identifier.
    pub current_id: ScreenId,
}

impl NavigationCursor {
    /// A cursor at the first screen.
    #[must_use]
    pub const fn start() -> Self {
        Self {
            current_id: ScreenId::FIRST,
        }
    }
}

/// The identifier one past the last screen, meaning "journey finished".
#[must_use]
pub fn completion_sentinel(max_screen: u32) -> ScreenId {
    ScreenId::after(max_screen)
}

/// Computes where advancing from `record` leads.
///
/// An explicit `suggested_next` always wins, even when it points backwards.
/// Otherwise the next id is `id + 1` while that stays within `max_screen`,
/// and the completion sentinel after that. `suggested_next` is not
/// cross-checked against the catalog here.
#[must_use]
pub fn next_screen_id(record: &ScreenRecord, max_screen: u32) -> ScreenId {
    if let Some(next) = record.suggested_next {
        return next;
    }
    let candidate = record.id.successor();
    if candidate.get() <= max_screen {
        candidate
    } else {
        completion_sentinel(max_screen)
    }
}
