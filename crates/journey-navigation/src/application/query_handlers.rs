//! Query handlers for the Screen Navigation context.
//!
//! This module turns navigator states into read-only view DTOs and reports
//! the persisted journey progress.

use journey_catalog::domain::catalog::ScreenSource;
use journey_catalog::domain::records::{Icon, LayoutType, ScreenEffect, ScreenRecord};
use journey_core::screen_id::ScreenId;
use journey_core::store::{CURRENT_SCREEN_KEY, KeyValueStore};
use serde::Serialize;
use tracing::warn;

use crate::domain::cursor::completion_sentinel;
use crate::domain::navigator::{NavigationState, ScreenNavigator};

/// Route of the gate page.
pub const START_ROUTE: &str = "/";

/// Escape hatches offered by every terminal view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecoveryActions {
    /// Route that restarts the journey at screen 1.
    pub restart: String,
    /// Route back to the gate.
    pub return_to_start: String,
}

impl Default for RecoveryActions {
    fn default() -> Self {
        Self {
            restart: ScreenId::FIRST.route(),
            return_to_start: START_ROUTE.to_owned(),
        }
    }
}

/// Image shown on a screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenImage {
    /// Absolute URL.
    pub url: String,
    /// Alternative text; the screen title when the record has none.
    pub alt: String,
    /// Whether the client should preload the image.
    pub priority: bool,
}

/// A displayed screen, flattened for the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayedScreen {
    /// Screen identifier.
    pub id: ScreenId,
    /// "Chapter N / M" label.
    pub chapter: String,
    /// Card title.
    pub title: String,
    /// Poem text, newline separated.
    pub content: String,
    /// Card icon.
    pub icon: Icon,
    /// Accent colour.
    pub accent_color: Option<String>,
    /// Animation CSS classes, in order.
    pub animations: Vec<&'static str>,
    /// Card layout.
    pub layout: LayoutType,
    /// Optional image.
    pub image: Option<ScreenImage>,
    /// Decorative flourishes.
    pub effects: Vec<ScreenEffect>,
}

/// Screens whose image the client should preload.
const PRIORITY_IMAGE_SCREENS: u32 = 2;

impl DisplayedScreen {
    fn from_record(record: &ScreenRecord, max_screen: u32) -> Self {
        Self {
            id: record.id,
            chapter: format!("Chapter {} / {max_screen}", record.id),
            title: record.title.clone(),
            content: record.content.clone(),
            icon: record.icon,
            accent_color: record.accent_color().map(str::to_owned),
            animations: record
                .active_animations()
                .into_iter()
                .map(|a| a.css_class())
                .collect(),
            layout: record.style.as_ref().map(|s| s.layout).unwrap_or_default(),
            image: record.image_path.as_ref().map(|url| ScreenImage {
                url: url.clone(),
                alt: record
                    .image_alt
                    .clone()
                    .unwrap_or_else(|| record.title.clone()),
                priority: record.id.get() <= PRIORITY_IMAGE_SCREENS,
            }),
            effects: record.effects.clone(),
        }
    }
}

/// Read-only view of a navigation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ScreenView {
    /// Target not yet resolved.
    Loading {
        /// Placeholder text.
        message: &'static str,
    },
    /// A screen is on display.
    Displaying {
        /// The screen.
        screen: DisplayedScreen,
    },
    /// The journey is finished.
    Completed {
        /// Headline.
        title: &'static str,
        /// Closing message.
        message: &'static str,
        /// Replay / return routes.
        actions: RecoveryActions,
    },
    /// The target could not be shown.
    Error {
        /// Headline.
        title: &'static str,
        /// What went wrong.
        message: String,
        /// Restart / return routes.
        actions: RecoveryActions,
    },
}

impl ScreenView {
    /// Builds the view for `state`.
    #[must_use]
    pub fn from_state(state: &NavigationState, max_screen: u32) -> Self {
        match state {
            NavigationState::Loading => Self::Loading {
                message: "Crafting your next wondrous step...",
            },
            NavigationState::Displaying(record) => Self::Displaying {
                screen: DisplayedScreen::from_record(record, max_screen),
            },
            NavigationState::Completed => Self::Completed {
                title: "Your Odyssey is Celebrated!",
                message: "Congratulations! You've navigated this expansive digital adventure. \
                          May the echoes of this journey inspire you always!",
                actions: RecoveryActions::default(),
            },
            NavigationState::Error { message } => Self::Error {
                title: "A Detour on the Path!",
                message: message.clone(),
                actions: RecoveryActions::default(),
            },
        }
    }
}

/// Resolves `target` and returns its view.
#[must_use]
pub fn get_screen(target: &str, source: &dyn ScreenSource) -> ScreenView {
    let navigator = ScreenNavigator::open(source, target);
    ScreenView::from_state(navigator.state(), source.max_screen())
}

/// Persisted progress through the journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressView {
    /// The persisted cursor, if any.
    pub current_screen_id: Option<ScreenId>,
    /// Where the client should resume.
    pub resume_route: String,
    /// Whether the cursor is at or past the completion sentinel.
    pub completed: bool,
}

/// Reads the persisted cursor.
///
/// Best-effort: an unreadable store or a malformed value is logged and
/// reported as "no progress", which resumes at the gate.
pub async fn get_progress(store: &dyn KeyValueStore, source: &dyn ScreenSource) -> ProgressView {
    let raw = match store.get(CURRENT_SCREEN_KEY).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "failed to read navigation cursor");
            None
        }
    };

    let current = raw.and_then(|value| match value.parse::<ScreenId>() {
        Ok(id) => Some(id),
        Err(e) => {
            warn!(error = %e, "ignoring malformed navigation cursor");
            None
        }
    });

    let sentinel = completion_sentinel(source.max_screen());
    ProgressView {
        current_screen_id: current,
        resume_route: current.map_or_else(|| START_ROUTE.to_owned(), ScreenId::route),
        completed: current.is_some_and(|id| id >= sentinel),
    }
}
