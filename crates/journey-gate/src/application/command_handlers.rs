//! Command handlers for the Gate context.

use std::time::Duration;

use journey_core::advisory::Advisory;
use journey_core::busy::BusyFlag;
use journey_core::clock::Clock;
use journey_core::command::Command;
use journey_core::error::JourneyError;
use journey_core::screen_id::ScreenId;
use journey_core::store::{CURRENT_SCREEN_KEY, JOURNEY_DATA_KEY, KeyValueStore};
use journey_playback::application::toggle::PlaybackToggle;
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::commands::SubmitCode;
use crate::domain::secret::GateSecret;

/// Verification delay applied before every comparison.
pub const DEFAULT_VERIFICATION_DELAY: Duration = Duration::from_millis(1000);

/// The gate: secret, verification delay and the single-submission flag.
#[derive(Debug)]
pub struct GateCheck {
    secret: GateSecret,
    delay: Duration,
    in_flight: BusyFlag,
}

impl GateCheck {
    /// Creates a gate for `secret` that waits `delay` before comparing.
    #[must_use]
    pub fn new(secret: GateSecret, delay: Duration) -> Self {
        Self {
            secret,
            delay,
            in_flight: BusyFlag::new(),
        }
    }

    /// Whether a submission is pending.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_busy()
    }
}

impl Default for GateCheck {
    fn default() -> Self {
        Self::new(GateSecret::built_in(), DEFAULT_VERIFICATION_DELAY)
    }
}

/// Result of a gate submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GateOutcome {
    /// The code matched.
    Granted {
        /// Where the client should go next.
        route: String,
        /// Headline.
        title: &'static str,
        /// Welcome text.
        message: &'static str,
        /// Non-fatal problems met on the way in.
        advisories: Vec<Advisory>,
    },
    /// The code did not match.
    Denied {
        /// The client should empty the code input.
        clear_input: bool,
        /// Headline.
        title: &'static str,
        /// Retry prompt.
        message: &'static str,
    },
}

/// Handles the `SubmitCode` command.
///
/// Waits out the verification delay, then compares the code. On a match the
/// persisted journey keys are cleared and playback is requested; both steps
/// are best-effort and only add advisories. On a mismatch nothing is touched.
///
/// # Errors
///
/// Returns `JourneyError::AlreadyInFlight` without side effects if another
/// submission is pending.
pub async fn handle_submit_code(
    command: &SubmitCode,
    gate: &GateCheck,
    store: &dyn KeyValueStore,
    playback: &PlaybackToggle,
    clock: &dyn Clock,
) -> Result<GateOutcome, JourneyError> {
    let Some(_guard) = gate.in_flight.try_begin() else {
        info!(correlation_id = %command.correlation_id(), "gate submission already in flight; ignoring");
        return Err(JourneyError::AlreadyInFlight("gate submission"));
    };

    tokio::time::sleep(gate.delay).await;

    if !gate.secret.matches(&command.code) {
        info!(correlation_id = %command.correlation_id(), "gate denied");
        return Ok(GateOutcome::Denied {
            clear_input: true,
            title: "Access Denied",
            message: "The secret code is incorrect. Please try again.",
        });
    }

    let mut advisories = Vec::new();
    if let Some(advisory) = clear_progress(store, clock).await {
        advisories.push(advisory);
    }
    if let Some(advisory) = playback.request_play().await {
        advisories.push(advisory);
    }

    info!(
        correlation_id = %command.correlation_id(),
        advisories = advisories.len(),
        "gate granted"
    );

    Ok(GateOutcome::Granted {
        route: ScreenId::FIRST.route(),
        title: "Access Granted!",
        message: "Welcome, Dharshana! Your journey begins now.",
        advisories,
    })
}

/// Removes both journey keys. Reports the first failure as an advisory.
async fn clear_progress(store: &dyn KeyValueStore, clock: &dyn Clock) -> Option<Advisory> {
    let mut failure = None;
    for key in [JOURNEY_DATA_KEY, CURRENT_SCREEN_KEY] {
        if let Err(e) = store.remove(key).await {
            warn!(error = %e, key, "failed to clear journey key");
            if failure.is_none() {
                failure = Some(Advisory::persistence_unavailable(e.to_string(), clock));
            }
        }
    }
    failure
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use journey_core::advisory::AdvisoryKind;
    use journey_test_support::{
        AudioRequest, FailingStore, FixedClock, RecordingStore, ScriptedAudio, StoreOp,
    };
    use uuid::Uuid;

    use super::*;

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    fn gate() -> GateCheck {
        GateCheck::new(GateSecret::new("HK-THANGO25"), Duration::from_millis(10))
    }

    fn submit(code: &str) -> SubmitCode {
        SubmitCode {
            correlation_id: Uuid::new_v4(),
            code: code.to_owned(),
        }
    }

    fn seeded_store() -> RecordingStore {
        RecordingStore::with_entries(&[(JOURNEY_DATA_KEY, "{}"), (CURRENT_SCREEN_KEY, "17")])
    }

    #[tokio::test]
    async fn test_exact_code_clears_progress_starts_music_and_routes_to_first_screen() {
        // Arrange
        let store = seeded_store();
        let audio = Arc::new(ScriptedAudio::accepting());
        let playback = PlaybackToggle::new(audio.clone(), Arc::new(clock()));

        // Act
        let outcome = handle_submit_code(&submit("HK-THANGO25"), &gate(), &store, &playback, &clock())
            .await
            .unwrap();

        // Assert
        match outcome {
            GateOutcome::Granted {
                route, advisories, ..
            } => {
                assert_eq!(route, "/screens/1");
                assert!(advisories.is_empty());
            }
            other @ GateOutcome::Denied { .. } => panic!("expected Granted, got {other:?}"),
        }
        assert_eq!(store.value(JOURNEY_DATA_KEY), None);
        assert_eq!(store.value(CURRENT_SCREEN_KEY), None);
        assert_eq!(
            store.operations(),
            vec![
                StoreOp::Remove(JOURNEY_DATA_KEY.to_owned()),
                StoreOp::Remove(CURRENT_SCREEN_KEY.to_owned()),
            ]
        );
        assert_eq!(audio.requests(), vec![AudioRequest::Play]);
    }

    #[tokio::test]
    async fn test_wrong_or_differently_cased_code_is_denied_and_store_untouched() {
        let audio = Arc::new(ScriptedAudio::accepting());
        let playback = PlaybackToggle::new(audio.clone(), Arc::new(clock()));

        for code in ["nope", "hk-thango25", "HK-THANGO25 "] {
            let store = seeded_store();

            let outcome = handle_submit_code(&submit(code), &gate(), &store, &playback, &clock())
                .await
                .unwrap();

            assert_eq!(
                outcome,
                GateOutcome::Denied {
                    clear_input: true,
                    title: "Access Denied",
                    message: "The secret code is incorrect. Please try again.",
                }
            );
            assert!(store.operations().is_empty(), "{code:?}");
            assert_eq!(store.value(CURRENT_SCREEN_KEY).as_deref(), Some("17"));
        }
        assert!(audio.requests().is_empty());
    }

    #[tokio::test]
    async fn test_second_submission_while_pending_is_rejected_without_effect() {
        // Arrange
        let gate = gate();
        let store = seeded_store();
        let playback = PlaybackToggle::new(Arc::new(ScriptedAudio::accepting()), Arc::new(clock()));
        let clock = clock();
        let first = submit("HK-THANGO25");
        let second = submit("HK-THANGO25");

        // Act
        let (a, b) = tokio::join!(
            handle_submit_code(&first, &gate, &store, &playback, &clock),
            handle_submit_code(&second, &gate, &store, &playback, &clock),
        );

        // Assert
        assert!(matches!(a, Ok(GateOutcome::Granted { .. })));
        assert!(matches!(
            b,
            Err(JourneyError::AlreadyInFlight("gate submission"))
        ));
        assert_eq!(store.operations().len(), 2);
        assert!(!gate.is_busy());
    }

    #[tokio::test]
    async fn test_blocked_autoplay_still_grants_with_advisory() {
        let store = seeded_store();
        let playback = PlaybackToggle::new(
            Arc::new(ScriptedAudio::rejecting("NotAllowedError")),
            Arc::new(clock()),
        );

        let outcome = handle_submit_code(&submit("HK-THANGO25"), &gate(), &store, &playback, &clock())
            .await
            .unwrap();

        let GateOutcome::Granted { advisories, .. } = outcome else {
            panic!("expected Granted");
        };
        assert_eq!(advisories.len(), 1);
        assert_eq!(advisories[0].kind, AdvisoryKind::AutoplayBlocked);
        assert_eq!(advisories[0].title, "Autoplay Blocked");
        assert!(!playback.is_playing());
    }

    #[tokio::test]
    async fn test_unwritable_store_still_grants_with_advisory() {
        let playback = PlaybackToggle::new(Arc::new(ScriptedAudio::accepting()), Arc::new(clock()));

        let outcome =
            handle_submit_code(&submit("HK-THANGO25"), &gate(), &FailingStore, &playback, &clock())
                .await
                .unwrap();

        let GateOutcome::Granted { advisories, .. } = outcome else {
            panic!("expected Granted");
        };
        assert_eq!(advisories.len(), 1);
        assert_eq!(advisories[0].kind, AdvisoryKind::PersistenceUnavailable);
    }

    #[test]
    fn test_outcome_serializes_with_tag() {
        let json = serde_json::to_value(GateOutcome::Denied {
            clear_input: true,
            title: "Access Denied",
            message: "x",
        })
        .unwrap();

        assert_eq!(json["outcome"], "denied");
        assert_eq!(json["clear_input"], true);
    }
}
