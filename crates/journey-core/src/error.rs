//! Domain error types.

use thiserror::Error;

/// Top-level error type shared by every journey context.
///
/// None of these are fatal to the process: each surfaces to the caller with
/// a restart or return-to-start escape hatch.
#[derive(Debug, Error)]
pub enum JourneyError {
    /// A screen id inside the catalog range has no matching record.
    #[error("screen {0} is missing from the catalog")]
    ScreenNotFound(u32),

    /// A screen identifier did not parse as a positive integer.
    #[error("invalid screen id: {0:?}")]
    InvalidScreenId(String),

    /// The requested operation is not valid from the current state.
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    /// An operation guarded by a busy flag was requested while one was pending.
    #[error("{0} already in flight")]
    AlreadyInFlight(&'static str),

    /// The screen catalog asset is malformed.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// The audio resource refused a request.
    #[error("playback error: {0}")]
    Playback(String),

    /// A persistence or I/O failure.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
