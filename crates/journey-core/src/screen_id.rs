//! Screen identifiers.

use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::JourneyError;

/// A 1-based screen identifier.
///
/// Parsing is strict: anything that is not a positive decimal integer is
/// rejected, so malformed route parameters never reach the navigation
/// state machine as a valid id. Decimal ids too large for `u32` saturate to
/// `u32::MAX`, which is still past the end of any catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ScreenId(u32);

impl ScreenId {
    /// The first screen of every journey.
    pub const FIRST: Self = Self(1);

    /// Creates a screen id.
    ///
    /// # Errors
    ///
    /// Returns `JourneyError::InvalidScreenId` for zero.
    pub fn new(value: u32) -> Result<Self, JourneyError> {
        if value == 0 {
            return Err(JourneyError::InvalidScreenId(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns the id that directly follows this one.
    #[must_use]
    pub const fn successor(self) -> Self {
        Self::after(self.0)
    }

    /// The id directly after `last`. Always valid, since it is at least 1.
    #[must_use]
    pub const fn after(last: u32) -> Self {
        Self(last.saturating_add(1))
    }

    /// Returns the client route that displays this screen.
    #[must_use]
    pub fn route(self) -> String {
        format!("/screens/{}", self.0)
    }
}

impl TryFrom<u32> for ScreenId {
    type Error = JourneyError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ScreenId> for u32 {
    fn from(id: ScreenId) -> Self {
        id.0
    }
}

impl FromStr for ScreenId {
    type Err = JourneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(JourneyError::InvalidScreenId(s.to_owned()));
        }
        let value = match s.parse::<u32>() {
            Ok(value) => value,
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => u32::MAX,
            Err(_) => return Err(JourneyError::InvalidScreenId(s.to_owned())),
        };
        Self::new(value).map_err(|_| JourneyError::InvalidScreenId(s.to_owned()))
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
