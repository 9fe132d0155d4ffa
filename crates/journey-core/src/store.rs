//! Local key-value persistence abstraction.
//!
//! The journey persists at most two string keys. Durability is best-effort:
//! callers treat write failures as advisories, never as fatal errors.

use async_trait::async_trait;

use crate::error::JourneyError;

/// Opaque journey data, cleared whenever the gate is passed.
pub const JOURNEY_DATA_KEY: &str = "journeyData";

/// Current screen id, stored as a decimal string.
pub const CURRENT_SCREEN_KEY: &str = "currentScreenId";

/// String key-value store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads a key.
    async fn get(&self, key: &str) -> Result<Option<String>, JourneyError>;

    /// Writes a key, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), JourneyError>;

    /// Removes a key. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<(), JourneyError>;
}
