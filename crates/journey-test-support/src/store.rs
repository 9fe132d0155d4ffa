//! Test stores: mock `KeyValueStore` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use journey_core::error::JourneyError;
use journey_core::store::KeyValueStore;

/// A write observed by [`RecordingStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    /// `set(key, value)`.
    Set(String, String),
    /// `remove(key)`.
    Remove(String),
}

/// An in-memory store that records every write in order.
///
/// Reads are not recorded. An optional write delay makes the store suspend
/// before applying each write, which lets tests overlap two operations.
#[derive(Debug, Default)]
pub struct RecordingStore {
    entries: Mutex<HashMap<String, String>>,
    operations: Mutex<Vec<StoreOp>>,
    write_delay: Option<Duration>,
}

impl RecordingStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`. Seeding is not recorded.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        let store = Self::new();
        store.entries.lock().unwrap().extend(
            entries
                .iter()
                .map(|(key, value)| ((*key).to_owned(), (*value).to_owned())),
        );
        store
    }

    /// Sleeps for `delay` before applying each write.
    #[must_use]
    pub fn with_write_delay(mut self, delay: Duration) -> Self {
        self.write_delay = Some(delay);
        self
    }

    /// Current value of `key`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    /// Returns a snapshot of all writes so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn operations(&self) -> Vec<StoreOp> {
        self.operations.lock().unwrap().clone()
    }

    async fn pause_before_write(&self) {
        if let Some(delay) = self.write_delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl KeyValueStore for RecordingStore {
    async fn get(&self, key: &str) -> Result<Option<String>, JourneyError> {
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), JourneyError> {
        self.pause_before_write().await;
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
        self.operations
            .lock()
            .unwrap()
            .push(StoreOp::Set(key.to_owned(), value.to_owned()));
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), JourneyError> {
        self.pause_before_write().await;
        self.entries.lock().unwrap().remove(key);
        self.operations
            .lock()
            .unwrap()
            .push(StoreOp::Remove(key.to_owned()));
        Ok(())
    }
}

/// A store whose every call returns an infrastructure error. Useful for
/// testing the best-effort persistence paths.
#[derive(Debug)]
pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, JourneyError> {
        Err(JourneyError::Infrastructure("connection refused".into()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), JourneyError> {
        Err(JourneyError::Infrastructure("disk full".into()))
    }

    async fn remove(&self, _key: &str) -> Result<(), JourneyError> {
        Err(JourneyError::Infrastructure("disk full".into()))
    }
}
