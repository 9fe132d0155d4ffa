//! In-memory implementation of the `KeyValueStore` trait.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use journey_core::error::JourneyError;
use journey_core::store::KeyValueStore;

/// Process-lifetime store. Progress is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, JourneyError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), JourneyError> {
        self.entries
            .write()
            .await
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), JourneyError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
