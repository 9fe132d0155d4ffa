//! File-backed implementation of the `KeyValueStore` trait.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use journey_core::error::JourneyError;
use journey_core::store::KeyValueStore;

type Entries = BTreeMap<String, String>;

/// Stores every key in a single JSON object.
///
/// A missing file reads as empty. Writes go to a sibling temp file that is
/// then renamed over the original, so a crash mid-write leaves the previous
/// contents intact. Writes from this process are serialized.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Creates a store backed by `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Entries, JourneyError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(Entries::new()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                JourneyError::Infrastructure(format!(
                    "store file {} is corrupt: {e}",
                    self.path.display()
                ))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(io_error("read", &self.path, &e)),
        }
    }

    async fn save(&self, entries: &Entries) -> Result<(), JourneyError> {
        let bytes = serde_json::to_vec_pretty(entries)
            .map_err(|e| JourneyError::Infrastructure(format!("store encode failed: {e}")))?;
        let temp = self.path.with_extension("tmp");
        tokio::fs::write(&temp, bytes)
            .await
            .map_err(|e| io_error("write", &temp, &e))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| io_error("replace", &self.path, &e))?;
        debug!(path = %self.path.display(), keys = entries.len(), "store saved");
        Ok(())
    }

    async fn update(&self, apply: impl FnOnce(&mut Entries) + Send) -> Result<(), JourneyError> {
        let _lock = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        apply(&mut entries);
        self.save(&entries).await
    }
}

fn io_error(action: &str, path: &Path, e: &std::io::Error) -> JourneyError {
    JourneyError::Infrastructure(format!("failed to {action} {}: {e}", path.display()))
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, JourneyError> {
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), JourneyError> {
        self.update(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<(), JourneyError> {
        self.update(|entries| {
            entries.remove(key);
        })
        .await
    }
}
