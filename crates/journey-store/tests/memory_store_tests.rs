//! Integration tests for `MemoryStore`.

use journey_core::store::{CURRENT_SCREEN_KEY, KeyValueStore};
use journey_store::memory_store::MemoryStore;

#[tokio::test]
async fn test_set_get_remove() {
    let store = MemoryStore::new();

    store.set(CURRENT_SCREEN_KEY, "5").await.unwrap();
    assert_eq!(
        store.get(CURRENT_SCREEN_KEY).await.unwrap().as_deref(),
        Some("5")
    );

    store.remove(CURRENT_SCREEN_KEY).await.unwrap();
    assert_eq!(store.get(CURRENT_SCREEN_KEY).await.unwrap(), None);
}
