use async_trait::async_trait;
use dashmap::DashMap;
use gostore::ports::KeyValueStorage;
use shared::Result;

/// In-memory key-value storage backed by a concurrent map.
///
/// Contents do not survive the process; meant for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: DashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.records.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.records.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage_set_and_get() {
        let storage = MemoryStorage::new();

        storage.set("hello", "world".to_string()).await.unwrap();

        let value = storage.get("hello").await.unwrap();
        assert_eq!(value.as_deref(), Some("world"));
    }

    #[tokio::test]
    async fn test_memory_storage_get_missing() {
        let storage = MemoryStorage::new();

        assert!(storage.get("nonexistent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_storage_overwrite() {
        let storage = MemoryStorage::new();

        storage.set("key", "one".to_string()).await.unwrap();
        storage.set("key", "two".to_string()).await.unwrap();

        assert_eq!(storage.get("key").await.unwrap().as_deref(), Some("two"));
    }
}
