use async_trait::async_trait;
use gostore::ports::KeyValueStorage;
use shared::{Error, Result};
use std::path::Path;

/// Sled-backed key-value storage, the device storage that lets the cart
/// survive app restarts.
pub struct SledStorage {
    db: sled::Db,
}

impl SledStorage {
    /// Open (or create) the database at `path`.
    /// Creates the parent directory if it doesn't exist.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Storage(format!("Failed to create directory: {}", e)))?;
        }

        let db = sled::open(path)
            .map_err(|e| Error::Storage(format!("Failed to open Sled database: {}", e)))?;

        Ok(Self { db })
    }
}

#[async_trait]
impl KeyValueStorage for SledStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self.db.get(key.as_bytes())? {
            Some(bytes) => {
                let raw = String::from_utf8(bytes.to_vec())
                    .map_err(|e| Error::Storage(format!("Value is not valid UTF-8: {}", e)))?;
                Ok(Some(raw))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.db.insert(key.as_bytes(), value.into_bytes())?;
        // flush so the record survives an immediate process exit
        self.db.flush()?;
        Ok(())
    }
}

impl std::fmt::Debug for SledStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SledStorage")
            .field("name", &self.db.name())
            .finish()
    }
}
