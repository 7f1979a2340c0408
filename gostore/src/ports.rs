#![deny(clippy::all)]

use async_trait::async_trait;
use shared::Result;

// Ports are the pluggable extension points for underlying storage implementations

/// Port for the key-value storage the cart is persisted to.
///
/// Keys are plain strings, values are the serialized cart record.
/// `get` returns `Ok(None)` for a key that has never been written.
#[async_trait]
pub trait KeyValueStorage: Send + Sync + 'static {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: String) -> Result<()>;
}
