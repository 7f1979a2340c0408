//! Key-value storage adapters for the cart store.
//!
//! ```no_run
//! use std::sync::Arc;
//! use gostore::store::CartStore;
//! use shared::config::Config;
//! use storage_engine::SledStorage;
//!
//! # async fn open() -> shared::Result<()> {
//! let config = Config::from_env();
//! let storage = Arc::new(SledStorage::new(&config.data_dir)?);
//! let store = CartStore::open(storage, config.cart_key()).await?;
//! let cart = store.handle();
//! # Ok(())
//! # }
//! ```

pub mod memory;
pub mod sled_store;

pub use memory::MemoryStorage;
pub use sled_store::SledStorage;
