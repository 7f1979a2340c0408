//! Shopping-cart state store backed by pluggable key-value storage.
//!
//! [`store::CartStore`] owns the in-memory cart and rewrites the persisted
//! record on every mutation; consumers read and mutate through
//! [`store::CartHandle`]s handed out by the store.

pub mod domain;
pub mod events;
pub mod ports;
pub mod store;
