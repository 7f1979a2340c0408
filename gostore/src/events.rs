use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartItemEvent {
    ItemAdded(ItemAddedEvent),
    QuantityChanged(QuantityChangedEvent),
}

impl CartItemEvent {
    pub fn item_id(&self) -> &str {
        match self {
            CartItemEvent::ItemAdded(e) => &e.id,
            CartItemEvent::QuantityChanged(e) => &e.id,
        }
    }

    pub fn quantity(&self) -> i64 {
        match self {
            CartItemEvent::ItemAdded(e) => e.quantity,
            CartItemEvent::QuantityChanged(e) => e.quantity,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemAddedEvent {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub quantity: i64,
    pub timestamp: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantityChangedEvent {
    pub id: String,
    pub quantity: i64,
    pub delta: i64,
    pub timestamp: u64,
}

/// Helper to get current timestamp in seconds since UNIX epoch
pub fn now_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}
