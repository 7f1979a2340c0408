use crate::domain::{LineItem, NewLineItem};
use crate::events::{CartItemEvent, ItemAddedEvent, QuantityChangedEvent, now_timestamp};
use crate::ports::KeyValueStorage;
use shared::{Error, Result};
use std::sync::{Arc, Weak};
use tokio::sync::{broadcast, watch};

/// Application service that owns the cart state.
///
/// One store instance per process: the store exclusively owns the in-memory
/// cart and is the sole writer of its storage key. Consumers interact
/// through [`CartHandle`]s obtained from [`CartStore::handle`]; handles stop
/// working the moment the store is dropped.
pub struct CartStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    storage: Arc<dyn KeyValueStorage>,
    cart_key: String,
    // watch holds the published cart; send_replace is the publish step
    products: watch::Sender<Vec<LineItem>>,
    event_broadcaster: Option<broadcast::Sender<CartItemEvent>>,
}

impl CartStore {
    /// Open the store, loading the persisted cart once.
    ///
    /// An absent record and a record that fails to decode both yield an
    /// empty cart; a storage read failure propagates.
    pub async fn open(
        storage: Arc<dyn KeyValueStorage>,
        cart_key: impl Into<String>,
    ) -> Result<Self> {
        Self::open_inner(storage, cart_key.into(), None).await
    }

    /// Open the store with a broadcaster for cart item events.
    pub async fn with_event_broadcaster(
        storage: Arc<dyn KeyValueStorage>,
        cart_key: impl Into<String>,
        broadcaster: broadcast::Sender<CartItemEvent>,
    ) -> Result<Self> {
        Self::open_inner(storage, cart_key.into(), Some(broadcaster)).await
    }

    async fn open_inner(
        storage: Arc<dyn KeyValueStorage>,
        cart_key: String,
        event_broadcaster: Option<broadcast::Sender<CartItemEvent>>,
    ) -> Result<Self> {
        let initial = match storage.get(&cart_key).await? {
            Some(raw) => match serde_json::from_str::<Vec<LineItem>>(&raw) {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(
                        "Discarding malformed cart record under '{}': {}",
                        cart_key,
                        e
                    );
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        tracing::debug!("Loaded {} line item(s) from '{}'", initial.len(), cart_key);

        let (products, _) = watch::channel(initial);

        Ok(Self {
            inner: Arc::new(StoreInner {
                storage,
                cart_key,
                products,
                event_broadcaster,
            }),
        })
    }

    /// Hand out a consumer handle tied to this store's lifetime.
    pub fn handle(&self) -> CartHandle {
        CartHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart_key", &self.inner.cart_key)
            .field("line_items", &self.inner.products.borrow().len())
            .finish()
    }
}

/// Cloneable consumer handle to the cart store.
///
/// Every operation validates the handle first and fails with
/// [`Error::StoreClosed`] once the owning [`CartStore`] has been dropped,
/// before any storage access is attempted.
///
/// Mutations snapshot the cart as of their entry and do not hold a lock
/// across the storage write, so two mutations in flight at once race: the
/// second one to publish wins, based on its stale snapshot. Callers that
/// need read-modify-write atomicity must serialize their own mutations.
#[derive(Clone)]
pub struct CartHandle {
    inner: Weak<StoreInner>,
}

impl CartHandle {
    fn store(&self) -> Result<Arc<StoreInner>> {
        self.inner.upgrade().ok_or(Error::StoreClosed)
    }

    /// Current cart contents, in insertion order.
    pub fn products(&self) -> Result<Vec<LineItem>> {
        Ok(self.store()?.products.borrow().clone())
    }

    /// Subscribe to cart publications.
    ///
    /// The receiver always holds the most recently published cart and is
    /// marked changed after every mutation.
    pub fn subscribe(&self) -> Result<watch::Receiver<Vec<LineItem>>> {
        Ok(self.store()?.products.subscribe())
    }

    /// Append `item` to the end of the cart with quantity 1.
    ///
    /// An id that is already in the cart gets a second line appended for it
    /// rather than having its existing quantity bumped.
    pub async fn add_to_cart(&self, item: NewLineItem) -> Result<()> {
        let store = self.store()?;

        let mut cart = store.products.borrow().clone();
        let line = LineItem::from(item);
        let event = CartItemEvent::ItemAdded(ItemAddedEvent {
            id: line.id.clone(),
            title: line.title.clone(),
            price: line.price,
            quantity: line.quantity,
            timestamp: now_timestamp(),
        });
        cart.push(line);

        store.persist(&cart).await?;
        store.products.send_replace(cart);
        store.emit(event);

        Ok(())
    }

    /// Raise the quantity of every line matching `id` by one.
    pub async fn increment(&self, id: &str) -> Result<()> {
        self.change_quantity(id, 1).await
    }

    /// Lower the quantity of every line matching `id` by one.
    ///
    /// There is no floor; decrementing past zero leaves a negative quantity
    /// in the cart.
    pub async fn decrement(&self, id: &str) -> Result<()> {
        self.change_quantity(id, -1).await
    }

    async fn change_quantity(&self, id: &str, delta: i64) -> Result<()> {
        let store = self.store()?;

        let mut cart = store.products.borrow().clone();
        let mut events = Vec::new();
        for line in cart.iter_mut() {
            if line.id == id {
                line.quantity += delta;
                events.push(CartItemEvent::QuantityChanged(QuantityChangedEvent {
                    id: line.id.clone(),
                    quantity: line.quantity,
                    delta,
                    timestamp: now_timestamp(),
                }));
            }
        }

        // An unknown id is not an error; the unchanged cart is still
        // persisted and re-published.
        store.persist(&cart).await?;
        store.products.send_replace(cart);
        for event in events {
            store.emit(event);
        }

        Ok(())
    }
}

impl StoreInner {
    async fn persist(&self, cart: &[LineItem]) -> Result<()> {
        let encoded = serde_json::to_string(cart)?;
        self.storage.set(&self.cart_key, encoded).await
    }

    fn emit(&self, event: CartItemEvent) {
        if let Some(ref broadcaster) = self.event_broadcaster {
            let item_id = event.item_id().to_string();
            match broadcaster.send(event) {
                Ok(subscriber_count) => {
                    tracing::debug!(
                        "Broadcasted cart event for item '{}' to {} subscriber(s)",
                        item_id,
                        subscriber_count
                    );
                }
                Err(_) => {
                    tracing::warn!("No subscribers for cart event on item '{}'", item_id);
                }
            }
        }
    }
}
