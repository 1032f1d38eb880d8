//! Cart store: line items, mutations, persistence, change notifications.
//!
//! The cart is owned exclusively by the client session; there is no
//! server-side mirror. Every mutation persists synchronously to client
//! storage and broadcasts a payload-less [`CartChanged`] event so other open
//! views (the header badge, most notably) can refresh their derived counts
//! without a reload.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use nexu_core::{LineItemId, Price, ProductId};

use crate::storage::{self, ClientStorage, StorageError, keys};

/// Broadcast capacity for cart change notifications. Listeners only use the
/// event as a "refresh now" signal, so lagging receivers lose nothing.
const EVENT_CAPACITY: usize = 16;

/// Process-wide notification that the cart contents changed.
///
/// Deliberately payload-less: consumers re-read the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartChanged;

/// One entry in the cart: a product with a chosen option set and quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Client-generated line ID, unique within the cart and never reused.
    pub id: LineItemId,
    /// The product this line refers to. May repeat across lines: the same
    /// product with different options is a distinct line.
    pub product_id: ProductId,
    pub name: String,
    /// Unit price in Rupiah minor units.
    pub unit_price: Price,
    /// Product image URL.
    pub image: String,
    /// Always >= 1.
    pub quantity: u32,
    /// Selected option values, e.g. `{"Color": "Black"}`.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
    #[serde(default)]
    pub seller_name: String,
    #[serde(default)]
    pub seller_slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl CartLineItem {
    /// Line subtotal: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price * self.quantity
    }
}

/// Input for [`CartStore::add`]: a line item without an ID yet.
#[derive(Debug, Clone)]
pub struct NewLineItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub image: String,
    pub quantity: u32,
    pub options: BTreeMap<String, String>,
    pub seller_name: String,
    pub seller_slug: String,
    pub category: Option<String>,
}

/// The cart store.
///
/// Callers never touch the storage medium directly; all reads and writes go
/// through this interface so the persistence layer can be substituted.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    items: Vec<CartLineItem>,
    events: broadcast::Sender<CartChanged>,
}

impl<S: ClientStorage> CartStore<S> {
    /// Load the cart from storage.
    ///
    /// Missing or corrupt persisted data yields an empty cart rather than an
    /// error.
    pub fn load(storage: S) -> Self {
        let items: Vec<CartLineItem> =
            storage::read_json(&storage, keys::CART).unwrap_or_default();
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            storage,
            items,
            events,
        }
    }

    /// Current line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Look up a line by ID.
    #[must_use]
    pub fn get(&self, id: LineItemId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Number of lines in the cart (not the summed quantity).
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Subscribe to cart change notifications.
    ///
    /// The notification fires for any mutation, process-wide, regardless of
    /// which view triggered it.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CartChanged> {
        self.events.subscribe()
    }

    /// Add a new line to the cart.
    ///
    /// Assigns a fresh line ID. IDs are never reused, even if a prior line
    /// with the same product and options was removed. A quantity below 1 is
    /// stored as 1.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the cart cannot be persisted.
    pub fn add(&mut self, new: NewLineItem) -> Result<LineItemId, StorageError> {
        let id = LineItemId::generate();
        let item = CartLineItem {
            id,
            product_id: new.product_id,
            name: new.name,
            unit_price: new.unit_price,
            image: new.image,
            quantity: new.quantity.max(1),
            options: new.options,
            seller_name: new.seller_name,
            seller_slug: new.seller_slug,
            category: new.category,
        };
        tracing::debug!(line = %id, product = %item.product_id, "Adding cart line");
        self.items.push(item);
        self.persist()?;
        self.notify();
        Ok(id)
    }

    /// Replace the quantity of the line with `id`.
    ///
    /// A quantity below 1 is rejected silently: the line keeps its prior
    /// quantity. An unknown ID is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the cart cannot be persisted.
    pub fn update_quantity(&mut self, id: LineItemId, quantity: u32) -> Result<(), StorageError> {
        if quantity < 1 {
            return Ok(());
        }
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return Ok(());
        };
        item.quantity = quantity;
        self.persist()?;
        self.notify();
        Ok(())
    }

    /// Remove the line with `id`. An absent ID is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the cart cannot be persisted.
    pub fn remove(&mut self, id: LineItemId) -> Result<(), StorageError> {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() == before {
            return Ok(());
        }
        self.persist()?;
        self.notify();
        Ok(())
    }

    /// Remove every line whose ID is in `ids`, with a single persist and a
    /// single change notification.
    ///
    /// Used at checkout completion, where the selected subset leaves the
    /// cart in one step.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the cart cannot be persisted.
    pub fn remove_many(&mut self, ids: &[LineItemId]) -> Result<(), StorageError> {
        let before = self.items.len();
        self.items.retain(|item| !ids.contains(&item.id));
        if self.items.len() == before {
            return Ok(());
        }
        if self.items.is_empty() {
            self.storage.remove(keys::CART)?;
        } else {
            self.persist()?;
        }
        self.notify();
        Ok(())
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the persisted cart cannot be removed.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.items.clear();
        self.storage.remove(keys::CART)?;
        self.notify();
        Ok(())
    }

    fn persist(&self) -> Result<(), StorageError> {
        storage::write_json(&self.storage, keys::CART, &self.items)
    }

    fn notify(&self) {
        // No receivers is fine; the header badge may simply not be mounted.
        let _ = self.events.send(CartChanged);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn new_item(name: &str, price: i64, quantity: u32) -> NewLineItem {
        NewLineItem {
            product_id: ProductId::new(1),
            name: name.to_string(),
            unit_price: Price::idr(price),
            image: format!("/images/{name}.jpg"),
            quantity,
            options: BTreeMap::new(),
            seller_name: "Toko Maju".to_string(),
            seller_slug: "toko-maju".to_string(),
            category: Some("electronics".to_string()),
        }
    }

    #[test]
    fn test_add_assigns_fresh_unique_ids() {
        let mut cart = CartStore::load(MemoryStorage::new());
        let a = cart.add(new_item("kemeja", 100_000, 1)).unwrap();
        let b = cart.add(new_item("kemeja", 100_000, 1)).unwrap();
        assert_ne!(a, b);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_update_quantity_replaces_value() {
        let mut cart = CartStore::load(MemoryStorage::new());
        let id = cart.add(new_item("sepatu", 250_000, 1)).unwrap();
        cart.update_quantity(id, 5).unwrap();
        assert_eq!(cart.get(id).unwrap().quantity, 5);
    }

    #[test]
    fn test_update_quantity_below_one_is_silently_rejected() {
        let mut cart = CartStore::load(MemoryStorage::new());
        let id = cart.add(new_item("sepatu", 250_000, 3)).unwrap();
        cart.update_quantity(id, 0).unwrap();
        assert_eq!(cart.get(id).unwrap().quantity, 3);
    }

    #[test]
    fn test_update_quantity_unknown_line_is_noop() {
        let mut cart = CartStore::load(MemoryStorage::new());
        cart.add(new_item("sepatu", 250_000, 1)).unwrap();
        cart.update_quantity(LineItemId::generate(), 4).unwrap();
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = CartStore::load(MemoryStorage::new());
        let a = cart.add(new_item("a", 1_000, 1)).unwrap();
        let _b = cart.add(new_item("b", 2_000, 1)).unwrap();

        cart.remove(a).unwrap();
        assert_eq!(cart.count(), 1);

        // Absent ID is a no-op.
        cart.remove(a).unwrap();
        assert_eq!(cart.count(), 1);

        cart.clear().unwrap();
        assert_eq!(cart.count(), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_mutations_persist_synchronously() {
        let storage = std::sync::Arc::new(MemoryStorage::new());
        let mut cart = CartStore::load(std::sync::Arc::clone(&storage));
        let id = cart.add(new_item("tas", 75_000, 2)).unwrap();

        // A second store over the same medium sees the mutation.
        let reloaded = CartStore::load(std::sync::Arc::clone(&storage));
        assert_eq!(reloaded.count(), 1);
        assert_eq!(reloaded.get(id).unwrap().quantity, 2);
    }

    #[test]
    fn test_corrupt_persisted_cart_reads_as_empty() {
        let storage = MemoryStorage::new();
        storage.write(keys::CART, "][ definitely not json").unwrap();
        let cart = CartStore::load(storage);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear_removes_persisted_key() {
        let storage = std::sync::Arc::new(MemoryStorage::new());
        let mut cart = CartStore::load(std::sync::Arc::clone(&storage));
        cart.add(new_item("a", 1_000, 1)).unwrap();
        cart.clear().unwrap();
        assert!(storage.read(keys::CART).is_none());
    }

    #[test]
    fn test_every_mutation_notifies() {
        let mut cart = CartStore::load(MemoryStorage::new());
        let mut events = cart.subscribe();

        let id = cart.add(new_item("a", 1_000, 1)).unwrap();
        cart.update_quantity(id, 2).unwrap();
        cart.remove(id).unwrap();
        cart.clear().unwrap();

        for _ in 0..4 {
            assert_eq!(events.try_recv().unwrap(), CartChanged);
        }
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_silent_rejections_do_not_notify() {
        let mut cart = CartStore::load(MemoryStorage::new());
        let id = cart.add(new_item("a", 1_000, 1)).unwrap();
        let mut events = cart.subscribe();

        cart.update_quantity(id, 0).unwrap();
        cart.remove(LineItemId::generate()).unwrap();
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_add_clamps_zero_quantity_to_one() {
        let mut cart = CartStore::load(MemoryStorage::new());
        let id = cart.add(new_item("a", 1_000, 0)).unwrap();
        assert_eq!(cart.get(id).unwrap().quantity, 1);
    }
}
