use std::sync::{Arc, RwLock, RwLockWriteGuard};

use log::{error, warn};
use rust_decimal::Decimal;

use super::cart_model::{Cart, CartItem, NewCartItem};
use super::cart_traits::CartPersisterTrait;
use crate::events::{DomainEvent, DomainEventSink, NoOpDomainEventSink};

/// Single source of truth for the shopping cart within a session.
///
/// All mutations are synchronous state transitions serialized through the
/// inner lock; every successful mutation is persisted through the
/// serialize/deserialize boundary and announced on the event sink. Cart
/// mutations never fail visibly: persistence problems are logged and the
/// in-memory state change still applies.
pub struct CartStore {
    cart: RwLock<Cart>,
    persister: Arc<dyn CartPersisterTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl CartStore {
    pub fn new(persister: Arc<dyn CartPersisterTrait>) -> Self {
        Self::with_event_sink(persister, Arc::new(NoOpDomainEventSink))
    }

    pub fn with_event_sink(
        persister: Arc<dyn CartPersisterTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        let cart = match persister.load() {
            Ok(Some(cart)) => cart,
            Ok(None) => Cart::default(),
            Err(e) => {
                warn!("Failed to load persisted cart, starting empty: {}", e);
                Cart::default()
            }
        };
        Self {
            cart: RwLock::new(cart),
            persister,
            event_sink,
        }
    }

    /// Adds a product to the cart.
    ///
    /// If an entry with the same product id exists, its quantity is
    /// incremented by the new quantity (default 1) and the original
    /// name/price/variant fields are kept; otherwise a new entry is
    /// appended. Returns the resulting line item.
    pub fn add_item(&self, new_item: NewCartItem) -> CartItem {
        let quantity = new_item.quantity.unwrap_or(1).max(1);
        let mut cart = self.write_cart();

        let item = if let Some(existing) = cart.items.iter_mut().find(|i| i.id == new_item.id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
            existing.clone()
        } else {
            let item = CartItem {
                id: new_item.id,
                name: new_item.name,
                image: new_item.image,
                price: new_item.price,
                sale_price: new_item.sale_price,
                color: new_item.color,
                size: new_item.size,
                quantity,
                referral_code: new_item.referral_code,
            };
            cart.items.push(item.clone());
            item
        };

        self.after_mutation(&cart);
        item
    }

    /// Sets the quantity of a line item; `quantity <= 0` removes it.
    ///
    /// Returns `false` when no entry matches the id (not an error).
    pub fn update_quantity(&self, id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(id);
        }

        let mut cart = self.write_cart();
        let updated = match cart.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.quantity = quantity.clamp(1, i64::from(u32::MAX)) as u32;
                true
            }
            None => false,
        };
        if updated {
            self.after_mutation(&cart);
        }
        updated
    }

    /// Removes the entry with the matching id; no-op `false` when absent.
    pub fn remove_item(&self, id: &str) -> bool {
        let mut cart = self.write_cart();
        let before = cart.items.len();
        cart.items.retain(|item| item.id != id);
        let removed = cart.items.len() < before;
        if removed {
            self.after_mutation(&cart);
        }
        removed
    }

    /// Empties the cart.
    pub fn clear(&self) {
        let mut cart = self.write_cart();
        if cart.items.is_empty() {
            return;
        }
        cart.items.clear();
        self.after_mutation(&cart);
    }

    /// Current line items, in insertion order.
    pub fn items(&self) -> Vec<CartItem> {
        self.read_cart().items.clone()
    }

    /// Full cart snapshot.
    pub fn snapshot(&self) -> Cart {
        self.read_cart().clone()
    }

    pub fn find(&self, id: &str) -> Option<CartItem> {
        self.read_cart().find(id).cloned()
    }

    /// Sum of quantities; recomputed from the items on every call.
    pub fn total_items(&self) -> u64 {
        self.read_cart().total_items()
    }

    /// Sum of effective prices times quantities.
    pub fn total_price(&self) -> Decimal {
        self.read_cart().total_price()
    }

    fn after_mutation(&self, cart: &Cart) {
        if let Err(e) = self.persister.save(cart) {
            error!("Failed to persist cart: {}", e);
        }
        self.event_sink.emit(DomainEvent::CartUpdated {
            total_items: cart.total_items(),
            total_price: cart.total_price(),
        });
    }

    fn read_cart(&self) -> Cart {
        match self.cart.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn write_cart(&self) -> RwLockWriteGuard<'_, Cart> {
        match self.cart.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
