//! Per-session state registries.
//!
//! Carts and checkout flows are session-scoped: each `btk_session` id gets
//! its own store, created lazily on first use. Entries live for the process
//! lifetime, like the in-memory session store.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use boutika_core::cart::{
    CartPersisterTrait, CartStore, InMemoryCartPersister, JsonFileCartPersister,
};
use boutika_core::checkout::{CheckoutFlow, OrderGatewayTrait};

type PersisterFactory = Box<dyn Fn(&str) -> Arc<dyn CartPersisterTrait> + Send + Sync>;

/// Hands out one `CartStore` per session id.
pub struct CartRegistry {
    stores: RwLock<HashMap<String, Arc<CartStore>>>,
    make_persister: PersisterFactory,
}

impl CartRegistry {
    pub fn new(make_persister: PersisterFactory) -> Self {
        Self {
            stores: RwLock::new(HashMap::new()),
            make_persister,
        }
    }

    /// Carts that do not survive a restart.
    pub fn in_memory() -> Self {
        Self::new(Box::new(|_| Arc::new(InMemoryCartPersister::new())))
    }

    /// One JSON file per session under `dir`.
    pub fn json_files(dir: PathBuf) -> Self {
        Self::new(Box::new(move |session_id| {
            Arc::new(JsonFileCartPersister::new(
                dir.join(format!("{}.json", session_id)),
            ))
        }))
    }

    pub fn for_session(&self, session_id: &str) -> Arc<CartStore> {
        if let Some(store) = self.read().get(session_id) {
            return store.clone();
        }
        self.write()
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(CartStore::new((self.make_persister)(session_id))))
            .clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<CartStore>>> {
        self.stores
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<CartStore>>> {
        self.stores
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Hands out one `CheckoutFlow` per session id, so one visitor's payment
/// countdown never blocks another visitor's submission.
pub struct CheckoutRegistry {
    flows: RwLock<HashMap<String, Arc<CheckoutFlow>>>,
    gateway: Arc<dyn OrderGatewayTrait>,
}

impl CheckoutRegistry {
    pub fn new(gateway: Arc<dyn OrderGatewayTrait>) -> Self {
        Self {
            flows: RwLock::new(HashMap::new()),
            gateway,
        }
    }

    pub fn for_session(&self, session_id: &str) -> Arc<CheckoutFlow> {
        if let Some(flow) = self.read().get(session_id) {
            return flow.clone();
        }
        self.write()
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(CheckoutFlow::new(self.gateway.clone())))
            .clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<CheckoutFlow>>> {
        self.flows
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<CheckoutFlow>>> {
        self.flows
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use boutika_core::checkout::{CheckoutError, NewOrder, OrderReceipt};

    use super::*;

    struct NullGateway;

    #[async_trait::async_trait]
    impl OrderGatewayTrait for NullGateway {
        async fn submit_order(&self, _order: &NewOrder) -> Result<OrderReceipt, CheckoutError> {
            Err(CheckoutError::Network("unreachable".to_string()))
        }
    }

    #[test]
    fn each_session_gets_its_own_cart() {
        let carts = CartRegistry::in_memory();
        let a = carts.for_session("sess-a");
        let again = carts.for_session("sess-a");
        let b = carts.for_session("sess-b");

        assert!(Arc::ptr_eq(&a, &again));
        assert!(!Arc::ptr_eq(&a, &b));

        a.add_item(boutika_core::cart::NewCartItem {
            id: "p1".to_string(),
            name: "Product p1".to_string(),
            image: "/images/p1.jpg".to_string(),
            price: rust_decimal::Decimal::from(100),
            sale_price: None,
            color: None,
            size: None,
            quantity: None,
            referral_code: None,
        });
        assert_eq!(a.total_items(), 1);
        assert_eq!(b.total_items(), 0);
    }

    #[test]
    fn each_session_gets_its_own_checkout_flow() {
        let checkouts = CheckoutRegistry::new(Arc::new(NullGateway));
        let a = checkouts.for_session("sess-a");
        let again = checkouts.for_session("sess-a");
        let b = checkouts.for_session("sess-b");

        assert!(Arc::ptr_eq(&a, &again));
        assert!(!Arc::ptr_eq(&a, &b));
    }
}
