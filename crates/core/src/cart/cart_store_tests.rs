//! Tests for cart store semantics and persistence.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::cart::{
        CartPersisterTrait, CartStore, InMemoryCartPersister, JsonFileCartPersister, NewCartItem,
    };
    use crate::events::{DomainEvent, MockDomainEventSink};

    fn new_item(id: &str, price: Decimal, quantity: Option<u32>) -> NewCartItem {
        NewCartItem {
            id: id.to_string(),
            name: format!("Product {}", id),
            image: format!("/images/{}.jpg", id),
            price,
            sale_price: None,
            color: None,
            size: None,
            quantity,
            referral_code: None,
        }
    }

    fn store() -> CartStore {
        CartStore::new(Arc::new(InMemoryCartPersister::new()))
    }

    #[test]
    fn adding_same_product_merges_into_one_entry() {
        let store = store();
        store.add_item(new_item("1", dec!(1000), Some(2)));
        store.add_item(new_item("1", dec!(1000), None));
        store.add_item(new_item("1", dec!(1000), Some(4)));

        let items = store.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 7);
    }

    #[test]
    fn quantity_defaults_to_one() {
        let store = store();
        let item = store.add_item(new_item("1", dec!(500), None));
        assert_eq!(item.quantity, 1);

        // Zero requests are normalized to one as well.
        let item = store.add_item(new_item("2", dec!(500), Some(0)));
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn update_quantity_sets_value() {
        let store = store();
        store.add_item(new_item("1", dec!(100), Some(2)));

        assert!(store.update_quantity("1", 5));
        assert_eq!(store.find("1").unwrap().quantity, 5);
    }

    #[test]
    fn non_positive_quantity_removes_entry() {
        let store = store();
        store.add_item(new_item("1", dec!(100), Some(2)));
        store.add_item(new_item("2", dec!(100), Some(2)));

        assert!(store.update_quantity("1", 0));
        assert!(store.update_quantity("2", -3));
        assert!(store.items().is_empty());
    }

    #[test]
    fn removing_absent_id_is_a_noop() {
        let store = store();
        store.add_item(new_item("1", dec!(100), None));

        assert!(!store.remove_item("nope"));
        assert!(!store.update_quantity("nope", 3));
        assert_eq!(store.items().len(), 1);
    }

    #[test]
    fn totals_use_sale_price_when_present() {
        let store = store();
        store.add_item(new_item("1", dec!(1000), Some(2)));
        let mut discounted = new_item("2", dec!(500), Some(1));
        discounted.sale_price = Some(dec!(400));
        store.add_item(discounted);

        assert_eq!(store.total_items(), 3);
        assert_eq!(store.total_price(), dec!(2400));
        // Idempotent recomputation.
        assert_eq!(store.total_price(), dec!(2400));
    }

    #[test]
    fn persists_on_every_mutation() {
        let persister = Arc::new(InMemoryCartPersister::new());
        let store = CartStore::new(persister.clone());

        store.add_item(new_item("1", dec!(100), Some(2)));
        store.update_quantity("1", 5);

        // A fresh store sharing the persister sees the saved state.
        let reloaded = CartStore::new(persister);
        assert_eq!(reloaded.find("1").unwrap().quantity, 5);
    }

    #[test]
    fn survives_reload_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");

        {
            let store = CartStore::new(Arc::new(JsonFileCartPersister::new(&path)));
            let mut item = new_item("42", dec!(2500), Some(3));
            item.color = Some("black".to_string());
            item.size = Some("M".to_string());
            store.add_item(item);
        }

        let store = CartStore::new(Arc::new(JsonFileCartPersister::new(&path)));
        let item = store.find("42").unwrap();
        assert_eq!(item.quantity, 3);
        assert_eq!(item.color.as_deref(), Some("black"));
    }

    #[test]
    fn corrupt_persisted_cart_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        std::fs::write(&path, "not json at all").unwrap();

        let persister = JsonFileCartPersister::new(&path);
        assert!(persister.load().is_err());

        let store = CartStore::new(Arc::new(JsonFileCartPersister::new(&path)));
        assert!(store.items().is_empty());
    }

    #[test]
    fn clear_empties_cart() {
        let store = store();
        store.add_item(new_item("1", dec!(100), Some(2)));
        store.add_item(new_item("2", dec!(200), None));

        store.clear();
        assert!(store.items().is_empty());
        assert_eq!(store.total_items(), 0);
        assert_eq!(store.total_price(), Decimal::ZERO);
    }

    #[test]
    fn emits_cart_updated_on_each_mutation() {
        let sink = Arc::new(MockDomainEventSink::new());
        let store =
            CartStore::with_event_sink(Arc::new(InMemoryCartPersister::new()), sink.clone());

        store.add_item(new_item("1", dec!(100), Some(2)));
        store.update_quantity("1", 4);
        store.remove_item("1");

        let events = sink.events();
        assert_eq!(events.len(), 3);
        assert!(events
            .iter()
            .all(|e| matches!(e, DomainEvent::CartUpdated { .. })));
        // The last event reflects the emptied cart.
        assert!(
            matches!(events.last(), Some(DomainEvent::CartUpdated { total_items: 0, .. }))
        );
    }
}
