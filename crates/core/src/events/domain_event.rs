//! Domain event types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Domain events emitted by the state stores after successful mutations.
///
/// These events represent facts about storefront state changes. Runtime
/// adapters translate them into platform-specific actions (re-rendering,
/// badge updates, analytics).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// The cart contents changed (item added, quantity updated, removal, clear).
    CartUpdated {
        total_items: u64,
        total_price: Decimal,
    },

    /// The session's display currency changed.
    CurrencyChanged { currency: String },

    /// A fresh rate table was loaded into the currency state.
    RatesRefreshed { currency_count: usize },

    /// An order was accepted by the backend and a payment link issued.
    OrderPlaced { order_id: String },
}
