use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product entry in the cart, uniquely keyed by product id.
///
/// `quantity` is always >= 1; entries are removed rather than zeroed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub image: String,
    pub price: Decimal,
    #[serde(default)]
    pub sale_price: Option<Decimal>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    pub quantity: u32,
    #[serde(default)]
    pub referral_code: Option<String>,
}

impl CartItem {
    /// Price actually charged: the sale price when present.
    pub fn effective_price(&self) -> Decimal {
        self.sale_price.unwrap_or(self.price)
    }
}

/// Payload for adding a product to the cart; quantity defaults to 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub id: String,
    pub name: String,
    pub image: String,
    pub price: Decimal,
    #[serde(default)]
    pub sale_price: Option<Decimal>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub referral_code: Option<String>,
}

/// Cart aggregate: insertion-ordered line items, at most one per product id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Sum of quantities across all line items.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum over items of `(sale_price ?? price) * quantity`.
    pub fn total_price(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| item.effective_price() * Decimal::from(item.quantity))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }
}
