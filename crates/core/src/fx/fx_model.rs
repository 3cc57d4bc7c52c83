use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::constants::BASE_CURRENCY;

/// Currency code -> rate relative to [`BASE_CURRENCY`].
///
/// Invariant: the base currency is present with a rate of exactly 1 in every
/// table handed out by the gateway (enforced by [`RateSnapshot::new`]).
pub type RateTable = HashMap<String, Decimal>;

/// One process-wide cache entry: a rate table plus the moment it was fetched.
#[derive(Debug, Clone)]
pub struct RateSnapshot {
    pub rates: RateTable,
    pub fetched_at: DateTime<Utc>,
}

impl RateSnapshot {
    pub fn new(mut rates: RateTable, fetched_at: DateTime<Utc>) -> Self {
        // Base-currency invariant: rate 1, always present.
        rates.insert(BASE_CURRENCY.to_string(), Decimal::ONE);
        Self { rates, fetched_at }
    }
}

/// A display currency the storefront knows how to render.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SupportedCurrency {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
}

/// The currencies offered in the display-currency picker.
pub const SUPPORTED_CURRENCIES: &[SupportedCurrency] = &[
    SupportedCurrency {
        code: "XAF",
        name: "Central African CFA Franc",
        symbol: "FCFA",
    },
    SupportedCurrency {
        code: "USD",
        name: "US Dollar",
        symbol: "$",
    },
    SupportedCurrency {
        code: "EUR",
        name: "Euro",
        symbol: "€",
    },
    SupportedCurrency {
        code: "GBP",
        name: "British Pound",
        symbol: "£",
    },
    SupportedCurrency {
        code: "NGN",
        name: "Nigerian Naira",
        symbol: "₦",
    },
    SupportedCurrency {
        code: "CAD",
        name: "Canadian Dollar",
        symbol: "CA$",
    },
];

/// Looks up a supported currency by code.
pub fn supported_currency(code: &str) -> Option<&'static SupportedCurrency> {
    SUPPORTED_CURRENCIES.iter().find(|c| c.code == code)
}
