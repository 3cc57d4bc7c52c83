//! FX module - exchange-rate gateway, process-wide rate cache, and the
//! session-scoped currency state store.

mod currency_store;
mod fx_errors;
mod fx_model;
mod fx_provider;
mod fx_service;
mod fx_traits;

#[cfg(test)]
mod fx_service_tests;

pub use currency_store::CurrencyStore;
pub use fx_errors::FxError;
pub use fx_model::{
    supported_currency, RateSnapshot, RateTable, SupportedCurrency, SUPPORTED_CURRENCIES,
};
pub use fx_provider::{ExchangeRateApiProvider, StaticRateProvider};
pub use fx_service::{convert_with_table, FxService};
pub use fx_traits::{Clock, MockClock, RateProviderTrait, SelectionStoreTrait, SystemClock};
