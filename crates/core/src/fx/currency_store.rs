use std::sync::{Arc, RwLock};

use log::{error, warn};
use rust_decimal::Decimal;

use super::fx_errors::FxError;
use super::fx_model::{supported_currency, RateTable, SupportedCurrency, SUPPORTED_CURRENCIES};
use super::fx_service::{convert_with_table, FxService};
use super::fx_traits::SelectionStoreTrait;
use crate::constants::{BASE_CURRENCY, DISPLAY_DECIMAL_PRECISION};
use crate::events::{DomainEvent, DomainEventSink, NoOpDomainEventSink};

struct CurrencyState {
    currency: String,
    rates: RateTable,
    loading: bool,
    error: Option<String>,
}

/// Session-scoped currency state holder consumed by the rendering layer.
///
/// Holds the active display currency (restored from the selection store),
/// the last rate table pulled from the gateway, and a loading/error pair.
/// Mutations are announced through the event sink.
pub struct CurrencyStore {
    fx_service: Arc<FxService>,
    selection: Arc<dyn SelectionStoreTrait>,
    event_sink: Arc<dyn DomainEventSink>,
    state: RwLock<CurrencyState>,
}

impl CurrencyStore {
    pub fn new(fx_service: Arc<FxService>, selection: Arc<dyn SelectionStoreTrait>) -> Self {
        Self::with_event_sink(fx_service, selection, Arc::new(NoOpDomainEventSink))
    }

    pub fn with_event_sink(
        fx_service: Arc<FxService>,
        selection: Arc<dyn SelectionStoreTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        let currency = match selection.get() {
            Ok(Some(code)) => code,
            Ok(None) => BASE_CURRENCY.to_string(),
            Err(e) => {
                warn!("Failed to restore currency selection: {}", e);
                BASE_CURRENCY.to_string()
            }
        };
        Self {
            fx_service,
            selection,
            event_sink,
            state: RwLock::new(CurrencyState {
                currency,
                rates: RateTable::new(),
                loading: false,
                error: None,
            }),
        }
    }

    /// The active display currency code.
    pub fn currency(&self) -> String {
        self.read_state(|s| s.currency.clone())
    }

    /// The static list of currencies the storefront can display.
    pub fn supported_currencies(&self) -> &'static [SupportedCurrency] {
        SUPPORTED_CURRENCIES
    }

    pub fn loading(&self) -> bool {
        self.read_state(|s| s.loading)
    }

    pub fn error(&self) -> Option<String> {
        self.read_state(|s| s.error.clone())
    }

    /// Pulls the current rate table from the gateway into local state.
    ///
    /// Called once on startup and again on demand; there is no polling loop.
    pub async fn refresh_rates(&self) -> Result<(), FxError> {
        self.write_state(|s| {
            s.loading = true;
        });

        let result = self.fx_service.rates().await;

        match result {
            Ok(rates) => {
                let count = rates.len();
                self.write_state(|s| {
                    s.rates = rates;
                    s.loading = false;
                    s.error = None;
                });
                self.event_sink.emit(DomainEvent::RatesRefreshed {
                    currency_count: count,
                });
                Ok(())
            }
            Err(e) => {
                error!("Failed to refresh exchange rates: {}", e);
                self.write_state(|s| {
                    s.loading = false;
                    s.error = Some(e.to_string());
                });
                Err(e)
            }
        }
    }

    /// Switches the active display currency.
    ///
    /// Codes outside [`SUPPORTED_CURRENCIES`] are rejected locally without
    /// touching the selection store; a persist failure leaves the previous
    /// currency active.
    pub fn change_currency(&self, code: &str) -> Result<(), FxError> {
        if supported_currency(code).is_none() {
            warn!("Rejected unsupported display currency {}", code);
            self.write_state(|s| {
                s.error = Some(format!("Currency '{}' is not supported", code));
            });
            return Err(FxError::UnsupportedCurrency(code.to_string()));
        }

        if let Err(e) = self.selection.set(code) {
            error!("Failed to persist currency selection: {}", e);
            self.write_state(|s| {
                s.error = Some(e.to_string());
            });
            return Err(e);
        }

        self.write_state(|s| {
            s.currency = code.to_string();
            s.error = None;
        });
        self.event_sink.emit(DomainEvent::CurrencyChanged {
            currency: code.to_string(),
        });
        Ok(())
    }

    /// Converts between two currencies using the locally held rate table.
    ///
    /// Same sentinel semantics as [`FxService::convert`]: `None` on missing
    /// codes or a zero source rate, never a panic.
    pub fn convert(&self, amount: Decimal, from: &str, to: &str) -> Option<Decimal> {
        self.read_state(|s| convert_with_table(&s.rates, amount, from, to))
    }

    /// Rate of the active currency against the base, or 1 when unavailable.
    pub fn current_ratio(&self) -> Decimal {
        self.read_state(|s| s.rates.get(&s.currency).copied().unwrap_or(Decimal::ONE))
    }

    /// Converts `amount` (denominated in `from`) into the active currency
    /// and renders it with two decimals and thousands grouping.
    pub fn format_price(&self, amount: Decimal, from: &str) -> Option<String> {
        let converted = self.read_state(|s| convert_with_table(&s.rates, amount, from, &s.currency))?;
        Some(group_thousands(
            converted.round_dp(DISPLAY_DECIMAL_PRECISION),
        ))
    }

    /// Like [`format_price`](Self::format_price), prefixed with the active
    /// currency's symbol.
    pub fn format_price_with_symbol(&self, amount: Decimal, from: &str) -> Option<String> {
        let price = self.format_price(amount, from)?;
        let currency = self.currency();
        let symbol = supported_currency(&currency)
            .map(|c| c.symbol.to_string())
            .unwrap_or_else(|| currency.clone());
        Some(format!("{}{}", symbol, price))
    }

    fn read_state<T>(&self, f: impl FnOnce(&CurrencyState) -> T) -> T {
        let guard = match self.state.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&guard)
    }

    fn write_state(&self, f: impl FnOnce(&mut CurrencyState)) {
        let mut guard = match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard);
    }
}

/// Renders a decimal with two forced decimals and comma-grouped thousands.
fn group_thousands(value: Decimal) -> String {
    let raw = format!("{:.prec$}", value, prec = DISPLAY_DECIMAL_PRECISION as usize);
    let negative = raw.starts_with('-');
    let unsigned = raw.trim_start_matches('-');
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    let digits = int_part.len();
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (digits - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod format_tests {
    use super::group_thousands;
    use rust_decimal_macros::dec;

    #[test]
    fn groups_thousands_with_two_decimals() {
        assert_eq!(group_thousands(dec!(1234567)), "1,234,567.00");
        assert_eq!(group_thousands(dec!(999.5)), "999.50");
        assert_eq!(group_thousands(dec!(-1000)), "-1,000.00");
        assert_eq!(group_thousands(dec!(0)), "0.00");
    }
}
