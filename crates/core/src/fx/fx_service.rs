use std::sync::{Arc, RwLock};

use chrono::Duration;
use log::{debug, warn};
use rust_decimal::Decimal;

use super::fx_errors::FxError;
use super::fx_model::{RateSnapshot, RateTable};
use super::fx_traits::{Clock, RateProviderTrait, SystemClock};
use crate::constants::{BASE_CURRENCY, RATE_REFRESH_INTERVAL_MS};

/// Process-wide exchange-rate gateway.
///
/// Caches the provider's rate table and refreshes it at most once per
/// refresh interval. The cache is shared across all sessions; staleness of
/// up to one interval is accepted.
#[derive(Clone)]
pub struct FxService {
    provider: Arc<dyn RateProviderTrait>,
    clock: Arc<dyn Clock>,
    snapshot: Arc<RwLock<Option<RateSnapshot>>>,
    refresh_interval: Duration,
}

impl FxService {
    pub fn new(provider: Arc<dyn RateProviderTrait>) -> Self {
        Self::with_clock(provider, Arc::new(SystemClock))
    }

    pub fn with_clock(provider: Arc<dyn RateProviderTrait>, clock: Arc<dyn Clock>) -> Self {
        Self {
            provider,
            clock,
            snapshot: Arc::new(RwLock::new(None)),
            refresh_interval: Duration::milliseconds(RATE_REFRESH_INTERVAL_MS),
        }
    }

    /// Overrides the refresh interval.
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Returns the current rate table, refreshing from the provider when the
    /// cached snapshot is absent or older than the refresh interval.
    ///
    /// A failed refresh leaves the previous snapshot in place and surfaces
    /// the error to the caller. The check-then-fetch window is deliberately
    /// unlocked: two concurrent callers may both refresh, which is harmless
    /// since both fetch the same upstream data.
    pub async fn rates(&self) -> Result<RateTable, FxError> {
        if let Some(rates) = self.cached_if_fresh()? {
            return Ok(rates);
        }

        let fetched = self.provider.latest_rates(BASE_CURRENCY).await?;
        let snapshot = RateSnapshot::new(fetched, self.clock.now());
        let rates = snapshot.rates.clone();

        let mut guard = self
            .snapshot
            .write()
            .map_err(|e| FxError::Cache(e.to_string()))?;
        *guard = Some(snapshot);
        debug!("Refreshed exchange rate cache ({} currencies)", rates.len());
        Ok(rates)
    }

    /// Last cached table regardless of age, if any.
    pub fn cached_rates(&self) -> Option<RateTable> {
        self.snapshot
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|snap| snap.rates.clone()))
    }

    /// Converts `amount` between two currencies using the cached table.
    ///
    /// Returns `None` when either code is missing from the table, the source
    /// rate is zero, or no snapshot exists yet. Callers must fall back
    /// rather than fail. Identity conversions never require a snapshot.
    pub fn convert(&self, amount: Decimal, from: &str, to: &str) -> Option<Decimal> {
        if from == to {
            return Some(amount);
        }
        let guard = self.snapshot.read().ok()?;
        match guard.as_ref() {
            Some(snap) => convert_with_table(&snap.rates, amount, from, to),
            None => {
                warn!("Conversion requested before any rate table was loaded");
                None
            }
        }
    }

    fn cached_if_fresh(&self) -> Result<Option<RateTable>, FxError> {
        let guard = self
            .snapshot
            .read()
            .map_err(|e| FxError::Cache(e.to_string()))?;
        Ok(guard.as_ref().and_then(|snap| {
            if self.clock.now() - snap.fetched_at < self.refresh_interval {
                Some(snap.rates.clone())
            } else {
                None
            }
        }))
    }
}

/// Pure conversion over a rate table: `amount / rate[from] * rate[to]`.
///
/// Missing codes and a zero source rate yield `None` instead of a panic.
pub fn convert_with_table(
    rates: &RateTable,
    amount: Decimal,
    from: &str,
    to: &str,
) -> Option<Decimal> {
    if from == to {
        return Some(amount);
    }

    let from_rate = match rates.get(from) {
        Some(rate) => *rate,
        None => {
            warn!("No exchange rate for source currency {}", from);
            return None;
        }
    };
    let to_rate = match rates.get(to) {
        Some(rate) => *rate,
        None => {
            warn!("No exchange rate for target currency {}", to);
            return None;
        }
    };
    if from_rate.is_zero() {
        warn!("Zero exchange rate for source currency {}", from);
        return None;
    }

    Some(amount / from_rate * to_rate)
}
