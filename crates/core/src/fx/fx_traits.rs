use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use super::fx_errors::FxError;
use super::fx_model::RateTable;

/// Source of current exchange rates, keyed by base currency.
#[async_trait]
pub trait RateProviderTrait: Send + Sync {
    async fn latest_rates(&self, base_currency: &str) -> Result<RateTable, FxError>;
}

/// Time source seam so cache-age checks are testable with a mock clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used outside tests.
#[derive(Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Settable clock for tests.
#[derive(Clone)]
pub struct MockClock {
    now: Arc<RwLock<DateTime<Utc>>>,
}

impl MockClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(RwLock::new(start)),
        }
    }

    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.write().unwrap();
        *now += delta;
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.write().unwrap() = instant;
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap()
    }
}

/// Persisted display-currency selection for one session scope.
pub trait SelectionStoreTrait: Send + Sync {
    fn get(&self) -> Result<Option<String>, FxError>;
    fn set(&self, currency: &str) -> Result<(), FxError>;
}
