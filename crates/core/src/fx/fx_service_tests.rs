//! Tests for the FX rate cache and conversion semantics.

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::constants::BASE_CURRENCY;
    use crate::fx::{convert_with_table, FxError, FxService, MockClock, RateProviderTrait, RateTable};

    struct CountingProvider {
        rates: RateTable,
        calls: AtomicUsize,
        fail: AtomicBool,
    }

    impl CountingProvider {
        fn new(rates: RateTable) -> Self {
            Self {
                rates,
                calls: AtomicUsize::new(0),
                fail: AtomicBool::new(false),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn set_fail(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl RateProviderTrait for CountingProvider {
        async fn latest_rates(&self, _base_currency: &str) -> Result<RateTable, FxError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(FxError::Fetch("provider down".to_string()));
            }
            Ok(self.rates.clone())
        }
    }

    fn sample_rates() -> RateTable {
        let mut rates = RateTable::new();
        rates.insert("USD".to_string(), dec!(0.0016));
        rates.insert("EUR".to_string(), dec!(0.0015));
        rates.insert("NGN".to_string(), dec!(2.46));
        rates
    }

    fn mock_clock() -> MockClock {
        MockClock::new(Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap())
    }

    fn service(provider: Arc<CountingProvider>, clock: &MockClock) -> FxService {
        FxService::with_clock(provider, Arc::new(clock.clone()))
    }

    #[tokio::test]
    async fn fetches_once_within_refresh_interval() {
        let provider = Arc::new(CountingProvider::new(sample_rates()));
        let clock = mock_clock();
        let fx = service(provider.clone(), &clock);

        fx.rates().await.unwrap();
        fx.rates().await.unwrap();
        clock.advance(Duration::minutes(30));
        fx.rates().await.unwrap();

        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn refreshes_after_interval_expires() {
        let provider = Arc::new(CountingProvider::new(sample_rates()));
        let clock = mock_clock();
        let fx = service(provider.clone(), &clock);

        fx.rates().await.unwrap();
        clock.advance(Duration::minutes(61));
        fx.rates().await.unwrap();

        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_snapshot() {
        let provider = Arc::new(CountingProvider::new(sample_rates()));
        let clock = mock_clock();
        let fx = service(provider.clone(), &clock);

        fx.rates().await.unwrap();
        clock.advance(Duration::hours(2));
        provider.set_fail(true);

        let err = fx.rates().await.unwrap_err();
        assert!(matches!(err, FxError::Fetch(_)));

        // Stale cache stays readable and usable for conversion.
        let cached = fx.cached_rates().unwrap();
        assert_eq!(cached.get("USD"), Some(&dec!(0.0016)));
        assert_eq!(fx.convert(dec!(1000), BASE_CURRENCY, "USD"), Some(dec!(1.6)));
    }

    #[tokio::test]
    async fn base_currency_is_always_one() {
        // Provider table deliberately omits the base currency.
        let provider = Arc::new(CountingProvider::new(sample_rates()));
        let clock = mock_clock();
        let fx = service(provider, &clock);

        let rates = fx.rates().await.unwrap();
        assert_eq!(rates.get(BASE_CURRENCY), Some(&Decimal::ONE));
    }

    #[tokio::test]
    async fn identity_conversion_needs_no_snapshot() {
        let provider = Arc::new(CountingProvider::new(sample_rates()));
        let clock = mock_clock();
        let fx = service(provider.clone(), &clock);

        assert_eq!(
            fx.convert(dec!(42.5), BASE_CURRENCY, BASE_CURRENCY),
            Some(dec!(42.5))
        );
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn converts_between_currencies() {
        let provider = Arc::new(CountingProvider::new(sample_rates()));
        let clock = mock_clock();
        let fx = service(provider, &clock);
        fx.rates().await.unwrap();

        assert_eq!(fx.convert(dec!(1000), BASE_CURRENCY, "USD"), Some(dec!(1.6)));
        // USD -> NGN goes through the base: 1 / 0.0016 * 2.46
        let ngn = fx.convert(dec!(1), "USD", "NGN").unwrap();
        assert_eq!(ngn, dec!(1) / dec!(0.0016) * dec!(2.46));
    }

    #[tokio::test]
    async fn missing_code_returns_none() {
        let provider = Arc::new(CountingProvider::new(sample_rates()));
        let clock = mock_clock();
        let fx = service(provider, &clock);
        fx.rates().await.unwrap();

        assert_eq!(fx.convert(dec!(10), BASE_CURRENCY, "JPY"), None);
        assert_eq!(fx.convert(dec!(10), "JPY", BASE_CURRENCY), None);
    }

    #[tokio::test]
    async fn round_trip_is_stable_within_tolerance() {
        let provider = Arc::new(CountingProvider::new(sample_rates()));
        let clock = mock_clock();
        let fx = service(provider, &clock);
        fx.rates().await.unwrap();

        let amount = dec!(1234.56);
        let usd = fx.convert(amount, BASE_CURRENCY, "USD").unwrap();
        let back = fx.convert(usd, "USD", BASE_CURRENCY).unwrap();
        assert!((back - amount).abs() < dec!(0.000001));
    }

    #[test]
    fn zero_source_rate_returns_none() {
        let mut rates = RateTable::new();
        rates.insert("XAF".to_string(), Decimal::ONE);
        rates.insert("BAD".to_string(), Decimal::ZERO);

        assert_eq!(convert_with_table(&rates, dec!(5), "BAD", "XAF"), None);
        // Zero as the target rate is a legal (if useless) multiplication.
        assert_eq!(
            convert_with_table(&rates, dec!(5), "XAF", "BAD"),
            Some(Decimal::ZERO)
        );
    }
}
