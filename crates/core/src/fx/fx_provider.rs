//! FX rate providers.
//!
//! The live provider talks to an exchangerate-api.com style endpoint:
//! `GET {api_url}/{api_key}/latest/{BASE}` returning
//! `{ "result": "success", "conversion_rates": { "USD": 0.0016, ... } }`.

use std::collections::HashMap;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::fx_errors::FxError;
use super::fx_model::RateTable;
use super::fx_traits::RateProviderTrait;
use crate::constants::BASE_CURRENCY;

/// Client for the hosted FX rate API.
pub struct ExchangeRateApiProvider {
    client: Client,
    api_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    result: Option<String>,
    conversion_rates: Option<HashMap<String, Decimal>>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
}

impl ExchangeRateApiProvider {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl RateProviderTrait for ExchangeRateApiProvider {
    async fn latest_rates(&self, base_currency: &str) -> Result<RateTable, FxError> {
        let url = format!(
            "{}/{}/latest/{}",
            self.api_url.trim_end_matches('/'),
            self.api_key,
            base_currency
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FxError::Fetch(format!("FX provider request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(FxError::Fetch(format!(
                "FX provider returned HTTP {}",
                response.status()
            )));
        }

        let payload: LatestRatesResponse = response
            .json()
            .await
            .map_err(|e| FxError::UpstreamPayload(format!("invalid FX provider response: {}", e)))?;

        match payload.result.as_deref() {
            Some("success") => {}
            other => {
                let detail = payload
                    .error_type
                    .map(|t| format!(" ({})", t))
                    .unwrap_or_default();
                return Err(FxError::UpstreamPayload(format!(
                    "FX provider result was {:?}{}",
                    other, detail
                )));
            }
        }

        let rates = payload.conversion_rates.ok_or_else(|| {
            FxError::UpstreamPayload("FX provider response is missing conversion_rates".to_string())
        })?;

        debug!(
            "Fetched {} exchange rates for base {}",
            rates.len(),
            base_currency
        );
        Ok(rates)
    }
}

/// Provider backed by a fixed in-memory table.
///
/// Used when no FX API key is configured (offline/dev mode) and in tests.
pub struct StaticRateProvider {
    rates: RateTable,
}

impl StaticRateProvider {
    pub fn new(rates: RateTable) -> Self {
        Self { rates }
    }

    /// A table containing only the base currency.
    pub fn base_only() -> Self {
        let mut rates = RateTable::new();
        rates.insert(BASE_CURRENCY.to_string(), Decimal::ONE);
        Self { rates }
    }
}

#[async_trait]
impl RateProviderTrait for StaticRateProvider {
    async fn latest_rates(&self, _base_currency: &str) -> Result<RateTable, FxError> {
        Ok(self.rates.clone())
    }
}
