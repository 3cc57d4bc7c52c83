//! Visit analytics.
//!
//! Geolocation is best-effort: a failed lookup is logged and dropped, a
//! visit must never slow down or break the page that reported it.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;

/// Coarse location of a visitor as reported by the geo service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VisitOrigin {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default, rename = "query")]
    pub ip: Option<String>,
}

#[async_trait]
pub trait GeoLookupTrait: Send + Sync {
    async fn lookup(&self, ip: &str) -> anyhow::Result<VisitOrigin>;
}

/// ip-api.com JSON endpoint client.
pub struct IpApiGeoLookup {
    client: Client,
    base_url: String,
}

impl IpApiGeoLookup {
    pub fn new() -> Self {
        Self::with_base_url("http://ip-api.com/json")
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Default for IpApiGeoLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GeoLookupTrait for IpApiGeoLookup {
    async fn lookup(&self, ip: &str) -> anyhow::Result<VisitOrigin> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), ip);
        let origin = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<VisitOrigin>()
            .await?;
        Ok(origin)
    }
}

/// Fire-and-forget visit recorder.
#[derive(Clone)]
pub struct VisitTracker {
    geo: Arc<dyn GeoLookupTrait>,
}

impl VisitTracker {
    pub fn new(geo: Arc<dyn GeoLookupTrait>) -> Self {
        Self { geo }
    }

    /// Spawns the lookup and returns immediately. Failures are logged only.
    pub fn record_visit(&self, ip: &str) {
        let geo = self.geo.clone();
        let ip = ip.to_string();
        tokio::spawn(async move {
            match geo.lookup(&ip).await {
                Ok(origin) => debug!(
                    "Visit from {} ({}, {})",
                    origin.ip.as_deref().unwrap_or(&ip),
                    origin.city.as_deref().unwrap_or("unknown city"),
                    origin.country.as_deref().unwrap_or("unknown country"),
                ),
                Err(err) => warn!("Geo lookup failed for {}: {}", ip, err),
            }
        });
    }
}
