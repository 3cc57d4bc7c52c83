use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::stores::{CartRegistry, CheckoutRegistry};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use boutika_core::analytics::{IpApiGeoLookup, VisitTracker};
use boutika_core::checkout::HttpOrderGateway;
use boutika_core::fx::{ExchangeRateApiProvider, FxService, RateProviderTrait, StaticRateProvider};
use boutika_core::sessions::{InMemorySessionStore, SessionStoreTrait};

pub struct AppState {
    pub fx_service: Arc<FxService>,
    pub session_store: Arc<dyn SessionStoreTrait>,
    /// One cart per `btk_session` id.
    pub carts: CartRegistry,
    /// One checkout flow per `btk_session` id.
    pub checkouts: CheckoutRegistry,
    pub visit_tracker: VisitTracker,
}

pub fn init_tracing() {
    let log_format = std::env::var("BTK_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> Arc<AppState> {
    let rate_provider: Arc<dyn RateProviderTrait> = match &config.fx_api_key {
        Some(key) => Arc::new(ExchangeRateApiProvider::new(&config.fx_api_url, key)),
        None => {
            tracing::warn!(
                "BTK_FX_API_KEY is not set; serving base-currency rates only"
            );
            Arc::new(StaticRateProvider::base_only())
        }
    };
    let fx_service = Arc::new(FxService::new(rate_provider));

    let carts = CartRegistry::json_files(PathBuf::from(&config.cart_dir));
    let gateway = Arc::new(HttpOrderGateway::new(&config.backend_api_url));
    let checkouts = CheckoutRegistry::new(gateway);

    let visit_tracker = VisitTracker::new(Arc::new(IpApiGeoLookup::new()));

    Arc::new(AppState {
        fx_service,
        session_store: Arc::new(InMemorySessionStore::new()),
        carts,
        checkouts,
        visit_tracker,
    })
}
