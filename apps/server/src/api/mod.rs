use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::main_lib::AppState;

mod cart;
mod checkout;
mod currency;
mod health;
mod visits;

pub fn app_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .merge(currency::router())
        .merge(cart::router())
        .merge(checkout::router())
        .merge(visits::router())
        .merge(health::router());

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
