use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use boutika_core::constants::BASE_CURRENCY;
use boutika_core::fx::{supported_currency, SUPPORTED_CURRENCIES};

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;
use crate::session::{with_session_cookie, SessionId};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CurrencyResponse {
    rates: HashMap<String, Decimal>,
    currency: String,
}

/// Current rate table plus the session's display currency.
///
/// Rates are refreshed through the shared cache; the session currency is
/// initialized to the base currency only once rates were fetched, so a
/// failed upstream call never mints a half-initialized session.
async fn get_currency(
    State(state): State<Arc<AppState>>,
    session: SessionId,
) -> ApiResult<Response> {
    let rates = state.fx_service.rates().await?;

    let currency = match state.session_store.get(&session.id) {
        Some(currency) => currency,
        None => {
            state.session_store.set(&session.id, BASE_CURRENCY);
            BASE_CURRENCY.to_string()
        }
    };

    Ok(with_session_cookie(
        Json(CurrencyResponse { rates, currency }),
        &session,
    ))
}

#[derive(Deserialize)]
struct SetCurrencyRequest {
    currency: Option<String>,
}

/// Sets the session's display currency.
async fn set_currency(
    State(state): State<Arc<AppState>>,
    session: SessionId,
    body: Option<Json<SetCurrencyRequest>>,
) -> ApiResult<Response> {
    let currency = body
        .and_then(|Json(body)| body.currency)
        .map(|currency| currency.trim().to_uppercase())
        .filter(|currency| !currency.is_empty())
        .ok_or_else(|| ApiError::BadRequest("currency is required".to_string()))?;

    if supported_currency(&currency).is_none() {
        return Err(ApiError::BadRequest(format!(
            "unsupported currency: {}",
            currency
        )));
    }

    state.session_store.set(&session.id, &currency);

    Ok(with_session_cookie(
        Json(serde_json::json!({ "currency": currency })),
        &session,
    ))
}

/// Currencies the storefront can display.
async fn list_supported() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "currencies": SUPPORTED_CURRENCIES }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/currency", get(get_currency).post(set_currency))
        .route("/currency/supported", get(list_supported))
}
