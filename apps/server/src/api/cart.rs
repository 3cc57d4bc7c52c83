use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, put};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use boutika_core::cart::{CartItem, CartStore, NewCartItem};

use crate::main_lib::AppState;
use crate::session::{with_session_cookie, SessionId};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartResponse {
    items: Vec<CartItem>,
    total_items: u64,
    total_price: Decimal,
}

impl CartResponse {
    fn from_store(store: &CartStore) -> Self {
        let cart = store.snapshot();
        Self {
            total_items: cart.total_items(),
            total_price: cart.total_price(),
            items: cart.items,
        }
    }
}

async fn get_cart(State(state): State<Arc<AppState>>, session: SessionId) -> Response {
    let store = state.carts.for_session(&session.id);
    with_session_cookie(Json(CartResponse::from_store(&store)), &session)
}

/// Adds a product, merging with an existing line for the same id.
async fn add_item(
    State(state): State<Arc<AppState>>,
    session: SessionId,
    Json(new_item): Json<NewCartItem>,
) -> Response {
    let item = state.carts.for_session(&session.id).add_item(new_item);
    with_session_cookie((StatusCode::CREATED, Json(item)), &session)
}

#[derive(Deserialize)]
struct UpdateQuantityRequest {
    quantity: i64,
}

/// Sets a line's quantity; zero or negative removes the line.
async fn update_quantity(
    State(state): State<Arc<AppState>>,
    session: SessionId,
    Path(id): Path<String>,
    Json(body): Json<UpdateQuantityRequest>,
) -> Response {
    let store = state.carts.for_session(&session.id);
    store.update_quantity(&id, body.quantity);
    with_session_cookie(Json(CartResponse::from_store(&store)), &session)
}

async fn remove_item(
    State(state): State<Arc<AppState>>,
    session: SessionId,
    Path(id): Path<String>,
) -> Response {
    let store = state.carts.for_session(&session.id);
    store.remove_item(&id);
    with_session_cookie(Json(CartResponse::from_store(&store)), &session)
}

async fn clear_cart(State(state): State<Arc<AppState>>, session: SessionId) -> Response {
    state.carts.for_session(&session.id).clear();
    with_session_cookie(StatusCode::NO_CONTENT, &session)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cart", get(get_cart).post(add_item).delete(clear_cart))
        .route(
            "/cart/items/{id}",
            put(update_quantity).delete(remove_item),
        )
}
