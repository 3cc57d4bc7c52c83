use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use tokio::sync::oneshot;

use boutika_core::checkout::{CheckoutForm, ConfirmationDecision};

use crate::error::ApiResult;
use crate::main_lib::AppState;
use crate::session::{with_session_cookie, SessionId};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutResponse {
    order_id: String,
    payment_link: String,
}

/// Validates the form and submits the session's cart as an order.
///
/// On success the cart is cleared and the payment countdown runs in the
/// background so the flow returns to idle; the client redirects the user
/// with the returned payment link.
async fn submit_checkout(
    State(state): State<Arc<AppState>>,
    session: SessionId,
    Json(form): Json<CheckoutForm>,
) -> ApiResult<Response> {
    let cart_store = state.carts.for_session(&session.id);
    let flow = state.checkouts.for_session(&session.id);

    let cart = cart_store.snapshot();
    let receipt = flow.submit(&cart, &form).await?;
    cart_store.clear();

    tokio::spawn(async move {
        // No interactive decision over HTTP; the countdown runs out.
        let (_tx, rx) = oneshot::channel::<ConfirmationDecision>();
        if let Err(err) = flow.await_confirmation(rx).await {
            tracing::warn!("Payment countdown ended abnormally: {}", err);
        }
    });

    Ok(with_session_cookie(
        Json(CheckoutResponse {
            order_id: receipt.order_id,
            payment_link: receipt.payment_link,
        }),
        &session,
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/checkout", post(submit_checkout))
}
