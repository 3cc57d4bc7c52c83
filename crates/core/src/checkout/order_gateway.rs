use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

use super::checkout_errors::CheckoutError;
use super::checkout_model::{NewOrder, OrderReceipt};

/// Port to the backend order-creation API.
#[async_trait]
pub trait OrderGatewayTrait: Send + Sync {
    async fn submit_order(&self, order: &NewOrder) -> Result<OrderReceipt, CheckoutError>;
}

/// reqwest-backed gateway posting to `{backend}/content/orders/`.
pub struct HttpOrderGateway {
    client: Client,
    base_url: String,
}

impl HttpOrderGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreateOrderResponse {
    order: serde_json::Value,
    payment_link: String,
}

#[derive(Debug, Deserialize, Default)]
struct BackendErrorBody {
    error: Option<String>,
    detail: Option<String>,
}

#[async_trait]
impl OrderGatewayTrait for HttpOrderGateway {
    async fn submit_order(&self, order: &NewOrder) -> Result<OrderReceipt, CheckoutError> {
        let url = format!("{}/content/orders/", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .json(order)
            .send()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<BackendErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error.or(body.detail))
                .unwrap_or_else(|| format!("order service returned HTTP {}", status));
            return Err(CheckoutError::Rejected(message));
        }

        let body: CreateOrderResponse = response
            .json()
            .await
            .map_err(|e| CheckoutError::Rejected(format!("unexpected order response: {}", e)))?;

        // The backend returns the order either as a bare id or an object.
        let order_id = match &body.order {
            serde_json::Value::String(id) => id.clone(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Object(map) => map
                .get("id")
                .map(|v| match v {
                    serde_json::Value::String(id) => id.clone(),
                    other => other.to_string(),
                })
                .unwrap_or_default(),
            other => other.to_string(),
        };

        debug!("Order {} created, payment link issued", order_id);
        Ok(OrderReceipt {
            order_id,
            payment_link: body.payment_link,
        })
    }
}
