use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::CartItem;

/// Payment methods offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Mtn,
    Orange,
    Card,
    PayOnDelivery,
}

impl PaymentMethod {
    /// Mobile-money methods require a phone number.
    pub fn is_mobile_money(&self) -> bool {
        matches!(self, PaymentMethod::Mtn | PaymentMethod::Orange)
    }

    pub fn is_pay_on_delivery(&self) -> bool {
        matches!(self, PaymentMethod::PayOnDelivery)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Mtn => "mtn",
            PaymentMethod::Orange => "orange",
            PaymentMethod::Card => "card",
            PaymentMethod::PayOnDelivery => "pay_on_delivery",
        }
    }
}

/// Card fields collected when paying by card.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub number: String,
    /// `MM/YY`.
    pub expiry: String,
    pub cvc: String,
}

/// Shipping/contact details collected on the checkout form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub full_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub card: Option<CardDetails>,
}

/// Line item as the backend order API expects it (snake_case wire contract).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub product: String,
    pub quantity: u32,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl OrderItem {
    pub fn from_cart_item(item: &CartItem) -> Self {
        Self {
            product: item.id.clone(),
            quantity: item.quantity,
            price: item.price,
            sale_price: item.sale_price,
            color: item.color.clone(),
            size: item.size.clone(),
        }
    }
}

/// Order-creation request body for `POST {backend}/content/orders/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub email: String,
    pub shipping_address: String,
    pub pay_on_delivery: bool,
    pub items: Vec<OrderItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
}

/// Successful order creation: the backend order id plus the hosted payment
/// link the user is redirected to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub order_id: String,
    pub payment_link: String,
}

/// Where the checkout flow currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutPhase {
    /// Form displayed, cart and shipping fields editable.
    Idle,
    /// Form submitted, local validation running.
    Submitting,
    /// Order-creation request in flight.
    OrderPending,
    /// Order accepted; the payment-link countdown is running.
    AwaitingConfirmation { receipt: OrderReceipt },
    /// Submission failed; the message is kept for display.
    Failed { message: String },
}
