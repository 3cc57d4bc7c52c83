//! Checkout module - turns cart contents into a backend order and hands off
//! to the hosted payment page.

mod checkout_errors;
mod checkout_model;
mod checkout_service;
mod order_gateway;
mod validation;

#[cfg(test)]
mod validation_tests;

pub use checkout_errors::{CheckoutError, FieldError};
pub use checkout_model::{
    CardDetails, CheckoutForm, CheckoutPhase, NewOrder, OrderItem, OrderReceipt, PaymentMethod,
};
pub use checkout_service::{
    CheckoutFlow, ConfirmationDecision, ConfirmationOutcome, LoggingPaymentLauncher,
    PaymentLauncherTrait,
};
pub use order_gateway::{HttpOrderGateway, OrderGatewayTrait};
pub use validation::validate_form;
