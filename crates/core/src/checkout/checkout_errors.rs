use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single invalid form field with a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Errors raised while submitting an order.
///
/// Connectivity failures (`Network`) and server-reported rejections
/// (`Rejected`) are kept distinct so the UI can word them differently.
/// Neither is retried automatically.
#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("Invalid checkout form: {}", format_fields(.0))]
    Invalid(Vec<FieldError>),

    #[error("Cannot submit an order for an empty cart")]
    EmptyCart,

    #[error("Could not reach the order service: {0}")]
    Network(String),

    #[error("Order was rejected: {0}")]
    Rejected(String),

    #[error("A checkout is already in progress")]
    AlreadyInProgress,

    #[error("No order is awaiting confirmation")]
    NotAwaitingConfirmation,
}

fn format_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}
