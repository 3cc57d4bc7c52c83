//! Core error types for the Boutika storefront.
//!
//! Domain-specific errors (`FxError`, `CartError`, `CheckoutError`) live in
//! their modules and are aggregated here so callers can hold a single error
//! type across the crate.

use thiserror::Error;

use crate::cart::CartError;
use crate::checkout::CheckoutError;
use crate::fx::FxError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the storefront core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Fx error: {0}")]
    Fx(#[from] FxError),

    #[error("Cart operation failed: {0}")]
    Cart(#[from] CartError),

    #[error("Checkout failed: {0}")]
    Checkout(#[from] CheckoutError),
}
