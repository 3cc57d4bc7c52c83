//! Boutika Core - storefront domain entities, services, and state stores.
//!
//! This crate contains the cart, currency, and checkout business logic for
//! the Boutika storefront. It is transport-agnostic and defines traits that
//! are implemented by runtime adapters (HTTP server, tests).

pub mod analytics;
pub mod cart;
pub mod checkout;
pub mod constants;
pub mod errors;
pub mod events;
pub mod fx;
pub mod sessions;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
