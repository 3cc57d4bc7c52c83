use thiserror::Error;

/// Errors raised by the cart persistence boundary.
///
/// Cart mutations themselves never fail; only loading or saving the
/// serialized cart can, and the store degrades gracefully on both.
#[derive(Error, Debug)]
pub enum CartError {
    #[error("Cart storage error: {0}")]
    Storage(String),

    #[error("Cart serialization error: {0}")]
    Serialization(String),
}
