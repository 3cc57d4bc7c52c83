//! Cart module - the single source of truth for the shopping cart.

mod cart_errors;
mod cart_model;
mod cart_persister;
mod cart_store;
mod cart_traits;

#[cfg(test)]
mod cart_store_tests;

pub use cart_errors::CartError;
pub use cart_model::{Cart, CartItem, NewCartItem};
pub use cart_persister::{InMemoryCartPersister, JsonFileCartPersister};
pub use cart_store::CartStore;
pub use cart_traits::CartPersisterTrait;
