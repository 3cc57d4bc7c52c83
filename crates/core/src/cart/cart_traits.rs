use super::cart_errors::CartError;
use super::cart_model::Cart;

/// Serialize/deserialize boundary for durable cart storage.
///
/// All persistence is explicit: the store loads once at construction and
/// saves the full cart after every mutation. Implementations must be safe to
/// share across threads; last write wins when several stores share one
/// backend.
pub trait CartPersisterTrait: Send + Sync {
    /// Loads the persisted cart, `None` when nothing was stored yet.
    fn load(&self) -> Result<Option<Cart>, CartError>;

    /// Persists the full cart state.
    fn save(&self, cart: &Cart) -> Result<(), CartError>;
}
