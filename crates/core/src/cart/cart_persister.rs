use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use log::debug;

use super::cart_errors::CartError;
use super::cart_model::Cart;
use super::cart_traits::CartPersisterTrait;

/// JSON-file persister: the cart survives restarts of the hosting process.
pub struct JsonFileCartPersister {
    path: PathBuf,
}

impl JsonFileCartPersister {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CartPersisterTrait for JsonFileCartPersister {
    fn load(&self) -> Result<Option<Cart>, CartError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| CartError::Storage(e.to_string()))?;
        if raw.trim().is_empty() {
            return Ok(None);
        }
        let cart = serde_json::from_str(&raw).map_err(|e| CartError::Serialization(e.to_string()))?;
        Ok(Some(cart))
    }

    fn save(&self, cart: &Cart) -> Result<(), CartError> {
        let json =
            serde_json::to_string_pretty(cart).map_err(|e| CartError::Serialization(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| CartError::Storage(e.to_string()))?;
            }
        }
        // Write-then-rename so readers never observe a partial file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| CartError::Storage(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| CartError::Storage(e.to_string()))?;
        debug!("Persisted cart to {}", self.path.display());
        Ok(())
    }
}

/// Mutex-held persister for tests and ephemeral carts.
#[derive(Default)]
pub struct InMemoryCartPersister {
    stored: Mutex<Option<Cart>>,
}

impl InMemoryCartPersister {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartPersisterTrait for InMemoryCartPersister {
    fn load(&self) -> Result<Option<Cart>, CartError> {
        let guard = match self.stored.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Ok(guard.clone())
    }

    fn save(&self, cart: &Cart) -> Result<(), CartError> {
        let mut guard = match self.stored.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(cart.clone());
        Ok(())
    }
}
