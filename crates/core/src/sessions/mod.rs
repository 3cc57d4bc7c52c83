//! Session-scoped storage for per-visitor preferences.
//!
//! The server keys sessions by an opaque cookie id; the only preference
//! carried today is the display currency.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::fx::{FxError, SelectionStoreTrait};

/// Per-session preference storage keyed by session id.
pub trait SessionStoreTrait: Send + Sync {
    fn get(&self, session_id: &str) -> Option<String>;
    fn set(&self, session_id: &str, currency: &str);
}

/// Process-local session store. Sessions do not survive a restart.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStoreTrait for InMemorySessionStore {
    fn get(&self, session_id: &str) -> Option<String> {
        self.sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(session_id)
            .cloned()
    }

    fn set(&self, session_id: &str, currency: &str) {
        self.sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(session_id.to_string(), currency.to_string());
    }
}

/// Adapts a session store to the currency-selection seam for one session.
pub struct SessionSelection {
    store: Arc<dyn SessionStoreTrait>,
    session_id: String,
}

impl SessionSelection {
    pub fn new(store: Arc<dyn SessionStoreTrait>, session_id: impl Into<String>) -> Self {
        Self {
            store,
            session_id: session_id.into(),
        }
    }
}

impl SelectionStoreTrait for SessionSelection {
    fn get(&self) -> Result<Option<String>, FxError> {
        Ok(self.store.get(&self.session_id))
    }

    fn set(&self, currency: &str) -> Result<(), FxError> {
        self.store.set(&self.session_id, currency);
        Ok(())
    }
}
