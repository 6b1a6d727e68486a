//! Application state for the HR API.
//!
//! Handlers share the loaded configuration and one document store. The
//! store sits behind a mutex; each request holds it for the duration of one
//! service call.

use std::sync::{Arc, Mutex};

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::store::DocumentStore;

type SharedStore = Arc<Mutex<Box<dyn DocumentStore + Send>>>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    store: SharedStore,
}

impl AppState {
    /// Creates the state from a configuration and a store.
    pub fn new(config: ConfigLoader, store: impl DocumentStore + Send + 'static) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(Mutex::new(Box::new(store))),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Runs `f` with exclusive access to the store.
    pub fn with_store<T>(
        &self,
        f: impl FnOnce(&mut dyn DocumentStore) -> EngineResult<T>,
    ) -> EngineResult<T> {
        let mut store = self.store.lock().map_err(|_| EngineError::Store {
            message: "document store lock poisoned".to_string(),
        })?;
        f(&mut **store)
    }
}
