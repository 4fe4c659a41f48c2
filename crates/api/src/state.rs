use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use landing_builder_core::events::EventBus;
use landing_builder_core::generate::ContentGenerator;
use landing_builder_core::DocumentStore;
use tokio::sync::RwLock;

use crate::config::AppConfig;

/// Shared application state, passed to all handlers via Axum's `State` extractor.
/// Wrapped in `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    config: AppConfig,
    store: RwLock<DocumentStore>,
    event_bus: EventBus,
    generator: Arc<dyn ContentGenerator>,
    /// Keys of generation requests currently running.
    in_flight: Mutex<HashSet<String>>,
}

impl AppState {
    /// Build the state around `generator`. The store publishes on the same
    /// bus the listen route subscribes to.
    pub fn new(config: AppConfig, event_bus: EventBus, generator: Arc<dyn ContentGenerator>) -> Self {
        let mut store = DocumentStore::new().with_events(event_bus.clone());
        if config.seed_sample_page {
            store = store.with_sample();
        }
        Self {
            inner: Arc::new(InnerState {
                config,
                store: RwLock::new(store),
                event_bus,
                generator,
                in_flight: Mutex::new(HashSet::new()),
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &RwLock<DocumentStore> {
        &self.inner.store
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.inner.event_bus
    }

    pub fn generator(&self) -> &dyn ContentGenerator {
        self.inner.generator.as_ref()
    }

    /// Claim `key` for one generation request. Returns `None` when a request
    /// with the same key is already running; the claim is released when the
    /// returned guard drops.
    pub fn claim(&self, key: String) -> Option<InFlight> {
        let mut keys = self
            .inner
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if !keys.insert(key.clone()) {
            return None;
        }
        Some(InFlight {
            state: self.clone(),
            key,
        })
    }
}

/// Held while a generation request runs.
pub struct InFlight {
    state: AppState,
    key: String,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let mut keys = self
            .state
            .inner
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        keys.remove(&self.key);
    }
}
