//! Shared application state for the meterd gateway.
//!
//! The store is owned here and handed to handlers through axum `State`; there
//! is no process-global collection.

use std::sync::Arc;

use meterd_core::error::Result;
use meterd_core::model::fixtures;

use crate::config::MeterdConfig;
use crate::obs::MeterdMetrics;
use crate::store::{InMemoryMeterStore, MeterStore};

#[derive(Clone)]
pub struct AppState {
    cfg: Arc<MeterdConfig>,
    store: Arc<dyn MeterStore>,
    metrics: Arc<MeterdMetrics>,
}

impl AppState {
    /// Build application state with the in-memory store.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: MeterdConfig) -> Result<Self> {
        let store = if cfg.store.seed_fixtures {
            InMemoryMeterStore::with_meters(fixtures())?
        } else {
            InMemoryMeterStore::new()
        };
        Ok(Self::with_store(cfg, Arc::new(store)))
    }

    /// Build application state around an existing store.
    pub fn with_store(cfg: MeterdConfig, store: Arc<dyn MeterStore>) -> Self {
        Self {
            cfg: Arc::new(cfg),
            store,
            metrics: Arc::new(MeterdMetrics::default()),
        }
    }

    pub fn cfg(&self) -> &MeterdConfig {
        &self.cfg
    }

    pub fn store(&self) -> &dyn MeterStore {
        self.store.as_ref()
    }

    pub fn metrics(&self) -> &MeterdMetrics {
        &self.metrics
    }

    pub fn set_draining(&self) {
        self.metrics.set_draining();
    }

    pub fn is_draining(&self) -> bool {
        self.metrics.is_draining()
    }
}
