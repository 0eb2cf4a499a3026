//! Shared handle to the active configuration.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::schema::Config;

/// Holds the currently active configuration.
///
/// The config is immutable once published; a reload swaps the whole
/// `Arc<Config>` in one atomic store, so a concurrent reader always sees
/// either the fully-old or fully-new value, never a mix of fields.
pub struct ConfigStore {
    current: ArcSwap<Config>,
}

impl ConfigStore {
    /// Create a store holding an already-validated configuration.
    pub fn new(initial: Config) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
        }
    }

    /// Get the active configuration.
    pub fn get(&self) -> Arc<Config> {
        self.current.load_full()
    }

    /// Atomically replace the active configuration.
    ///
    /// Callers must only pass configs that already passed loading and
    /// validation; the store itself never parses or rejects.
    pub fn replace(&self, next: Config) {
        self.current.store(Arc::new(next));
    }
}
