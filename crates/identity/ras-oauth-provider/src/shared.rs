//! Hot-reloadable handle to a provider configuration.

use crate::provider::ProviderConfig;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// Shares one [`ProviderConfig`] between request handlers and lets a reload
/// swap the whole record at once.
///
/// Readers take an `Arc` snapshot and keep using it even if a reload happens
/// meanwhile; they never observe fields from two different records.
#[derive(Clone)]
pub struct SharedProviderConfig {
    current: Arc<RwLock<Arc<ProviderConfig>>>,
}

impl SharedProviderConfig {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(config))),
        }
    }

    /// Snapshot of the active record.
    pub fn current(&self) -> Arc<ProviderConfig> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Installs `config` and returns the record it replaced.
    pub fn replace(&self, config: ProviderConfig) -> Arc<ProviderConfig> {
        let next = Arc::new(config);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *guard, next);
        drop(guard);

        info!("Provider configuration replaced");
        previous
    }
}

impl From<ProviderConfig> for SharedProviderConfig {
    fn from(config: ProviderConfig) -> Self {
        Self::new(config)
    }
}

impl std::fmt::Debug for SharedProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedProviderConfig")
            .field("current", &self.current())
            .finish()
    }
}
