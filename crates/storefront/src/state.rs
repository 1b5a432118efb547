//! Application state shared across handlers.

use std::sync::Arc;

use bookstore_core::Bookstore;
use tokio::sync::Mutex;

use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The single [`Bookstore`] sits
/// behind one mutex; each request holds the lock for one command, so
/// interactions run one at a time.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: Mutex<Bookstore>,
}

impl AppState {
    /// Create the state with a freshly seeded store.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let store = Bookstore::new(config.admin.clone());
        Self::with_store(config, store)
    }

    /// Create the state around an existing store.
    #[must_use]
    pub fn with_store(config: StorefrontConfig, store: Bookstore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store: Mutex::new(store),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// The bookstore. Lock it for the duration of one command.
    #[must_use]
    pub fn store(&self) -> &Mutex<Bookstore> {
        &self.inner.store
    }
}
