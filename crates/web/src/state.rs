//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::WebConfig;
use crate::store::catalog::CatalogTable;
use crate::store::users::UserTable;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the two CSV tables. Per-browser navigation state lives
/// in the session, not here.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: WebConfig,
    users: UserTable,
    catalog: CatalogTable,
}

impl AppState {
    /// Create a new application state from configuration.
    #[must_use]
    pub fn new(config: WebConfig) -> Self {
        let users = UserTable::new(config.users_csv.clone());
        let catalog = CatalogTable::new(config.images_csv.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                users,
                catalog,
            }),
        }
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &WebConfig {
        &self.inner.config
    }

    /// Get a reference to the user table.
    #[must_use]
    pub fn users(&self) -> &UserTable {
        &self.inner.users
    }

    /// Get a reference to the image catalog.
    #[must_use]
    pub fn catalog(&self) -> &CatalogTable {
        &self.inner.catalog
    }
}
