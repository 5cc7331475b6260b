//! TableBrowserLayer - Main Axum integration layer
//!
//! This module provides the main entry point for integrating
//! axum-table-browser into an Axum application.

use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::database::sqlite::SqliteStore;
use crate::database::traits::TableStore;
use crate::routes::{browser_router, BrowserState};

/// Main layer for mounting the table browser into an Axum application
///
/// # Example
///
/// ```rust,no_run
/// use axum::Router;
/// use axum_table_browser::TableBrowserLayer;
/// use sqlx::SqlitePool;
///
/// # async fn example() {
/// let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
/// let browser = TableBrowserLayer::sqlite("/browser", pool);
/// let app = Router::new().merge(browser.into_router());
/// # }
/// ```
pub struct TableBrowserLayer<S: TableStore> {
    base_path: String,
    store: Arc<S>,
}

impl<S: TableStore> TableBrowserLayer<S> {
    /// Create a new browser at the given base path
    ///
    /// # Arguments
    ///
    /// * `base_path` - URL path the browser mounts under (e.g., "/browser");
    ///   an empty string mounts it at the application root
    /// * `store` - The table store implementation
    pub fn new(base_path: impl Into<String>, store: S) -> Self {
        let mut base_path = base_path.into();
        if base_path == "/" {
            base_path.clear();
        }
        Self {
            base_path,
            store: Arc::new(store),
        }
    }

    /// Convert into an Axum Router that can be merged
    ///
    /// All rendered links carry the base path, so the browser works the
    /// same merged at the root or nested deeper in an application.
    /// Permissive CORS is applied, as this is a development tool.
    pub fn into_router(self) -> Router {
        let state = BrowserState {
            store: self.store,
            base_path: Arc::new(self.base_path.clone()),
        };
        let routes = browser_router(state);

        let routes = if self.base_path.is_empty() {
            routes
        } else {
            Router::new().nest(&self.base_path, routes)
        };

        routes.layer(CorsLayer::permissive())
    }
}

impl TableBrowserLayer<SqliteStore> {
    /// Create a new table browser for SQLite
    ///
    /// # Arguments
    ///
    /// * `base_path` - URL path the browser mounts under
    /// * `pool` - The SQLite connection pool
    pub fn sqlite(base_path: impl Into<String>, pool: sqlx::SqlitePool) -> Self {
        Self::new(base_path, SqliteStore::new(pool))
    }
}
