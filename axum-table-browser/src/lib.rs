//! # axum-table-browser
//!
//! A development tool for browsing and editing SQL tables in web browsers,
//! easily integrable as an Axum router.
//!
//! ## Features
//!
//! - Dynamic schema discovery for any SQLite database, no per-table code
//! - Server-rendered HTML views for listing, adding, updating, and
//!   deleting rows, keyed by the native rowid
//! - Table and column names validated against the live catalog before any
//!   statement text is composed
//!
//! ## Security Warning
//!
//! **This is a development tool only!**
//!
//! - No authentication/authorization built-in
//! - Exposes full database schema and data, including write access
//! - Concurrent edits of the same row race; last write wins
//! - Should never be exposed in production or public networks
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use axum::{Router, routing::get};
//! use axum_table_browser::TableBrowserLayer;
//! use sqlx::SqlitePool;
//!
//! #[tokio::main]
//! async fn main() {
//!     let pool = SqlitePool::connect("sqlite::memory:")
//!         .await
//!         .unwrap();
//!
//!     let app = Router::new()
//!         .route("/health", get(|| async { "ok" }))
//!         .merge(TableBrowserLayer::sqlite("/browser", pool).into_router());
//!
//!     // Serve the application...
//! }
//! ```

// Public modules
pub mod database;
pub mod layer;
pub mod render;
pub mod routes;
pub mod schema;

// Public exports
pub use layer::TableBrowserLayer;
pub use routes::Action;
pub use schema::{CellValue, ColumnInfo, KeyedRowSet, Row, RowSet};

// Re-export the store seam
pub use database::sqlite::SqliteStore;
pub use database::traits::{StorageError, TableStore};
