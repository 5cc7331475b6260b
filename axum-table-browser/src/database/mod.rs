//! Database access layer
//!
//! This module provides the store interface the handlers use for schema
//! discovery and row CRUD, plus the SQLite implementation.

pub mod sqlite;
pub mod traits;

// Re-export the main trait
pub use traits::TableStore;
