//! Table store trait
//!
//! This trait defines the interface the route handlers talk to. There is one
//! implementation per database engine; only SQLite is shipped.

use crate::schema::{ColumnInfo, KeyedRowSet, Row, RowSet};
use async_trait::async_trait;
use thiserror::Error;

/// Storage operations for one table at a time
///
/// Every method re-reads whatever catalog information it needs; nothing is
/// cached between calls. The table name always comes from the request path
/// and is validated against the live catalog before it is spliced into any
/// statement text.
#[async_trait]
pub trait TableStore: Send + Sync + 'static {
    /// List all user table names, excluding the engine's internal tables
    async fn list_tables(&self) -> Result<Vec<String>, StorageError>;

    /// Column names and declared types for a table, in declaration order
    async fn describe_columns(&self, table: &str) -> Result<Vec<ColumnInfo>, StorageError>;

    /// Every row of the table, in storage-native order
    async fn select_all(&self, table: &str) -> Result<RowSet, StorageError>;

    /// Every row plus its native rowid, for building delete/update targets
    async fn select_with_rowid(&self, table: &str) -> Result<KeyedRowSet, StorageError>;

    /// A single row by native rowid, or `None` if absent
    async fn select_one(&self, table: &str, rowid: i64) -> Result<Option<Row>, StorageError>;

    /// Insert one row; field keys become column names, values are bound
    async fn insert(&self, table: &str, fields: &[(String, String)]) -> Result<(), StorageError>;

    /// Update one row by rowid. The identity field itself is excluded from
    /// the SET clause; an empty field set after exclusion executes nothing.
    async fn update(
        &self,
        table: &str,
        rowid: i64,
        fields: &[(String, String)],
    ) -> Result<(), StorageError>;

    /// Delete one row by rowid. Zero rows affected is still success.
    async fn delete(&self, table: &str, rowid: i64) -> Result<(), StorageError>;
}

/// Storage error type
#[derive(Debug, Error)]
pub enum StorageError {
    /// Generic catalog/query/statement failure
    #[error("database error: {0}")]
    Query(String),

    /// Table name not present in the catalog
    #[error("table not found: {0}")]
    TableNotFound(String),

    /// Submitted field key does not name a column of the target table
    #[error("unknown column: {0}")]
    UnknownColumn(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(error: sqlx::Error) -> Self {
        StorageError::Query(error.to_string())
    }
}
