//! SQLite table store implementation

use crate::database::traits::{StorageError, TableStore};
use crate::schema::{CellValue, ColumnInfo, KeyedRowSet, Row, RowSet};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row as _, SqlitePool, TypeInfo, ValueRef};

/// SQLite-backed table store
///
/// Holds the shared connection pool; every statement is autocommit. Table
/// and column identifiers are checked against the live catalog before being
/// composed into statement text, then quote-escaped.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Create a new store over an open pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Quote an identifier (table or column name) for statement text
    ///
    /// SQLite uses double quotes for identifiers. Any double quote inside
    /// the identifier is escaped by doubling it.
    fn quote_identifier(identifier: &str) -> String {
        format!("\"{}\"", identifier.replace('"', "\"\""))
    }

    /// Fail unless `table` names a user table in the catalog.
    ///
    /// This runs before any statement text mentioning the table is built,
    /// so path-supplied names are never interpolated unchecked. The lookup
    /// itself is parameter-bound.
    async fn require_table(&self, table: &str) -> Result<(), StorageError> {
        let exists: Option<i64> = sqlx::query_scalar(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name = ? AND name NOT LIKE 'sqlite_%'",
        )
        .bind(table)
        .fetch_optional(&self.pool)
        .await?;

        if exists.is_none() {
            return Err(StorageError::TableNotFound(table.to_string()));
        }
        Ok(())
    }

    /// Fail unless every field key names a column of `table`.
    ///
    /// Field keys come from form bodies, so they get the same allow-list
    /// treatment as table names before being spliced into SET/VALUES text.
    async fn require_columns(
        &self,
        table: &str,
        fields: &[(String, String)],
    ) -> Result<(), StorageError> {
        let columns = self.describe_columns(table).await?;
        for (key, _) in fields {
            if !columns.iter().any(|column| column.name == *key) {
                return Err(StorageError::UnknownColumn(key.clone()));
            }
        }
        Ok(())
    }

    /// Extract one cell and convert it per the value's storage class
    fn cell_value(row: &SqliteRow, ordinal: usize) -> Result<CellValue, StorageError> {
        let raw = row
            .try_get_raw(ordinal)
            .map_err(|e| StorageError::Query(e.to_string()))?;

        if raw.is_null() {
            return Ok(CellValue::Null);
        }
        let type_name = raw.type_info().name().to_string();

        // SQLite values carry one of four non-null storage classes at
        // runtime, independent of the column's declared type.
        match type_name.as_str() {
            "INTEGER" => {
                if let Ok(value) = row.try_get::<i64, _>(ordinal) {
                    return Ok(CellValue::Integer(value));
                }
            }
            "REAL" => {
                if let Ok(value) = row.try_get::<f64, _>(ordinal) {
                    return Ok(CellValue::Real(value));
                }
            }
            "BLOB" => {
                if let Ok(value) = row.try_get::<Vec<u8>, _>(ordinal) {
                    return Ok(CellValue::Blob(value));
                }
            }
            _ => {
                if let Ok(value) = row.try_get::<String, _>(ordinal) {
                    return Ok(CellValue::Text(value));
                }
            }
        }

        // Fallback: try common decodings in order
        if let Ok(value) = row.try_get::<i64, _>(ordinal) {
            return Ok(CellValue::Integer(value));
        }
        if let Ok(value) = row.try_get::<f64, _>(ordinal) {
            return Ok(CellValue::Real(value));
        }
        if let Ok(value) = row.try_get::<String, _>(ordinal) {
            return Ok(CellValue::Text(value));
        }
        if let Ok(value) = row.try_get::<Vec<u8>, _>(ordinal) {
            return Ok(CellValue::Blob(value));
        }

        Ok(CellValue::Null)
    }

    /// Convert a fetched row into the dynamic row representation,
    /// starting at column `skip` (used to drop a projected rowid)
    fn row_cells(row: &SqliteRow, skip: usize) -> Result<Row, StorageError> {
        let mut cells = Vec::new();
        for (ordinal, column) in row.columns().iter().enumerate() {
            if ordinal < skip {
                continue;
            }
            cells.push((column.name().to_string(), Self::cell_value(row, ordinal)?));
        }
        Ok(Row { cells })
    }

    /// Build the SET clause for an update, one `"col" = ?` per field
    fn build_set_clause(fields: &[(String, String)]) -> String {
        fields
            .iter()
            .map(|(key, _)| format!("{} = ?", Self::quote_identifier(key)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[async_trait]
impl TableStore for SqliteStore {
    async fn list_tables(&self) -> Result<Vec<String>, StorageError> {
        let query =
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name";

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let mut tables = Vec::new();
        for row in rows {
            let name: String = row.try_get("name")?;
            tables.push(name);
        }
        Ok(tables)
    }

    async fn describe_columns(&self, table: &str) -> Result<Vec<ColumnInfo>, StorageError> {
        self.require_table(table).await?;

        // No parameter binding for PRAGMA arguments; the name is validated
        // above and quote-escaped here.
        let pragma = format!("PRAGMA table_info({})", Self::quote_identifier(table));
        let column_rows = sqlx::query(&pragma).fetch_all(&self.pool).await?;

        let mut columns = Vec::new();
        for row in column_rows {
            // PRAGMA table_info returns: cid, name, type, notnull, dflt_value, pk
            let name: String = row.try_get("name")?;
            let data_type: String = row.try_get("type")?;
            let not_null: i32 = row.try_get("notnull")?;
            let primary_key: i32 = row.try_get("pk")?;

            columns.push(ColumnInfo {
                name,
                data_type,
                nullable: not_null == 0,
                is_primary_key: primary_key > 0,
            });
        }
        Ok(columns)
    }

    async fn select_all(&self, table: &str) -> Result<RowSet, StorageError> {
        self.require_table(table).await?;

        let statement = format!("SELECT * FROM {}", Self::quote_identifier(table));
        let fetched = sqlx::query(&statement).fetch_all(&self.pool).await?;

        let columns = if let Some(first) = fetched.first() {
            first
                .columns()
                .iter()
                .map(|column| column.name().to_string())
                .collect()
        } else {
            // Empty table: take the header from the catalog instead
            self.describe_columns(table)
                .await?
                .into_iter()
                .map(|column| column.name)
                .collect()
        };

        let mut rows = Vec::new();
        for row in &fetched {
            rows.push(Self::row_cells(row, 0)?);
        }

        Ok(RowSet { columns, rows })
    }

    async fn select_with_rowid(&self, table: &str) -> Result<KeyedRowSet, StorageError> {
        self.require_table(table).await?;

        let statement = format!("SELECT rowid, * FROM {}", Self::quote_identifier(table));
        let fetched = sqlx::query(&statement).fetch_all(&self.pool).await?;

        let columns = if let Some(first) = fetched.first() {
            first
                .columns()
                .iter()
                .skip(1)
                .map(|column| column.name().to_string())
                .collect()
        } else {
            self.describe_columns(table)
                .await?
                .into_iter()
                .map(|column| column.name)
                .collect()
        };

        let mut rows = Vec::new();
        for row in &fetched {
            let rowid: i64 = row.try_get(0)?;
            rows.push((rowid, Self::row_cells(row, 1)?));
        }

        Ok(KeyedRowSet { columns, rows })
    }

    async fn select_one(&self, table: &str, rowid: i64) -> Result<Option<Row>, StorageError> {
        self.require_table(table).await?;

        let statement = format!(
            "SELECT * FROM {} WHERE rowid = ?",
            Self::quote_identifier(table)
        );
        let fetched = sqlx::query(&statement)
            .bind(rowid)
            .fetch_optional(&self.pool)
            .await?;

        match fetched {
            Some(row) => Ok(Some(Self::row_cells(&row, 0)?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, table: &str, fields: &[(String, String)]) -> Result<(), StorageError> {
        self.require_columns(table, fields).await?;

        let column_list = fields
            .iter()
            .map(|(key, _)| Self::quote_identifier(key))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = fields.iter().map(|_| "?").collect::<Vec<_>>().join(", ");

        let statement = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            Self::quote_identifier(table),
            column_list,
            placeholders
        );

        let mut query = sqlx::query(&statement);
        for (_, value) in fields {
            query = query.bind(value);
        }
        query.execute(&self.pool).await?;

        Ok(())
    }

    async fn update(
        &self,
        table: &str,
        rowid: i64,
        fields: &[(String, String)],
    ) -> Result<(), StorageError> {
        // The identity field never appears in the SET clause
        let fields: Vec<(String, String)> = fields
            .iter()
            .filter(|(key, _)| key != "rowid")
            .cloned()
            .collect();

        // Nothing to set: no statement runs at all
        if fields.is_empty() {
            return Ok(());
        }

        self.require_columns(table, &fields).await?;

        let statement = format!(
            "UPDATE {} SET {} WHERE rowid = ?",
            Self::quote_identifier(table),
            Self::build_set_clause(&fields)
        );

        let mut query = sqlx::query(&statement);
        for (_, value) in &fields {
            query = query.bind(value);
        }
        let result = query.bind(rowid).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            tracing::debug!(table, rowid, "update matched no row");
        }
        Ok(())
    }

    async fn delete(&self, table: &str, rowid: i64) -> Result<(), StorageError> {
        self.require_table(table).await?;

        let statement = format!(
            "DELETE FROM {} WHERE rowid = ?",
            Self::quote_identifier(table)
        );
        let result = sqlx::query(&statement)
            .bind(rowid)
            .execute(&self.pool)
            .await?;

        // A missing rowid deletes nothing and still succeeds
        if result.rows_affected() == 0 {
            tracing::debug!(table, rowid, "delete matched no row");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_store() -> SqliteStore {
        // One connection, or each pool checkout would see its own
        // private in-memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query("CREATE TABLE items (name TEXT, qty INTEGER)")
            .execute(&pool)
            .await
            .unwrap();
        SqliteStore::new(pool)
    }

    fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(SqliteStore::quote_identifier("items"), "\"items\"");
        assert_eq!(
            SqliteStore::quote_identifier("table\"name"),
            "\"table\"\"name\""
        );
    }

    #[test]
    fn test_build_set_clause() {
        let clause = SqliteStore::build_set_clause(&fields(&[("name", "pen"), ("qty", "3")]));
        assert_eq!(clause, "\"name\" = ?, \"qty\" = ?");
    }

    #[tokio::test]
    async fn test_list_tables_excludes_internal() {
        let store = memory_store().await;
        assert_eq!(store.list_tables().await.unwrap(), vec!["items"]);
    }

    #[tokio::test]
    async fn test_describe_columns_in_declaration_order() {
        let store = memory_store().await;
        let columns = store.describe_columns("items").await.unwrap();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].name, "name");
        assert_eq!(columns[0].data_type, "TEXT");
        assert_eq!(columns[1].name, "qty");
        assert_eq!(columns[1].data_type, "INTEGER");
    }

    #[tokio::test]
    async fn test_unknown_table_is_rejected_before_interpolation() {
        let store = memory_store().await;
        let error = store.select_all("no_such_table").await.unwrap_err();
        assert!(matches!(error, StorageError::TableNotFound(_)));
    }

    #[tokio::test]
    async fn test_insert_coerces_per_column_declaration() {
        let store = memory_store().await;
        store
            .insert("items", &fields(&[("name", "pen"), ("qty", "3")]))
            .await
            .unwrap();

        let rows = store.select_all("items").await.unwrap();
        assert_eq!(rows.columns, vec!["name", "qty"]);
        assert_eq!(rows.rows.len(), 1);
        assert_eq!(rows.rows[0].get("name"), Some(&CellValue::Text("pen".into())));
        // "3" was bound as text but lands as INTEGER per column affinity
        assert_eq!(rows.rows[0].get("qty"), Some(&CellValue::Integer(3)));
    }

    #[tokio::test]
    async fn test_insert_unknown_column_is_rejected() {
        let store = memory_store().await;
        let error = store
            .insert("items", &fields(&[("name", "pen"), ("bogus", "1")]))
            .await
            .unwrap_err();
        assert!(matches!(error, StorageError::UnknownColumn(column) if column == "bogus"));
    }

    #[tokio::test]
    async fn test_select_with_rowid_pairs_identity() {
        let store = memory_store().await;
        store
            .insert("items", &fields(&[("name", "pen"), ("qty", "3")]))
            .await
            .unwrap();

        let keyed = store.select_with_rowid("items").await.unwrap();
        assert_eq!(keyed.columns, vec!["name", "qty"]);
        assert_eq!(keyed.rows.len(), 1);
        let (rowid, row) = &keyed.rows[0];
        assert_eq!(*rowid, 1);
        assert_eq!(row.get("name"), Some(&CellValue::Text("pen".into())));
    }

    #[tokio::test]
    async fn test_select_one_missing_row_is_none() {
        let store = memory_store().await;
        assert!(store.select_one("items", 42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_excludes_rowid_from_set() {
        let store = memory_store().await;
        store
            .insert("items", &fields(&[("name", "pen"), ("qty", "3")]))
            .await
            .unwrap();

        store
            .update("items", 1, &fields(&[("rowid", "1"), ("qty", "5")]))
            .await
            .unwrap();

        let row = store.select_one("items", 1).await.unwrap().unwrap();
        assert_eq!(row.get("qty"), Some(&CellValue::Integer(5)));
        assert_eq!(row.get("name"), Some(&CellValue::Text("pen".into())));
    }

    #[tokio::test]
    async fn test_update_with_no_fields_is_a_no_op() {
        let store = memory_store().await;
        store
            .insert("items", &fields(&[("name", "pen"), ("qty", "3")]))
            .await
            .unwrap();

        // Only the identity present: nothing executes, rows unchanged
        store
            .update("items", 1, &fields(&[("rowid", "1")]))
            .await
            .unwrap();

        let row = store.select_one("items", 1).await.unwrap().unwrap();
        assert_eq!(row.get("qty"), Some(&CellValue::Integer(3)));
    }

    #[tokio::test]
    async fn test_delete_missing_row_still_succeeds() {
        let store = memory_store().await;
        store
            .insert("items", &fields(&[("name", "pen"), ("qty", "3")]))
            .await
            .unwrap();

        store.delete("items", 99).await.unwrap();

        let rows = store.select_all("items").await.unwrap();
        assert_eq!(rows.rows.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let store = memory_store().await;
        store
            .insert("items", &fields(&[("name", "pen"), ("qty", "3")]))
            .await
            .unwrap();

        store.delete("items", 1).await.unwrap();
        assert!(store.select_all("items").await.unwrap().rows.is_empty());
    }

    #[tokio::test]
    async fn test_null_and_real_cells() {
        let store = memory_store().await;
        sqlx::query("CREATE TABLE readings (label TEXT, value REAL)")
            .execute(&store.pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO readings (label, value) VALUES (NULL, 1.5)")
            .execute(&store.pool)
            .await
            .unwrap();

        let rows = store.select_all("readings").await.unwrap();
        assert_eq!(rows.rows[0].get("label"), Some(&CellValue::Null));
        assert_eq!(rows.rows[0].get("value"), Some(&CellValue::Real(1.5)));
    }
}
