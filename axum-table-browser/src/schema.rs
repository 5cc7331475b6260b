//! Runtime schema and row types
//!
//! Nothing here is compiled against a fixed schema: tables, columns, and
//! row shapes are discovered from the database catalog on every request.

use serde::Serialize;

/// Information about a single column, as reported by the catalog
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInfo {
    /// Column name
    pub name: String,

    /// Declared SQL type (e.g., "INTEGER", "TEXT", "VARCHAR(255)").
    /// Reported by the database, not validated or coerced.
    pub data_type: String,

    /// Whether the column allows NULL values
    pub nullable: bool,

    /// Whether this column is part of the declared primary key
    pub is_primary_key: bool,
}

/// A dynamically-typed cell value, one variant per SQLite storage class
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl CellValue {
    /// Display form used by the renderer and by form pre-filling.
    ///
    /// Blobs are never rendered raw; they show as a byte-count placeholder.
    pub fn display(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Integer(value) => value.to_string(),
            CellValue::Real(value) => value.to_string(),
            CellValue::Text(value) => value.clone(),
            CellValue::Blob(bytes) => format!("[BLOB: {} bytes]", bytes.len()),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            CellValue::Null => serializer.serialize_none(),
            CellValue::Integer(value) => serializer.serialize_i64(*value),
            CellValue::Real(value) => serializer.serialize_f64(*value),
            CellValue::Text(value) => serializer.serialize_str(value),
            CellValue::Blob(bytes) => {
                serializer.serialize_str(&format!("[BLOB: {} bytes]", bytes.len()))
            }
        }
    }
}

/// One row: column name to value, in the column order the query returned
#[derive(Debug, Clone, Default, Serialize)]
pub struct Row {
    pub cells: Vec<(String, CellValue)>,
}

impl Row {
    /// Look up a cell by column name
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }
}

/// Rows plus their column-name header, for positional rendering
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowSet {
    /// Column names in result order
    pub columns: Vec<String>,

    /// The rows, discarded after rendering
    pub rows: Vec<Row>,
}

/// Like [`RowSet`], but each row carries its native rowid for
/// update/delete targeting
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyedRowSet {
    /// Column names in result order (rowid excluded)
    pub columns: Vec<String>,

    /// (rowid, row) pairs
    pub rows: Vec<(i64, Row)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_display() {
        assert_eq!(CellValue::Null.display(), "");
        assert_eq!(CellValue::Integer(42).display(), "42");
        assert_eq!(CellValue::Real(1.5).display(), "1.5");
        assert_eq!(CellValue::Text("pen".into()).display(), "pen");
        assert_eq!(CellValue::Blob(vec![0, 1, 2]).display(), "[BLOB: 3 bytes]");
    }

    #[test]
    fn test_cell_value_serializes_to_json() {
        assert_eq!(
            serde_json::to_value(CellValue::Integer(3)).unwrap(),
            serde_json::json!(3)
        );
        assert_eq!(
            serde_json::to_value(CellValue::Null).unwrap(),
            serde_json::Value::Null
        );
        assert_eq!(
            serde_json::to_value(CellValue::Blob(vec![1, 2])).unwrap(),
            serde_json::json!("[BLOB: 2 bytes]")
        );
    }

    #[test]
    fn test_row_lookup_by_name() {
        let row = Row {
            cells: vec![
                ("name".to_string(), CellValue::Text("pen".into())),
                ("qty".to_string(), CellValue::Integer(3)),
            ],
        };
        assert_eq!(row.get("qty"), Some(&CellValue::Integer(3)));
        assert_eq!(row.get("missing"), None);
    }
}
