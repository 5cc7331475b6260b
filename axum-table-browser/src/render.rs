//! HTML rendering
//!
//! Pure functions from (action, table, columns, rows) to a complete HTML
//! document. The handlers own all database access; nothing here touches
//! storage. Every dynamic string, identifiers included, goes through
//! [`escape`] before it lands in markup.

use crate::schema::{ColumnInfo, KeyedRowSet, Row, RowSet};

/// Escape text for embedding in HTML element and attribute content
pub fn escape(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for character in input.chars() {
        match character {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            other => output.push(other),
        }
    }
    output
}

/// Wrap body markup in the shared document shell
fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>
        body {{ font-family: system-ui, sans-serif; margin: 2rem; }}
        table {{ border-collapse: collapse; }}
        th, td {{ border: 1px solid #ccc; padding: 0.3rem 0.6rem; text-align: left; }}
        form.inline {{ display: inline; margin: 0; }}
        label {{ display: block; margin-top: 0.5rem; }}
    </style>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape(title),
        body = body,
    )
}

/// The action menu served at the root path
pub fn menu_page(base: &str) -> String {
    let body = format!(
        r#"<h1>Table browser</h1>
<ul>
    <li><a href="{base}/view">View a table</a></li>
    <li><a href="{base}/add">Add a row</a></li>
    <li><a href="{base}/delete">Delete a row</a></li>
    <li><a href="{base}/update">Update a row</a></li>
</ul>"#,
        base = base,
    );
    page("Table browser", &body)
}

/// Table list for one action; each entry links to the action's table page
pub fn table_list_page(base: &str, action: &str, tables: &[String]) -> String {
    let mut items = String::new();
    for table in tables {
        items.push_str(&format!(
            "    <li><a href=\"{base}/{action}/{table}\">{table}</a></li>\n",
            base = base,
            action = escape(action),
            table = escape(table),
        ));
    }

    let body = format!(
        "<h1>Select a table to {action}</h1>\n<ul>\n{items}</ul>\n<p><a href=\"{base}/\">Back to menu</a></p>",
        action = escape(action),
        items = items,
        base = base,
    );
    page(&format!("Tables - {action}"), &body)
}

/// Render a header row from column names
fn header_row(columns: &[String], extra: Option<&str>) -> String {
    let mut cells = String::new();
    for column in columns {
        cells.push_str(&format!("<th>{}</th>", escape(column)));
    }
    if let Some(label) = extra {
        cells.push_str(&format!("<th>{}</th>", label));
    }
    format!("    <tr>{}</tr>\n", cells)
}

/// Render one row's cells in header order
fn value_cells(columns: &[String], row: &Row) -> String {
    let mut cells = String::new();
    for column in columns {
        let text = row.get(column).map(|value| value.display()).unwrap_or_default();
        cells.push_str(&format!("<td>{}</td>", escape(&text)));
    }
    cells
}

/// All rows of a table, read-only
pub fn view_page(base: &str, table: &str, rows: &RowSet) -> String {
    let mut markup = String::from("<table>\n");
    markup.push_str(&header_row(&rows.columns, None));
    for row in &rows.rows {
        markup.push_str(&format!("    <tr>{}</tr>\n", value_cells(&rows.columns, row)));
    }
    markup.push_str("</table>");

    let body = format!(
        "<h1>Table {table}</h1>\n{markup}\n<p><a href=\"{base}/view\">Back to tables</a></p>",
        table = escape(table),
        markup = markup,
        base = base,
    );
    page(&format!("View {table}"), &body)
}

/// Empty-row form built from the column list
pub fn add_form_page(base: &str, table: &str, columns: &[ColumnInfo]) -> String {
    let mut inputs = String::new();
    for column in columns {
        inputs.push_str(&format!(
            "    <label>{name} ({data_type})<input name=\"{name}\"></label>\n",
            name = escape(&column.name),
            data_type = escape(&column.data_type),
        ));
    }

    let body = format!(
        r#"<h1>Add a row to {table}</h1>
<form method="post" action="{base}/add/{table}">
{inputs}    <button type="submit">Add</button>
</form>
<p><a href="{base}/add">Back to tables</a></p>"#,
        table = escape(table),
        base = base,
        inputs = inputs,
    );
    page(&format!("Add to {table}"), &body)
}

/// Row list with one delete button per row, keyed by rowid
pub fn delete_page(base: &str, table: &str, rows: &KeyedRowSet) -> String {
    let mut markup = String::from("<table>\n");
    markup.push_str(&header_row(&rows.columns, Some("")));
    for (rowid, row) in &rows.rows {
        markup.push_str(&format!(
            "    <tr>{cells}<td><form class=\"inline\" method=\"post\" action=\"{base}/delete/{table}\"><input type=\"hidden\" name=\"id\" value=\"{rowid}\"><button type=\"submit\">Delete</button></form></td></tr>\n",
            cells = value_cells(&rows.columns, row),
            base = base,
            table = escape(table),
            rowid = rowid,
        ));
    }
    markup.push_str("</table>");

    let body = format!(
        "<h1>Delete from {table}</h1>\n{markup}\n<p><a href=\"{base}/delete\">Back to tables</a></p>",
        table = escape(table),
        markup = markup,
        base = base,
    );
    page(&format!("Delete from {table}"), &body)
}

/// Row list with one edit link per row, keyed by rowid
pub fn update_list_page(base: &str, table: &str, rows: &KeyedRowSet) -> String {
    let mut markup = String::from("<table>\n");
    markup.push_str(&header_row(&rows.columns, Some("")));
    for (rowid, row) in &rows.rows {
        markup.push_str(&format!(
            "    <tr>{cells}<td><a href=\"{base}/update/{table}/{rowid}\">Edit</a></td></tr>\n",
            cells = value_cells(&rows.columns, row),
            base = base,
            table = escape(table),
            rowid = rowid,
        ));
    }
    markup.push_str("</table>");

    let body = format!(
        "<h1>Update {table}</h1>\n{markup}\n<p><a href=\"{base}/update\">Back to tables</a></p>",
        table = escape(table),
        markup = markup,
        base = base,
    );
    page(&format!("Update {table}"), &body)
}

/// Single-row edit form. When the row is absent the inputs render empty;
/// the page itself still renders.
pub fn edit_form_page(
    base: &str,
    table: &str,
    rowid: i64,
    columns: &[ColumnInfo],
    row: Option<&Row>,
) -> String {
    let mut inputs = String::new();
    for column in columns {
        let current = row
            .and_then(|row| row.get(&column.name))
            .map(|value| value.display())
            .unwrap_or_default();
        inputs.push_str(&format!(
            "    <label>{name} ({data_type})<input name=\"{name}\" value=\"{current}\"></label>\n",
            name = escape(&column.name),
            data_type = escape(&column.data_type),
            current = escape(&current),
        ));
    }

    let body = format!(
        r#"<h1>Edit row {rowid} of {table}</h1>
<form method="post" action="{base}/update/{table}">
    <input type="hidden" name="rowid" value="{rowid}">
{inputs}    <button type="submit">Save</button>
</form>
<p><a href="{base}/update/{table}">Back to rows</a></p>"#,
        rowid = rowid,
        table = escape(table),
        base = base,
        inputs = inputs,
    );
    page(&format!("Edit {table}"), &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CellValue;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<script>\"a\" & 'b'</script>"),
            "&lt;script&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/script&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_menu_links_all_actions() {
        let html = menu_page("");
        for action in ["view", "add", "delete", "update"] {
            assert!(html.contains(&format!("href=\"/{action}\"")));
        }
    }

    #[test]
    fn test_table_list_links_through_base_path() {
        let html = table_list_page("/browser", "view", &["items".to_string()]);
        assert!(html.contains("href=\"/browser/view/items\""));
    }

    #[test]
    fn test_view_page_escapes_cell_values() {
        let rows = RowSet {
            columns: vec!["name".to_string()],
            rows: vec![Row {
                cells: vec![("name".to_string(), CellValue::Text("<b>pen</b>".into()))],
            }],
        };
        let html = view_page("", "items", &rows);
        assert!(html.contains("&lt;b&gt;pen&lt;/b&gt;"));
        assert!(!html.contains("<b>pen</b>"));
    }

    #[test]
    fn test_edit_form_with_absent_row_renders_empty_inputs() {
        let columns = vec![ColumnInfo {
            name: "name".to_string(),
            data_type: "TEXT".to_string(),
            nullable: true,
            is_primary_key: false,
        }];
        let html = edit_form_page("", "items", 1, &columns, None);
        assert!(html.contains("name=\"name\" value=\"\""));
        assert!(html.contains("name=\"rowid\" value=\"1\""));
    }

    #[test]
    fn test_delete_page_has_per_row_forms() {
        let rows = KeyedRowSet {
            columns: vec!["name".to_string()],
            rows: vec![(
                7,
                Row {
                    cells: vec![("name".to_string(), CellValue::Text("pen".into()))],
                },
            )],
        };
        let html = delete_page("", "items", &rows);
        assert!(html.contains("action=\"/delete/items\""));
        assert!(html.contains("name=\"id\" value=\"7\""));
    }
}
