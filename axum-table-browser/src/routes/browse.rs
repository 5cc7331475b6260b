//! Read-side handlers: menu, table lists, row views, forms

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::database::traits::TableStore;
use crate::render;
use crate::routes::{storage_failure, Action, BrowserState};

/// Handler for `GET /`: the action menu
pub async fn menu_handler<S: TableStore>(State(state): State<BrowserState<S>>) -> Response {
    Html(render::menu_page(&state.base_path)).into_response()
}

/// Handler for `GET /{action}`
///
/// Validates the action token, then lists every catalog table as a link
/// into that action. Unknown tokens get a 400 with a fixed plain-text body.
pub async fn list_tables_handler<S: TableStore>(
    State(state): State<BrowserState<S>>,
    Path(action): Path<String>,
) -> Response {
    let Some(action) = Action::from_path(&action) else {
        return (StatusCode::BAD_REQUEST, "Invalid action.").into_response();
    };

    match state.store.list_tables().await {
        Ok(tables) => Html(render::table_list_page(
            &state.base_path,
            action.as_str(),
            &tables,
        ))
        .into_response(),
        Err(error) => storage_failure(&error, "Error retrieving tables.".to_string()),
    }
}

/// Handler for `GET /view/{table}`: every row, storage order
pub async fn view_table_handler<S: TableStore>(
    State(state): State<BrowserState<S>>,
    Path(table): Path<String>,
) -> Response {
    match state.store.select_all(&table).await {
        Ok(rows) => Html(render::view_page(&state.base_path, &table, &rows)).into_response(),
        Err(error) => storage_failure(
            &error,
            format!("Error fetching data from table {table}."),
        ),
    }
}

/// Handler for `GET /add/{table}`: empty-row form from the column list
pub async fn add_form_handler<S: TableStore>(
    State(state): State<BrowserState<S>>,
    Path(table): Path<String>,
) -> Response {
    match state.store.describe_columns(&table).await {
        Ok(columns) => {
            Html(render::add_form_page(&state.base_path, &table, &columns)).into_response()
        }
        Err(error) => storage_failure(
            &error,
            format!("Error retrieving schema for table {table}."),
        ),
    }
}

/// Handler for `GET /delete/{table}`: rows with their rowids for selection
pub async fn delete_list_handler<S: TableStore>(
    State(state): State<BrowserState<S>>,
    Path(table): Path<String>,
) -> Response {
    match state.store.select_with_rowid(&table).await {
        Ok(rows) => Html(render::delete_page(&state.base_path, &table, &rows)).into_response(),
        Err(error) => storage_failure(
            &error,
            format!("Error retrieving data for deletion in table {table}."),
        ),
    }
}

/// Handler for `GET /update/{table}`: rows with their rowids, linked to
/// the per-row edit form
pub async fn update_list_handler<S: TableStore>(
    State(state): State<BrowserState<S>>,
    Path(table): Path<String>,
) -> Response {
    match state.store.select_with_rowid(&table).await {
        Ok(rows) => {
            Html(render::update_list_page(&state.base_path, &table, &rows)).into_response()
        }
        Err(error) => storage_failure(
            &error,
            format!("Error retrieving data for update in table {table}."),
        ),
    }
}

/// Handler for `GET /update/{table}/{id}`: single-row edit form
///
/// A missing row is not a 404 here; the form renders with empty inputs.
pub async fn edit_form_handler<S: TableStore>(
    State(state): State<BrowserState<S>>,
    Path((table, rowid)): Path<(String, i64)>,
) -> Response {
    let columns = match state.store.describe_columns(&table).await {
        Ok(columns) => columns,
        Err(error) => {
            return storage_failure(
                &error,
                format!("Error retrieving schema for table {table}."),
            )
        }
    };

    match state.store.select_one(&table, rowid).await {
        Ok(row) => Html(render::edit_form_page(
            &state.base_path,
            &table,
            rowid,
            &columns,
            row.as_ref(),
        ))
        .into_response(),
        Err(error) => storage_failure(
            &error,
            format!("Error retrieving data for update in table {table}."),
        ),
    }
}
