//! Write-side handlers: insert, delete, update
//!
//! Each request performs at most one autocommit statement, then answers
//! with a 303 redirect back into the read side. Form bodies deserialize as
//! ordered (key, value) pairs so submitted field order survives.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};

use crate::database::traits::TableStore;
use crate::routes::{storage_failure, BrowserState};

/// Pull the row identity out of a form body and parse it
fn form_rowid(fields: &[(String, String)], key: &str) -> Option<i64> {
    fields
        .iter()
        .find(|(name, _)| name == key)
        .and_then(|(_, value)| value.parse().ok())
}

/// Handler for `POST /add/{table}`
///
/// Field keys become column names (allow-list-checked in the store),
/// values are parameter-bound. Success redirects to the table's view.
pub async fn insert_row_handler<S: TableStore>(
    State(state): State<BrowserState<S>>,
    Path(table): Path<String>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    match state.store.insert(&table, &fields).await {
        Ok(()) => {
            Redirect::to(&format!("{}/view/{}", state.base_path, table)).into_response()
        }
        Err(error) => storage_failure(&error, format!("Error adding data to table {table}.")),
    }
}

/// Handler for `POST /delete/{table}` with body `id=<rowid>`
///
/// Redirects back to the delete page so the listing refreshes. A rowid
/// matching no row still redirects; nothing checks the affected count.
pub async fn delete_row_handler<S: TableStore>(
    State(state): State<BrowserState<S>>,
    Path(table): Path<String>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    let Some(rowid) = form_rowid(&fields, "id") else {
        return (StatusCode::BAD_REQUEST, "Invalid row identity.").into_response();
    };

    match state.store.delete(&table, rowid).await {
        Ok(()) => {
            Redirect::to(&format!("{}/delete/{}", state.base_path, table)).into_response()
        }
        Err(error) => storage_failure(
            &error,
            format!("Error deleting row from table {table}."),
        ),
    }
}

/// Handler for `POST /update/{table}` with body `rowid=<rowid>` plus fields
///
/// With no fields beyond the identity the request executes nothing and
/// redirects back to the update listing; otherwise the row is updated and
/// the client lands on the table view.
pub async fn update_row_handler<S: TableStore>(
    State(state): State<BrowserState<S>>,
    Path(table): Path<String>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    let Some(rowid) = form_rowid(&fields, "rowid") else {
        return (StatusCode::BAD_REQUEST, "Invalid row identity.").into_response();
    };

    if !fields.iter().any(|(key, _)| key != "rowid") {
        return Redirect::to(&format!("{}/update/{}", state.base_path, table)).into_response();
    }

    match state.store.update(&table, rowid, &fields).await {
        Ok(()) => {
            Redirect::to(&format!("{}/view/{}", state.base_path, table)).into_response()
        }
        Err(error) => storage_failure(
            &error,
            format!("Error updating row in table {table}."),
        ),
    }
}
