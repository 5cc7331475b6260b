//! Request dispatch
//!
//! Maps HTTP verb + path onto the store operations and hands results to
//! the renderer. No state survives a request beyond the shared pool.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

use crate::database::traits::{StorageError, TableStore};

pub mod browse;
pub mod mutate;

/// The four dispatchable actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Add,
    Delete,
    Update,
}

impl Action {
    /// Parse a path segment; anything outside the four tokens is invalid
    pub fn from_path(segment: &str) -> Option<Self> {
        match segment {
            "view" => Some(Action::View),
            "add" => Some(Action::Add),
            "delete" => Some(Action::Delete),
            "update" => Some(Action::Update),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Add => "add",
            Action::Delete => "delete",
            Action::Update => "update",
        }
    }
}

/// Shared handler state: the store and the base path links render under
pub struct BrowserState<S> {
    pub store: Arc<S>,
    pub base_path: Arc<String>,
}

impl<S> Clone for BrowserState<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            base_path: self.base_path.clone(),
        }
    }
}

/// Convert a storage failure into its response: logged, then a plain-text
/// body naming the failing table/operation. Catalog misses map to 404,
/// everything else to 500.
pub(crate) fn storage_failure(error: &StorageError, message: String) -> Response {
    tracing::error!(%error, "{message}");

    let status = match error {
        StorageError::TableNotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, message).into_response()
}

/// Build the browser router over a store
///
/// Route shape (axum 0.8 `{param}` syntax):
/// - `GET /` — action menu
/// - `GET /{action}` — table list for a valid action, else 400
/// - `GET|POST /add/{table}`, `/delete/{table}`, `/update/{table}` — forms
///   and their submissions
/// - `GET /view/{table}` — row listing
/// - `GET /update/{table}/{id}` — single-row edit form
pub(crate) fn browser_router<S: TableStore>(state: BrowserState<S>) -> Router {
    Router::new()
        .route("/", get(browse::menu_handler::<S>))
        .route("/{action}", get(browse::list_tables_handler::<S>))
        .route("/view/{table}", get(browse::view_table_handler::<S>))
        .route(
            "/add/{table}",
            get(browse::add_form_handler::<S>).post(mutate::insert_row_handler::<S>),
        )
        .route(
            "/delete/{table}",
            get(browse::delete_list_handler::<S>).post(mutate::delete_row_handler::<S>),
        )
        .route(
            "/update/{table}",
            get(browse::update_list_handler::<S>).post(mutate::update_row_handler::<S>),
        )
        .route("/update/{table}/{id}", get(browse::edit_form_handler::<S>))
        .with_state(state)
}
