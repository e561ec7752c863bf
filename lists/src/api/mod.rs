//! HTTP API for todo lists.
//!
//! Handlers turn form submissions into [`ListAction`](crate::types::ListAction)
//! commands, dispatch them through the caller's session store and answer in the
//! negotiated [`ResponseFormat`]:
//!
//! - `Page`: mutations redirect (`303 See Other`) with a flash message;
//!   rejected input re-renders the originating view with status 422
//! - `Json`: mutations answer with the affected list; failures become
//!   [`AppError`] bodies

pub mod lists;
pub mod todos;
pub mod views;

use crate::error::{ErrorKind, ListError};
use crate::session::ListSession;
use crate::types::{ListAction, ListId};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use todo_lists_web::{AppError, ResponseFormat};
use views::{FormPage, ListPage, ListView};

/// Path of the index view
pub const INDEX_PATH: &str = "/lists";

/// Path of a list's view
#[must_use]
pub fn list_path(id: ListId) -> String {
    format!("{INDEX_PATH}/{id}")
}

impl From<ListError> for AppError {
    fn from(error: ListError) -> Self {
        let message = error.to_string();
        match error {
            ListError::InvalidLength(_) => Self::validation(message),
            ListError::DuplicateName => Self::conflict(message),
            ListError::ListNotFound(id) => Self::not_found("List", id),
            ListError::TodoNotFound { todo_id, .. } => Self::not_found("Todo", todo_id),
        }
    }
}

/// View a rejected page-format submission returns to
#[derive(Debug, Clone, Copy)]
pub(crate) enum Origin {
    NewListForm,
    EditListForm(ListId),
    ListPage(ListId),
}

pub(crate) fn record_mutation(action: &'static str) {
    metrics::counter!("lists.http.mutations", "action" => action).increment(1);
}

pub(crate) async fn list_view(session: &ListSession, id: ListId) -> Option<ListView> {
    session.read(|s| s.list(id).map(ListView::from)).await
}

/// Flash a success message and send the browser to `to`
pub(crate) async fn redirect_with_success(
    session: &ListSession,
    message: &str,
    to: &str,
) -> Response {
    session.flash_success(message).await;
    Redirect::to(to).into_response()
}

/// Dispatch `action` through the session store
///
/// JSON clients get the affected list alongside the event, read before the
/// store is released so no other request of the session can slip in between.
pub(crate) async fn dispatch(
    session: &ListSession,
    format: ResponseFormat,
    action: ListAction,
) -> Result<(ListAction, Option<ListView>), ListError> {
    let want_view = format.is_json();
    session
        .send_and_read(action, |state, event| {
            let view = if want_view {
                event.list_id().and_then(|id| state.list(id)).map(ListView::from)
            } else {
                None
            };
            (event.clone(), view)
        })
        .await
}

/// Answer in JSON with a list view captured by [`dispatch`]
pub(crate) fn json_list(view: Option<ListView>, id: ListId, status: StatusCode) -> Response {
    match view {
        Some(view) => (status, Json(view)).into_response(),
        None => AppError::from(ListError::ListNotFound(id)).into_response(),
    }
}

/// Answer a request whose list or todo does not exist
pub(crate) async fn missing(
    session: &ListSession,
    format: ResponseFormat,
    error: ListError,
) -> Response {
    if format.is_json() {
        return AppError::from(error).into_response();
    }

    tracing::debug!(%error, "Redirecting after failed lookup");
    session.flash_error(error.to_string()).await;
    match error {
        ListError::TodoNotFound { list_id, .. } => Redirect::to(&list_path(list_id)),
        _ => Redirect::to(INDEX_PATH),
    }
    .into_response()
}

/// Answer a rejected command
///
/// Page-format validation failures re-render `origin` with the error and
/// status 422, echoing the `submitted` text.
pub(crate) async fn rejected(
    session: &ListSession,
    format: ResponseFormat,
    error: ListError,
    origin: Origin,
    submitted: String,
) -> Response {
    if error.kind() == ErrorKind::NotFound {
        return missing(session, format, error).await;
    }
    if format.is_json() {
        return AppError::from(error).into_response();
    }

    session.flash_error(error.to_string()).await;
    let status = StatusCode::UNPROCESSABLE_ENTITY;

    match origin {
        Origin::NewListForm => {
            let page = FormPage::new_list(Some(submitted), session.take_flash().await);
            (status, Json(page)).into_response()
        }
        Origin::EditListForm(id) => match list_view(session, id).await {
            Some(list) => {
                let page = FormPage::edit_list(list, Some(submitted), session.take_flash().await);
                (status, Json(page)).into_response()
            }
            None => missing(session, format, ListError::ListNotFound(id)).await,
        },
        Origin::ListPage(id) => match list_view(session, id).await {
            Some(list) => {
                let page = ListPage {
                    list,
                    todo: Some(submitted),
                    flash: session.take_flash().await,
                };
                (status, Json(page)).into_response()
            }
            None => missing(session, format, ListError::ListNotFound(id)).await,
        },
    }
}
