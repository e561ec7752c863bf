//! List endpoints.
//!
//! - GET /lists - Index of all lists
//! - GET /lists/new - Creation form
//! - POST /lists - Create a list
//! - GET /lists/:id - One list with its todos
//! - GET /lists/:id/edit - Rename form
//! - POST /lists/:id - Rename a list
//! - POST /lists/:id/destroy - Delete a list

use super::views::{FormPage, IndexPage, ListPage};
use super::{
    INDEX_PATH, Origin, dispatch, json_list, list_path, list_view, missing, record_mutation,
    redirect_with_success, rejected,
};
use crate::error::ListError;
use crate::session::ListSession;
use crate::types::{ListAction, ListId};
use axum::{
    Form, Json,
    extract::Path,
    http::{StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use todo_lists_web::{ResponseFormat, Session};
use tracing::info;

// ============================================================================
// Request Types
// ============================================================================

/// Form body for creating or renaming a list.
#[derive(Debug, Deserialize)]
pub struct ListForm {
    /// Requested name
    #[serde(default)]
    pub list_name: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /` sends browsers to the index.
pub async fn root() -> Redirect {
    Redirect::to(INDEX_PATH)
}

/// Show all lists, incomplete ones first.
pub async fn index(session: Session<ListSession>) -> Json<IndexPage> {
    let flash = session.take_flash().await;
    let page = session
        .read(|state| IndexPage::new(&state.lists, flash))
        .await;
    Json(page)
}

/// Show the form for a new list.
pub async fn new_list_form(session: Session<ListSession>) -> Json<FormPage> {
    Json(FormPage::new_list(None, session.take_flash().await))
}

/// Create a list.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:4567/lists \
///   -H "Accept: application/json" \
///   -d "list_name=Groceries"
/// # 201 {"id":1,"name":"Groceries","complete":false,...}
/// ```
#[tracing::instrument(skip_all, fields(session = %session.id))]
pub async fn create_list(
    session: Session<ListSession>,
    format: ResponseFormat,
    Form(form): Form<ListForm>,
) -> Response {
    let action = ListAction::CreateList {
        name: form.list_name.clone(),
    };

    match dispatch(&session, format, action).await {
        Ok((event, view)) => {
            record_mutation("create_list");
            let Some(list_id) = event.list_id() else {
                return Redirect::to(INDEX_PATH).into_response();
            };
            info!(%list_id, "List created");

            if format.is_json() {
                json_list(view, list_id, StatusCode::CREATED)
            } else {
                let message = "The list has been successfully created.";
                redirect_with_success(&session, message, INDEX_PATH).await
            }
        }
        Err(error) => rejected(&session, format, error, Origin::NewListForm, form.list_name).await,
    }
}

/// Show one list, incomplete todos first.
pub async fn show_list(
    session: Session<ListSession>,
    format: ResponseFormat,
    Path(id): Path<String>,
) -> Response {
    let list_id = ListId::from_path(&id);
    match list_view(&session, list_id).await {
        Some(list) => Json(ListPage {
            list,
            todo: None,
            flash: session.take_flash().await,
        })
        .into_response(),
        None => missing(&session, format, ListError::ListNotFound(list_id)).await,
    }
}

/// Show the rename form of a list.
pub async fn edit_list_form(
    session: Session<ListSession>,
    format: ResponseFormat,
    Path(id): Path<String>,
) -> Response {
    let list_id = ListId::from_path(&id);
    match list_view(&session, list_id).await {
        Some(list) => {
            Json(FormPage::edit_list(list, None, session.take_flash().await)).into_response()
        }
        None => missing(&session, format, ListError::ListNotFound(list_id)).await,
    }
}

/// Rename a list.
#[tracing::instrument(skip_all, fields(session = %session.id, list = %id))]
pub async fn rename_list(
    session: Session<ListSession>,
    format: ResponseFormat,
    Path(id): Path<String>,
    Form(form): Form<ListForm>,
) -> Response {
    let list_id = ListId::from_path(&id);
    let action = ListAction::RenameList {
        list_id,
        name: form.list_name.clone(),
    };

    match dispatch(&session, format, action).await {
        Ok((_, view)) => {
            record_mutation("rename_list");
            info!("List renamed");
            if format.is_json() {
                json_list(view, list_id, StatusCode::OK)
            } else {
                redirect_with_success(&session, "The list has been updated.", &list_path(list_id))
                    .await
            }
        }
        Err(error) => {
            rejected(
                &session,
                format,
                error,
                Origin::EditListForm(list_id),
                form.list_name,
            )
            .await
        }
    }
}

/// Delete a list.
///
/// Script clients receive the index path as a plain-text body so they can
/// navigate there themselves.
#[tracing::instrument(skip_all, fields(session = %session.id, list = %id))]
pub async fn delete_list(
    session: Session<ListSession>,
    format: ResponseFormat,
    Path(id): Path<String>,
) -> Response {
    let list_id = ListId::from_path(&id);

    match session.send(ListAction::DeleteList { list_id }).await {
        Ok(_) => {
            record_mutation("delete_list");
            info!("List deleted");
            if format.is_json() {
                (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                    INDEX_PATH,
                )
                    .into_response()
            } else {
                redirect_with_success(&session, "The list has been deleted.", INDEX_PATH).await
            }
        }
        Err(error) => missing(&session, format, error).await,
    }
}
