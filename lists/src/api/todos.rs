//! Todo endpoints.
//!
//! - POST /lists/:id/todos - Add a todo
//! - POST /lists/:id/todos/:todo_id - Mark a todo complete or incomplete
//! - POST /lists/:id/todos/:todo_id/destroy - Delete a todo
//! - POST /lists/:id/complete_all - Complete every todo of a list

use super::{
    Origin, dispatch, json_list, list_path, missing, record_mutation, redirect_with_success,
    rejected,
};
use crate::session::ListSession;
use crate::types::{ListAction, ListId, TodoId};
use axum::{
    Form,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use todo_lists_web::{ResponseFormat, Session};
use tracing::info;

/// Form body for adding a todo.
#[derive(Debug, Deserialize)]
pub struct TodoForm {
    /// Todo name
    #[serde(default)]
    pub todo: String,
}

/// Form body for updating a todo.
#[derive(Debug, Deserialize)]
pub struct CompletionForm {
    /// `"true"` marks the todo complete; anything else marks it incomplete
    #[serde(default)]
    pub completed: String,
}

impl CompletionForm {
    /// The requested flag
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed == "true"
    }
}

/// Add a todo to a list.
#[tracing::instrument(skip_all, fields(session = %session.id, list = %id))]
pub async fn add_todo(
    session: Session<ListSession>,
    format: ResponseFormat,
    Path(id): Path<String>,
    Form(form): Form<TodoForm>,
) -> Response {
    let list_id = ListId::from_path(&id);
    let action = ListAction::AddTodo {
        list_id,
        name: form.todo.clone(),
    };

    match dispatch(&session, format, action).await {
        Ok((_, view)) => {
            record_mutation("add_todo");
            info!("Todo added");
            if format.is_json() {
                json_list(view, list_id, StatusCode::OK)
            } else {
                redirect_with_success(&session, "The todo was added.", &list_path(list_id)).await
            }
        }
        Err(error) => rejected(&session, format, error, Origin::ListPage(list_id), form.todo).await,
    }
}

/// Delete a todo.
#[tracing::instrument(skip_all, fields(session = %session.id, list = %list, todo = %todo))]
pub async fn delete_todo(
    session: Session<ListSession>,
    format: ResponseFormat,
    Path((list, todo)): Path<(String, String)>,
) -> Response {
    let list_id = ListId::from_path(&list);
    let todo_id = TodoId::from_path(&todo);

    match session.send(ListAction::DeleteTodo { list_id, todo_id }).await {
        Ok(_) => {
            record_mutation("delete_todo");
            info!("Todo deleted");
            if format.is_json() {
                StatusCode::NO_CONTENT.into_response()
            } else {
                redirect_with_success(&session, "The todo has been deleted.", &list_path(list_id))
                    .await
            }
        }
        Err(error) => missing(&session, format, error).await,
    }
}

/// Mark a todo complete or incomplete.
#[tracing::instrument(skip_all, fields(session = %session.id, list = %list, todo = %todo))]
pub async fn update_todo(
    session: Session<ListSession>,
    format: ResponseFormat,
    Path((list, todo)): Path<(String, String)>,
    Form(form): Form<CompletionForm>,
) -> Response {
    let list_id = ListId::from_path(&list);
    let action = ListAction::SetTodoCompleted {
        list_id,
        todo_id: TodoId::from_path(&todo),
        completed: form.is_completed(),
    };

    match dispatch(&session, format, action).await {
        Ok((_, view)) => {
            record_mutation("update_todo");
            if format.is_json() {
                json_list(view, list_id, StatusCode::OK)
            } else {
                redirect_with_success(&session, "The todo has been updated.", &list_path(list_id))
                    .await
            }
        }
        Err(error) => missing(&session, format, error).await,
    }
}

/// Complete every todo of a list.
#[tracing::instrument(skip_all, fields(session = %session.id, list = %id))]
pub async fn complete_all(
    session: Session<ListSession>,
    format: ResponseFormat,
    Path(id): Path<String>,
) -> Response {
    let list_id = ListId::from_path(&id);

    match dispatch(&session, format, ListAction::CompleteAll { list_id }).await {
        Ok((_, view)) => {
            record_mutation("complete_all");
            info!("All todos completed");
            if format.is_json() {
                json_list(view, list_id, StatusCode::OK)
            } else {
                redirect_with_success(
                    &session,
                    "All todos have been completed.",
                    &list_path(list_id),
                )
                .await
            }
        }
        Err(error) => missing(&session, format, error).await,
    }
}
