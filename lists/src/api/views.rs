//! View models returned by the HTTP API.
//!
//! Every view carries the pending flash messages (`error`, `success`) at the
//! top level; rendering a view consumes them.

use crate::display::{Completable, sort_for_display};
use crate::types::{Flash, ListId, Todo, TodoId, TodoList};
use serde::Serialize;

/// A todo as shown to users
#[derive(Debug, Clone, Serialize)]
pub struct TodoView {
    /// Todo ID
    pub id: TodoId,
    /// Todo name
    pub name: String,
    /// Whether the todo is done
    pub completed: bool,
}

impl From<&Todo> for TodoView {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id,
            name: todo.name.clone(),
            completed: todo.completed,
        }
    }
}

/// A list with its derived display fields
#[derive(Debug, Clone, Serialize)]
pub struct ListView {
    /// List ID
    pub id: ListId,
    /// List name
    pub name: String,
    /// Whether the list has todos and all are done
    pub complete: bool,
    /// Todos not yet done
    pub remaining: usize,
    /// All todos
    pub total: usize,
    /// `remaining/total`
    pub completion: String,
    /// Todos, incomplete first
    pub todos: Vec<TodoView>,
}

impl From<&TodoList> for ListView {
    fn from(list: &TodoList) -> Self {
        let completion = list.completion();
        Self {
            id: list.id,
            name: list.name.clone(),
            complete: list.is_complete(),
            remaining: completion.remaining,
            total: completion.total,
            completion: completion.to_string(),
            todos: sort_for_display(&list.todos)
                .into_iter()
                .map(TodoView::from)
                .collect(),
        }
    }
}

/// `GET /lists`
#[derive(Debug, Serialize)]
pub struct IndexPage {
    /// Lists, incomplete first
    pub lists: Vec<ListView>,
    /// Pending messages
    #[serde(flatten)]
    pub flash: Flash,
}

impl IndexPage {
    /// Build the index from the session's lists
    #[must_use]
    pub fn new(lists: &[TodoList], flash: Flash) -> Self {
        Self {
            lists: sort_for_display(lists)
                .into_iter()
                .map(ListView::from)
                .collect(),
            flash,
        }
    }
}

/// `GET /lists/:id`, also re-rendered when adding a todo fails
#[derive(Debug, Serialize)]
pub struct ListPage {
    /// The list
    pub list: ListView,
    /// Todo text that was rejected, echoed back for the form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todo: Option<String>,
    /// Pending messages
    #[serde(flatten)]
    pub flash: Flash,
}

/// Which form a [`FormPage`] shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    /// Create a list
    NewList,
    /// Rename a list
    EditList,
}

/// `GET /lists/new` and `GET /lists/:id/edit`
#[derive(Debug, Serialize)]
pub struct FormPage {
    /// Which form
    pub form: FormKind,
    /// List being edited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<ListView>,
    /// Current value of the name field
    pub list_name: String,
    /// Pending messages
    #[serde(flatten)]
    pub flash: Flash,
}

impl FormPage {
    /// Creation form, optionally echoing a rejected name
    #[must_use]
    pub fn new_list(list_name: Option<String>, flash: Flash) -> Self {
        Self {
            form: FormKind::NewList,
            list: None,
            list_name: list_name.unwrap_or_default(),
            flash,
        }
    }

    /// Rename form; the field shows `list_name` or else the current name
    #[must_use]
    pub fn edit_list(list: ListView, list_name: Option<String>, flash: Flash) -> Self {
        Self {
            form: FormKind::EditList,
            list_name: list_name.unwrap_or_else(|| list.name.clone()),
            list: Some(list),
            flash,
        }
    }
}
