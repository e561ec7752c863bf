//! Domain types for todo lists.
//!
//! A session owns an ordered collection of [`TodoList`]s, and each list owns an
//! ordered collection of [`Todo`]s. Ids are small integers scoped to their
//! container: list ids are unique within a session, todo ids within a list.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw id
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the raw id
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Reads an id from a URL path segment
            ///
            /// Segments that are not numbers resolve to id 0, which is never
            /// issued, so lookups with them report "not found".
            #[must_use]
            pub fn from_path(segment: &str) -> Self {
                segment.parse().unwrap_or(Self(0))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

integer_id!(
    /// Identifier of a list, unique within a session
    ListId
);

integer_id!(
    /// Identifier of a todo, unique within its list
    TodoId
);

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Identifier within the parent list
    pub id: TodoId,
    /// Trimmed name, 1 to 100 characters
    pub name: String,
    /// Whether the todo is done
    pub completed: bool,
}

impl Todo {
    /// Creates an incomplete todo
    #[must_use]
    pub const fn new(id: TodoId, name: String) -> Self {
        Self {
            id,
            name,
            completed: false,
        }
    }
}

/// A named list of todos
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    /// Identifier within the session
    pub id: ListId,
    /// Trimmed name, 1 to 100 characters, unique within the session
    pub name: String,
    /// Todos in insertion order
    pub todos: Vec<Todo>,
    /// Highest todo id ever issued in this list
    #[serde(default)]
    pub(crate) last_todo_id: u64,
}

impl TodoList {
    /// Creates an empty list
    #[must_use]
    pub const fn new(id: ListId, name: String) -> Self {
        Self {
            id,
            name,
            todos: Vec::new(),
            last_todo_id: 0,
        }
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn todo(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub(crate) fn todo_mut(&mut self, id: TodoId) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|t| t.id == id)
    }

    /// Largest todo id currently in the list
    #[must_use]
    pub fn max_todo_id(&self) -> Option<u64> {
        self.todos.iter().map(|t| t.id.get()).max()
    }
}

/// All lists of one session
///
/// This is the state the list reducer operates on.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListsState {
    /// Lists in creation order
    pub lists: Vec<TodoList>,
    /// Highest list id ever issued in this session
    #[serde(default)]
    pub(crate) last_list_id: u64,
}

impl ListsState {
    /// Creates an empty collection
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lists: Vec::new(),
            last_list_id: 0,
        }
    }

    /// Returns the number of lists
    #[must_use]
    pub fn count(&self) -> usize {
        self.lists.len()
    }

    /// Returns a list by ID
    #[must_use]
    pub fn list(&self, id: ListId) -> Option<&TodoList> {
        self.lists.iter().find(|l| l.id == id)
    }

    pub(crate) fn list_mut(&mut self, id: ListId) -> Option<&mut TodoList> {
        self.lists.iter_mut().find(|l| l.id == id)
    }

    /// Whether a list other than `except` already uses `name`
    #[must_use]
    pub fn name_taken(&self, name: &str, except: Option<ListId>) -> bool {
        self.lists
            .iter()
            .any(|l| l.name == name && Some(l.id) != except)
    }

    /// Largest list id currently in the session
    #[must_use]
    pub fn max_list_id(&self) -> Option<u64> {
        self.lists.iter().map(|l| l.id.get()).max()
    }
}

/// One-shot messages shown on the next rendered view
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    /// Message describing why the last action failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Message confirming the last action
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
}

impl Flash {
    /// Whether there is nothing to show
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.error.is_none() && self.success.is_none()
    }
}

/// Actions for todo lists
///
/// Commands express what a user asked for and are validated by the reducer.
/// Events record what actually changed; the reducer returns one for every
/// accepted command and applies events it receives directly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListAction {
    // ========== Commands ==========
    /// Command: Create a list
    CreateList {
        /// Requested name (trimmed by the reducer)
        name: String,
    },

    /// Command: Rename a list
    RenameList {
        /// List to rename
        list_id: ListId,
        /// Requested name (trimmed by the reducer)
        name: String,
    },

    /// Command: Delete a list (no-op when it does not exist)
    DeleteList {
        /// List to delete
        list_id: ListId,
    },

    /// Command: Add a todo to a list
    AddTodo {
        /// Target list
        list_id: ListId,
        /// Requested todo name (trimmed by the reducer)
        name: String,
    },

    /// Command: Delete a todo (no-op when the todo does not exist)
    DeleteTodo {
        /// Owning list
        list_id: ListId,
        /// Todo to delete
        todo_id: TodoId,
    },

    /// Command: Mark a todo complete or incomplete
    SetTodoCompleted {
        /// Owning list
        list_id: ListId,
        /// Todo to update
        todo_id: TodoId,
        /// New completion flag
        completed: bool,
    },

    /// Command: Mark every todo of a list complete
    CompleteAll {
        /// Target list
        list_id: ListId,
    },

    // ========== Events ==========
    /// Event: A list was created
    ListCreated {
        /// Assigned id
        list_id: ListId,
        /// Trimmed name
        name: String,
    },

    /// Event: A list was renamed
    ListRenamed {
        /// Renamed list
        list_id: ListId,
        /// Trimmed new name
        name: String,
    },

    /// Event: A list was removed (or was already absent)
    ListDeleted {
        /// Removed list
        list_id: ListId,
    },

    /// Event: A todo was appended to a list
    TodoAdded {
        /// Owning list
        list_id: ListId,
        /// Assigned id
        todo_id: TodoId,
        /// Trimmed name
        name: String,
    },

    /// Event: A todo was removed (or was already absent)
    TodoDeleted {
        /// Owning list
        list_id: ListId,
        /// Removed todo
        todo_id: TodoId,
    },

    /// Event: A todo's completion flag was set
    TodoCompletionChanged {
        /// Owning list
        list_id: ListId,
        /// Updated todo
        todo_id: TodoId,
        /// New flag
        completed: bool,
    },

    /// Event: Every todo of a list was marked complete
    AllTodosCompleted {
        /// Target list
        list_id: ListId,
    },
}

impl ListAction {
    /// Whether this action is a command
    #[must_use]
    pub const fn is_command(&self) -> bool {
        matches!(
            self,
            Self::CreateList { .. }
                | Self::RenameList { .. }
                | Self::DeleteList { .. }
                | Self::AddTodo { .. }
                | Self::DeleteTodo { .. }
                | Self::SetTodoCompleted { .. }
                | Self::CompleteAll { .. }
        )
    }

    /// Whether this action is an event
    #[must_use]
    pub const fn is_event(&self) -> bool {
        !self.is_command()
    }

    /// The list this action targets
    #[must_use]
    pub const fn list_id(&self) -> Option<ListId> {
        match self {
            Self::CreateList { .. } => None,
            Self::RenameList { list_id, .. }
            | Self::DeleteList { list_id }
            | Self::AddTodo { list_id, .. }
            | Self::DeleteTodo { list_id, .. }
            | Self::SetTodoCompleted { list_id, .. }
            | Self::CompleteAll { list_id }
            | Self::ListCreated { list_id, .. }
            | Self::ListRenamed { list_id, .. }
            | Self::ListDeleted { list_id }
            | Self::TodoAdded { list_id, .. }
            | Self::TodoDeleted { list_id, .. }
            | Self::TodoCompletionChanged { list_id, .. }
            | Self::AllTodosCompleted { list_id } => Some(*list_id),
        }
    }
}
