//! Errors returned when a list command is rejected.

use crate::types::{ListId, TodoId};
use std::fmt;
use thiserror::Error;

/// Which user-supplied name failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    /// The name of a list
    List,
    /// The name of a todo
    Todo,
}

impl fmt::Display for NameField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "list name"),
            Self::Todo => write!(f, "todo name"),
        }
    }
}

/// Reasons a command is rejected
///
/// The `Display` text is the message shown to users.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    /// A name was empty or longer than 100 characters after trimming
    #[error("The {0} must be between 1 and 100 characters.")]
    InvalidLength(NameField),

    /// Another list already uses the requested name
    #[error("List name must be unique.")]
    DuplicateName,

    /// The referenced list does not exist
    #[error("The specified list was not found.")]
    ListNotFound(ListId),

    /// The referenced todo does not exist in its list
    #[error("The specified todo was not found.")]
    TodoNotFound {
        /// List that was searched
        list_id: ListId,
        /// Missing todo
        todo_id: TodoId,
    },
}

/// Coarse classification used to pick a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input failed validation
    InvalidLength,
    /// Input collides with an existing list
    DuplicateName,
    /// Something referenced does not exist
    NotFound,
}

impl ListError {
    /// Classify the error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidLength(_) => ErrorKind::InvalidLength,
            Self::DuplicateName => ErrorKind::DuplicateName,
            Self::ListNotFound(_) | Self::TodoNotFound { .. } => ErrorKind::NotFound,
        }
    }
}
