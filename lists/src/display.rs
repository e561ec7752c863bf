//! Read-only queries used when rendering lists.

use crate::types::{Todo, TodoList};
use serde::Serialize;
use std::fmt;

/// Something that is either done or not
pub trait Completable {
    /// Whether the item counts as complete
    fn is_complete(&self) -> bool;
}

impl Completable for Todo {
    fn is_complete(&self) -> bool {
        self.completed
    }
}

/// A list is complete when it has at least one todo and all of them are done.
impl Completable for TodoList {
    fn is_complete(&self) -> bool {
        !self.todos.is_empty() && self.todos.iter().all(|t| t.completed)
    }
}

/// Remaining and total todo counts of a list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Completion {
    /// Todos not yet completed
    pub remaining: usize,
    /// All todos
    pub total: usize,
}

/// Renders as `remaining/total`
impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.remaining, self.total)
    }
}

impl TodoList {
    /// Count remaining and total todos
    #[must_use]
    pub fn completion(&self) -> Completion {
        Completion {
            remaining: self.todos.iter().filter(|t| !t.completed).count(),
            total: self.todos.len(),
        }
    }
}

/// Order items for display: incomplete first, then complete
///
/// The sort is stable; items keep their relative order within each group.
pub fn sort_for_display<T: Completable>(items: &[T]) -> Vec<&T> {
    let (complete, incomplete): (Vec<&T>, Vec<&T>) =
        items.iter().partition(|item| item.is_complete());
    incomplete.into_iter().chain(complete).collect()
}
