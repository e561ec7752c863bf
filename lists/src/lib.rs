//! Session-backed todo lists served over HTTP.
//!
//! Every browser session owns its own collection of named lists, each holding
//! todos. State lives in memory beside the session and is changed only by
//! dispatching [`ListAction`] commands through the session's store:
//!
//! - Simple domain model (lists of todos with completion flags)
//! - Command validation with typed errors ([`ListError`])
//! - Event application
//! - Display queries (completion, ordering)
//! - Testing with `ReducerTest`
//!
//! # Quick Start
//!
//! ```no_run
//! use todo_lists::{ListAction, ListEnvironment, ListId, ListReducer, ListsState};
//! use todo_lists_runtime::Store;
//!
//! # async fn example() -> Result<(), todo_lists::ListError> {
//! let store = Store::new(ListsState::new(), ListReducer::new(), ListEnvironment::default());
//!
//! store.send(ListAction::CreateList { name: "Groceries".to_string() }).await?;
//! store.send(ListAction::AddTodo { list_id: ListId::new(1), name: "Milk".to_string() }).await?;
//! store.send(ListAction::CompleteAll { list_id: ListId::new(1) }).await?;
//!
//! let completion = store.state(|s| s.lists[0].completion()).await;
//! println!("Remaining: {completion}");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod display;
pub mod error;
pub mod reducer;
pub mod server;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use display::{Completable, Completion, sort_for_display};
pub use error::{ErrorKind, ListError, NameField};
pub use reducer::{IdPolicy, ListEnvironment, ListReducer, validate_name};
pub use session::{ListSession, ListStore};
pub use types::{Flash, ListAction, ListId, ListsState, Todo, TodoId, TodoList};
