//! Per-session data: the lists store plus pending flash messages.

use crate::error::ListError;
use crate::reducer::{ListEnvironment, ListReducer};
use crate::types::{Flash, ListAction, ListsState};
use std::fmt;
use todo_lists_runtime::Store;
use tokio::sync::Mutex;

/// Store type holding one session's lists
pub type ListStore = Store<ListsState, ListAction, ListEnvironment, ListReducer>;

/// Everything the server keeps for one browser session
pub struct ListSession {
    store: ListStore,
    flash: Mutex<Flash>,
}

impl ListSession {
    /// Creates a session with no lists
    #[must_use]
    pub fn new(env: ListEnvironment) -> Self {
        Self {
            store: Store::new(ListsState::new(), ListReducer::new(), env),
            flash: Mutex::new(Flash::default()),
        }
    }

    /// The session's store
    #[must_use]
    pub const fn store(&self) -> &ListStore {
        &self.store
    }

    /// Dispatch an action through the store
    ///
    /// # Errors
    ///
    /// Returns the [`ListError`] the reducer rejected the action with.
    pub async fn send(&self, action: ListAction) -> Result<ListAction, ListError> {
        self.store.send(action).await
    }

    /// Dispatch an action and read the lists it left behind under the same lock
    ///
    /// # Errors
    ///
    /// Returns the [`ListError`] the reducer rejected the action with.
    pub async fn send_and_read<F, T>(&self, action: ListAction, read: F) -> Result<T, ListError>
    where
        F: FnOnce(&ListsState, &ListAction) -> T,
    {
        self.store.send_and_read(action, read).await
    }

    /// Read the current lists via a closure
    pub async fn read<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&ListsState) -> T,
    {
        self.store.state(f).await
    }

    /// Queue a success message for the next view
    pub async fn flash_success(&self, message: impl Into<String>) {
        self.flash.lock().await.success = Some(message.into());
    }

    /// Queue an error message for the next view
    pub async fn flash_error(&self, message: impl Into<String>) {
        self.flash.lock().await.error = Some(message.into());
    }

    /// Take the pending messages, leaving none behind
    pub async fn take_flash(&self) -> Flash {
        std::mem::take(&mut *self.flash.lock().await)
    }
}

impl fmt::Debug for ListSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListSession").finish_non_exhaustive()
    }
}
