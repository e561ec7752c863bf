//! # Todo Lists Runtime
//!
//! Runtime implementation for the reducer architecture.
//!
//! This crate provides the [`Store`] that owns a piece of state and routes every
//! action through its reducer.
//!
//! ## Core Components
//!
//! - **Store**: Owns state behind an async `RwLock` and serializes reducer calls
//! - **Observability**: Every action runs inside a tracing span and is counted
//!
//! ## Example
//!
//! ```ignore
//! use todo_lists_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! let event = store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use std::sync::Arc;
use todo_lists_core::reducer::Reducer;
use tokio::sync::RwLock;

/// Store runtime for coordinating reducer execution.
pub mod store {
    use super::{Arc, Reducer, RwLock};
    use std::fmt;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock` for concurrent access)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    ///
    /// Mutations take the write lock for the whole reducer call, so two
    /// concurrent `send`s against the same store never interleave inside a
    /// read-modify-write.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        R::Error: fmt::Display,
        A: fmt::Debug + Send + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// # Arguments
        ///
        /// - `initial_state`: The starting state for the store
        /// - `reducer`: The reducer implementation (business logic)
        /// - `environment`: Injected dependencies
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
            }
        }

        /// Send an action through the reducer
        ///
        /// Acquires the write lock, runs the reducer and releases the lock
        /// before returning.
        ///
        /// # Errors
        ///
        /// Returns the reducer's error when the action is rejected. The state
        /// is left unchanged in that case.
        ///
        /// # Example
        ///
        /// ```ignore
        /// let event = store.send(ListAction::CreateList { name: "Groceries".into() }).await?;
        /// ```
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<A, R::Error> {
            let mut state = self.state.write().await;
            tracing::trace!("Acquired write lock on state");
            self.dispatch(&mut *state, action)
        }

        /// Send an action and read the resulting state before releasing the lock
        ///
        /// `read` sees the state right after the accepted action, together with
        /// the event it produced. No other `send` can run in between.
        ///
        /// # Errors
        ///
        /// Returns the reducer's error when the action is rejected; `read` is
        /// not called in that case.
        ///
        /// # Example
        ///
        /// ```ignore
        /// let action = ListAction::CreateList { name: "Groceries".into() };
        /// let count = store.send_and_read(action, |s, _| s.lists.len()).await?;
        /// ```
        #[tracing::instrument(skip(self, action, read), name = "store_send")]
        pub async fn send_and_read<F, T>(&self, action: A, read: F) -> Result<T, R::Error>
        where
            F: FnOnce(&S, &A) -> T,
        {
            let mut state = self.state.write().await;
            tracing::trace!("Acquired write lock on state");
            let event = self.dispatch(&mut *state, action)?;
            Ok(read(&*state, &event))
        }

        fn dispatch(&self, state: &mut S, action: A) -> Result<A, R::Error> {
            tracing::debug!(?action, "Processing action");
            metrics::counter!("store.actions.total").increment(1);

            let start = std::time::Instant::now();
            let result = self.reducer.reduce(state, action, &self.environment);
            metrics::histogram!("store.reducer.duration_seconds")
                .record(start.elapsed().as_secs_f64());

            match &result {
                Ok(event) => tracing::debug!(?event, "Action applied"),
                Err(error) => {
                    metrics::counter!("store.actions.rejected").increment(1);
                    tracing::warn!(%error, "Action rejected");
                }
            }

            result
        }

        /// Read current state via a closure
        ///
        /// Access state through a closure to ensure the lock is released promptly:
        ///
        /// ```ignore
        /// let list_count = store.state(|s| s.lists.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Returns the environment this store was built with
        #[must_use]
        pub const fn environment(&self) -> &E {
            &self.environment
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
            }
        }
    }

    impl<S, A, E, R> fmt::Debug for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("Store").finish_non_exhaustive()
        }
    }
}

pub use store::Store;
