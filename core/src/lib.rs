//! # Todo Lists Core
//!
//! Core traits for the todo lists service.
//!
//! The service is built around a small reducer architecture:
//!
//! - **State**: Domain state owned by one session
//! - **Action**: All possible inputs to a reducer (commands and the events they resolve to)
//! - **Reducer**: `(State, Action, Environment) → Result<Event, Error>`
//! - **Environment**: Injected dependencies and policies
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - All-or-nothing transitions (a rejected command never touches state)
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```
//! use todo_lists_core::reducer::Reducer;
//!
//! #[derive(Debug, Clone, Default)]
//! struct CounterState {
//!     count: u32,
//! }
//!
//! #[derive(Debug, Clone, PartialEq, Eq)]
//! enum CounterAction {
//!     Increment,
//!     Incremented { count: u32 },
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!     type Error = String;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> Result<CounterAction, String> {
//!         match action {
//!             CounterAction::Increment => {
//!                 state.count += 1;
//!                 Ok(CounterAction::Incremented { count: state.count })
//!             }
//!             CounterAction::Incremented { count } => {
//!                 state.count = count;
//!                 Ok(CounterAction::Incremented { count })
//!             }
//!         }
//!     }
//! }
//!
//! let mut state = CounterState::default();
//! let event = CounterReducer.reduce(&mut state, CounterAction::Increment, &());
//! assert_eq!(event, Ok(CounterAction::Incremented { count: 1 }));
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};

/// Reducer module - The core trait for business logic
///
/// Reducers are functions: `(State, Action, Environment) → Result<Event, Error>`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes (commands and events)
    /// - `Environment`: The injected dependencies this reducer needs
    /// - `Error`: Why a command was rejected
    ///
    /// # Contract
    ///
    /// A command is validated first. When validation passes the reducer
    /// applies the resulting event to `state` and returns that event. When
    /// validation fails the reducer returns the error and `state` is left
    /// exactly as it was.
    ///
    /// Event actions are applied directly, which lets a state be rebuilt by
    /// replaying the events previously returned from `reduce`.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// The error returned for rejected commands
        type Error;

        /// Reduce an action into a state change
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// The event that was applied to `state`
        ///
        /// # Errors
        ///
        /// Returns `Self::Error` when the action is rejected; `state` is unchanged.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> Result<Self::Action, Self::Error>;
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use todo_lists_core::environment::{Clock, SystemClock};
    ///
    /// let before = chrono::Utc::now();
    /// assert!(SystemClock.now() >= before);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
