//! # Todo Lists Testing
//!
//! Testing utilities and helpers for the todo lists service.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - The [`ReducerTest`] Given-When-Then harness
//! - Property-based testing strategies for user-supplied names
//!
//! ## Example
//!
//! ```ignore
//! use todo_lists_testing::ReducerTest;
//!
//! #[test]
//! fn creates_a_list() {
//!     ReducerTest::new(ListReducer::new())
//!         .with_env(ListEnvironment::default())
//!         .given_state(ListsState::new())
//!         .when_action(ListAction::CreateList { name: "Groceries".into() })
//!         .then_state(|state| assert_eq!(state.lists.len(), 1))
//!         .run();
//! }
//! ```

use chrono::{DateTime, Utc};
use todo_lists_core::environment::Clock;


/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use std::sync::{Arc, Mutex};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_lists_testing::mocks::FixedClock;
    /// use todo_lists_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock that only moves when a test advances it
    ///
    /// Clones share the same time, so a test can keep one handle and give
    /// another to the code under test.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        time: Arc<Mutex<DateTime<Utc>>>,
    }

    impl ManualClock {
        /// Create a clock starting at `start`
        #[must_use]
        pub fn new(start: DateTime<Utc>) -> Self {
            Self {
                time: Arc::new(Mutex::new(start)),
            }
        }

        /// Move the clock forward
        pub fn advance(&self, by: chrono::Duration) {
            if let Ok(mut time) = self.time.lock() {
                *time += by;
            }
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
                .lock()
                .map_or_else(|poisoned| *poisoned.into_inner(), |time| *time)
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use proptest::prelude::*;

    /// Longest name accepted for lists and todos
    pub const MAX_NAME_CHARS: usize = 100;

    /// Names that are valid once trimmed: 1 to 100 characters, no surrounding whitespace
    pub fn valid_name() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-zA-Z0-9]",
            "[a-zA-Z0-9][a-zA-Z0-9 ,.!-]{0,98}[a-zA-Z0-9]",
        ]
    }

    /// A valid name wrapped in spaces and tabs that trimming removes
    pub fn padded_valid_name() -> impl Strategy<Value = (String, String)> {
        ("[ \t]{0,5}", valid_name(), "[ \t]{0,5}")
            .prop_map(|(lead, name, trail)| (format!("{lead}{name}{trail}"), name))
    }

    /// Names that are empty after trimming
    pub fn blank_name() -> impl Strategy<Value = String> {
        "[ \t\n]{0,10}"
    }

    /// Names longer than the limit after trimming
    pub fn overlong_name() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9]{101,160}"
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, ManualClock, test_clock};
pub use reducer_test::ReducerTest;
