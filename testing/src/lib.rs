//! # Behavior Testing
//!
//! Testing utilities and helpers for behaviors built on `behavior-core`.
//!
//! This crate provides:
//! - `InMemoryRepository`: copy-on-read/write repository double
//! - `BehaviorTest`: Given-When-Then helper for behaviors
//! - Mock implementations of Environment traits
//!
//! ## Example
//!
//! ```ignore
//! use behavior_testing::{BehaviorTest, InMemoryRepository};
//!
//! #[test]
//! fn adds_task() {
//!     let repository = Arc::new(InMemoryRepository::new(TodoListAccess));
//!     let list = repository.save(&TodoList::new()).unwrap();
//!     let behavior = StatelessBehavior::of(&TodoListBehaviorModel::new(repository)).unwrap();
//!
//!     BehaviorTest::new(behavior)
//!         .when_message(AddTaskRequest::new(list.id(), "Buy milk"))
//!         .then_response(|response| assert!(response.is_some()))
//!         .run();
//! }
//! ```

use behavior_core::environment::Clock;
use chrono::{DateTime, Utc};


/// In-memory repository double
pub mod repository;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use behavior_testing::mocks::FixedClock;
    /// use behavior_core::environment::Clock;
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

// Re-export commonly used items
pub use behavior_test::{BehaviorTest, assertions};
pub use mocks::{FixedClock, test_clock};
pub use repository::InMemoryRepository;
