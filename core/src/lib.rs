//! # Behavior Core
//!
//! Core traits and types for in-process request/response behaviors.
//!
//! A behavior receives a message, routes it to the one handler registered for
//! the message's exact type, and hands back an optional response. Callers
//! (HTTP controllers, event listeners, tests) only ever see that single
//! contract and never need to know which handler applies.
//!
//! ## Core Concepts
//!
//! - **Message**: Any owned value, boxed as [`Message`]
//! - **Model**: Dispatch table from message type to handler, built once at startup
//! - **Behavior**: `(Message) → Result<Option<Response>, Error>`
//! - **Event bus**: Fan-out of one event to every subscribed listener
//! - **Repository**: Storage contract for aggregates, keyed by identifier
//! - **Environment**: Injected dependencies via traits
//!
//! ## Example
//!
//! ```
//! use behavior_core::{Behavior, Model, StatelessBehavior};
//!
//! struct Greet(String);
//!
//! let model = Model::<String, std::convert::Infallible>::builder()
//!     .on(|request: Greet| Ok::<_, std::convert::Infallible>(format!("Hello, {}!", request.0)))
//!     .build()?;
//!
//! let behavior = StatelessBehavior::new(model);
//! let response = behavior.react_to(Greet("world".to_string())).ok().flatten();
//! assert_eq!(response.as_deref(), Some("Hello, world!"));
//! # Ok::<(), behavior_core::ModelError>(())
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};

/// Behavior traits and the stateless behavior built from a model
pub mod behavior;

/// Publishing events to subscribed behaviors
pub mod event_bus;

/// Message type → handler dispatch table
pub mod model;

/// Storage contract for aggregates
pub mod repository;

pub use behavior::{Behavior, BehaviorModel, StatelessBehavior};
pub use event_bus::{BehaviorListener, Delivery, EventBus, EventListener, ListenerError};
pub use model::{Message, Model, ModelBuilder, ModelError};
pub use repository::{EntityAccess, Repository, RepositoryError};

/// Environment module - Dependency injection traits
///
/// External dependencies that differ between production and tests are
/// abstracted behind traits so they can be swapped out.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use behavior_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// let earlier = clock.now();
    /// assert!(clock.now() >= earlier);
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
