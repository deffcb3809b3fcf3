//! Axum integration for behaviors.
//!
//! Exposes a behavior over HTTP: requests arrive as JSON, are turned into
//! messages, dispatched inside a unit of work, and the optional response is
//! serialized back.
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives at the behavior endpoint
//! 2. **Parse** the JSON body into the application's request enum
//! 3. **Convert** the request into a [`Message`](behavior_core::Message)
//! 4. **Dispatch** through [`TransactionalBehavior`]
//! 5. **Map result** to HTTP response (JSON, empty body, or 400)
//!
//! Application events reach the same behaviors through [`EventListeners`],
//! which wraps each one in its own [`TransactionalBehavior`].
//!
//! # Example
//!
//! ```ignore
//! use behavior_web::{BehaviorState, TransactionalBehavior, behavior_router};
//!
//! let behavior = StatelessBehavior::of(&TodoListBehaviorModel::new(repository))?;
//! let state = BehaviorState::new(TransactionalBehavior::new(behavior));
//!
//! let app = behavior_router::<TodoListRequest, _>("/todolist", state);
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod handlers;
pub mod listeners;
pub mod state;
pub mod transactional;

// Re-export key types for convenience
pub use error::{AppError, ExceptionResponse};
pub use handlers::{behavior_router, behavior_routes, respond};
pub use listeners::{EventListeners, TransactionalListener};
pub use state::BehaviorState;
pub use transactional::TransactionalBehavior;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
