//! Application state for Axum handlers.
//!
//! [`BehaviorState`] carries the one behavior an endpoint dispatches to, plus
//! the clock used to timestamp error bodies.

use crate::error::AppError;
use crate::transactional::TransactionalBehavior;
use axum::http::StatusCode;
use behavior_core::environment::{Clock, SystemClock};
use std::sync::Arc;

/// State shared across the handlers of a behavior endpoint.
///
/// # Examples
///
/// ```ignore
/// use behavior_web::{BehaviorState, TransactionalBehavior};
///
/// let behavior = StatelessBehavior::of(&TodoListBehaviorModel::new(repository))?;
/// let state = BehaviorState::new(TransactionalBehavior::new(behavior));
/// ```
pub struct BehaviorState<B> {
    behavior: Arc<TransactionalBehavior<B>>,
    clock: Arc<dyn Clock>,
}

impl<B> BehaviorState<B> {
    /// Create state around a behavior, using the system clock.
    #[must_use]
    pub fn new(behavior: TransactionalBehavior<B>) -> Self {
        Self::with_clock(behavior, Arc::new(SystemClock))
    }

    /// Create state with an explicit clock.
    #[must_use]
    pub fn with_clock(behavior: TransactionalBehavior<B>, clock: Arc<dyn Clock>) -> Self {
        Self {
            behavior: Arc::new(behavior),
            clock,
        }
    }

    /// The behavior requests are dispatched to
    #[must_use]
    pub fn behavior(&self) -> &TransactionalBehavior<B> {
        &self.behavior
    }

    /// The clock used for error timestamps
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// A 400 error timestamped by this state's clock
    #[must_use]
    pub fn bad_request(&self, message: impl Into<String>) -> AppError {
        AppError::stamped(self.clock(), StatusCode::BAD_REQUEST, message)
    }
}

// Manual impl: `B` itself does not need to be `Clone`.
impl<B> Clone for BehaviorState<B> {
    fn clone(&self) -> Self {
        Self {
            behavior: Arc::clone(&self.behavior),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<B> std::fmt::Debug for BehaviorState<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaviorState").finish_non_exhaustive()
    }
}
