//! One unit of work per dispatched message.
//!
//! Handlers load an aggregate, mutate it and save it back. Those steps are not
//! atomic against the repository, so concurrent requests touching the same
//! aggregate could lose updates. [`TransactionalBehavior`] runs every dispatch
//! under an async mutex, which makes each call an exclusive unit of work.
//! A durable backend would open and commit its transaction at the same place.
//!
//! # Blocking
//!
//! Only acquiring the lock is asynchronous. Handlers are synchronous, so once
//! the lock is held the handler runs to completion on the current executor
//! thread without yielding. A slow handler blocks that worker thread, and
//! every other caller of the same behavior waits behind it. Handlers that do
//! blocking I/O should be moved off the runtime (e.g. with
//! `tokio::task::spawn_blocking`) by the caller.

use behavior_core::{Behavior, Message};
use tokio::sync::Mutex;

/// Serializes calls into a wrapped [`Behavior`].
///
/// # Example
///
/// ```ignore
/// let behavior = TransactionalBehavior::new(StatelessBehavior::of(&model)?);
/// let response = behavior.react_to(Box::new(request)).await?;
/// ```
#[derive(Debug)]
pub struct TransactionalBehavior<B> {
    behavior: Mutex<B>,
}

impl<B: Behavior> TransactionalBehavior<B> {
    /// Wrap a behavior
    #[must_use]
    pub fn new(behavior: B) -> Self {
        Self {
            behavior: Mutex::new(behavior),
        }
    }

    /// Dispatch a message while holding the unit-of-work lock.
    ///
    /// Waiting for the lock yields; running the handler does not, see the
    /// [module docs](self) on blocking.
    ///
    /// # Errors
    ///
    /// Returns the error of the handler that reacted to the message, unmodified.
    #[tracing::instrument(skip_all, name = "transactional_react_to")]
    pub async fn react_to(&self, message: Message) -> Result<Option<B::Response>, B::Error> {
        let behavior = self.behavior.lock().await;
        tracing::trace!("Unit of work started");
        let result = behavior.dispatch(message);
        tracing::trace!(ok = result.is_ok(), "Unit of work finished");
        result
    }

    /// Unwrap the inner behavior
    pub fn into_inner(self) -> B {
        self.behavior.into_inner()
    }
}
