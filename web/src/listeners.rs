//! Event listeners that react inside a unit of work.
//!
//! Every behavior subscribed through [`EventListeners`] is wrapped in a
//! [`TransactionalBehavior`], so an event is handled under the same lock as an
//! HTTP request to that behavior. Listener failures are logged by the
//! underlying [`EventBus`] and never stop delivery to the other listeners.

use crate::transactional::TransactionalBehavior;
use behavior_core::event_bus::{Delivery, EventBus, EventListener, ListenerError, ListenerFuture};
use behavior_core::{Behavior, BehaviorModel, Message, ModelError, StatelessBehavior};
use std::any::Any;
use std::fmt::{self, Display};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// [`EventListener`] dispatching through a [`TransactionalBehavior`].
pub struct TransactionalListener<B> {
    name: String,
    behavior: Arc<TransactionalBehavior<B>>,
}

impl<B: Behavior> TransactionalListener<B> {
    /// Wrap `behavior` in its own unit of work
    pub fn new(name: impl Into<String>, behavior: B) -> Self {
        Self::shared(name, Arc::new(TransactionalBehavior::new(behavior)))
    }

    /// Listen through a unit of work that is also used elsewhere, e.g. by
    /// a [`BehaviorState`](crate::BehaviorState)
    pub fn shared(name: impl Into<String>, behavior: Arc<TransactionalBehavior<B>>) -> Self {
        Self {
            name: name.into(),
            behavior,
        }
    }
}

impl<B> fmt::Debug for TransactionalListener<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionalListener")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<B> EventListener for TransactionalListener<B>
where
    B: Behavior + Send,
    B::Response: Send,
    B::Error: Display + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn on_event(&self, event: Message) -> ListenerFuture<'_> {
        Box::pin(async move {
            self.behavior
                .react_to(event)
                .await
                .map(drop)
                .map_err(|error| ListenerError::new(&self.name, error))
        })
    }
}

/// Set of behaviors reacting to application events.
///
/// # Example
///
/// ```ignore
/// let listeners = EventListeners::new()
///     .with_model("todolist", &TodoListBehaviorModel::new(repository))?;
///
/// let delivery = listeners.on(AddTaskRequest::new(list_id, "Buy milk")).await;
/// assert!(delivery.is_complete());
/// ```
#[derive(Debug, Default)]
pub struct EventListeners {
    bus: EventBus,
}

impl EventListeners {
    /// Create an empty set of listeners
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a behavior, wrapped in a new unit of work
    #[must_use]
    pub fn with_behavior<B>(self, name: impl Into<String>, behavior: B) -> Self
    where
        B: Behavior + Send + 'static,
        B::Response: Send,
        B::Error: Display + Send,
    {
        self.with_listener(TransactionalListener::new(name, behavior))
    }

    /// Build the stateless behavior of `model` and subscribe it.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if the model's dispatch table can't be built.
    pub fn with_model<M>(self, name: impl Into<String>, model: &M) -> Result<Self, ModelError>
    where
        M: BehaviorModel,
        M::Response: Clone + Send + 'static,
        M::Error: Display + Send + 'static,
    {
        let behavior = StatelessBehavior::of(model)?;
        Ok(self.with_behavior(name, behavior))
    }

    /// Subscribe any listener
    #[must_use]
    pub fn with_listener(mut self, listener: impl EventListener + 'static) -> Self {
        self.bus = self.bus.subscribe(listener);
        self
    }

    /// The underlying bus
    #[must_use]
    pub const fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Deliver `event` to every listener and wait for all of them
    pub async fn on<E>(&self, event: E) -> Delivery
    where
        E: Any + Send + Clone,
    {
        self.bus.publish(event).await
    }

    /// Deliver `event` on a background task, without waiting for listeners
    pub fn spawn<E>(self: &Arc<Self>, event: E) -> JoinHandle<Delivery>
    where
        E: Any + Send + Clone,
    {
        let listeners = Arc::clone(self);
        tokio::spawn(async move { listeners.on(event).await })
    }
}
