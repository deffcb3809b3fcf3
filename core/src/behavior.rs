//! The `Behavior` contract and its stateless implementation.
//!
//! A behavior is the single entry point the outside world uses: hand it a
//! message, get back an optional response. Each call runs synchronously from
//! start to finish; a behavior is either idle or handling exactly one message.

use crate::model::{Message, Model, ModelError};
use std::any::Any;

/// Reacts to messages with optional responses.
///
/// # Example
///
/// ```ignore
/// let behavior = StatelessBehavior::of(&TodoListBehaviorModel::new(repository))?;
///
/// let response = behavior.react_to(AddTaskRequest::new(list_id, "Buy milk"))?;
/// ```
pub trait Behavior {
    /// Response type produced by handlers
    type Response;

    /// Error type handlers may fail with
    type Error;

    /// Dispatch an already boxed message.
    ///
    /// # Errors
    ///
    /// Returns the error of the handler that reacted to the message, unmodified.
    fn dispatch(&self, message: Message) -> Result<Option<Self::Response>, Self::Error>;

    /// Box a typed message and dispatch it.
    ///
    /// A value that already is a [`Message`] is dispatched as is, so its
    /// runtime type is the one used for handler lookup.
    ///
    /// # Errors
    ///
    /// Returns the error of the handler that reacted to the message, unmodified.
    fn react_to<M>(&self, message: M) -> Result<Option<Self::Response>, Self::Error>
    where
        M: Any + Send,
        Self: Sized,
    {
        let boxed: Message = Box::new(message);
        let message = match boxed.downcast::<Message>() {
            Ok(inner) => *inner,
            Err(boxed) => boxed,
        };
        self.dispatch(message)
    }
}

/// Supplies the [`Model`] a behavior dispatches with.
pub trait BehaviorModel {
    /// Response type of the model's handlers
    type Response;

    /// Error type of the model's handlers
    type Error;

    /// Build the dispatch table.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if the model is inconsistent, e.g. a message type
    /// was registered twice.
    fn model(&self) -> Result<Model<Self::Response, Self::Error>, ModelError>;
}

/// A behavior without state of its own: every call goes straight to the model.
#[derive(Debug)]
pub struct StatelessBehavior<R, E> {
    model: Model<R, E>,
}

impl<R, E> StatelessBehavior<R, E> {
    /// Create a behavior from a built model
    #[must_use]
    pub const fn new(model: Model<R, E>) -> Self {
        Self { model }
    }

    /// Create a behavior from a behavior model
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if the model cannot be built.
    pub fn of<B>(behavior_model: &B) -> Result<Self, ModelError>
    where
        B: BehaviorModel<Response = R, Error = E>,
    {
        Ok(Self::new(behavior_model.model()?))
    }

    /// The model this behavior dispatches with
    #[must_use]
    pub const fn model(&self) -> &Model<R, E> {
        &self.model
    }
}

impl<R: Clone, E> Behavior for StatelessBehavior<R, E> {
    type Response = R;
    type Error = E;

    fn dispatch(&self, message: Message) -> Result<Option<R>, E> {
        self.model.react_to_message(message)
    }
}
