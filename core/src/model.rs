//! Dispatch table mapping message types to handlers.
//!
//! A [`Model`] is built once at startup with [`ModelBuilder`] and is immutable
//! afterwards. Lookup is by the message's exact runtime type (`TypeId`); there
//! is no supertype or pattern matching.
//!
//! Handlers come in two flavours:
//!
//! - **Request/response** ([`ModelBuilder::on`]): returns a value that is
//!   converted into the model's response type `R`.
//! - **Consumer** ([`ModelBuilder::on_consume`]): a void command. The model
//!   answers with its default response, if one was configured, or nothing.
//!
//! Handler errors are returned to the caller unmodified.

use std::any::{Any, TypeId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// A type-erased message, as accepted by [`Model::react_to_message`].
pub type Message = Box<dyn Any + Send>;

/// Type-erased handler stored in the dispatch table.
///
/// `Ok(None)` means the handler consumed the message without producing a response.
type Handler<R, E> = Box<dyn Fn(Message) -> Result<Option<R>, E> + Send + Sync>;

struct Registration<R, E> {
    message_type: &'static str,
    handler: Handler<R, E>,
}

/// Errors raised while building a [`Model`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Two handlers were registered for the same message type.
    #[error("More than one handler registered for message type {message_type}")]
    DuplicateHandler {
        /// Name of the message type registered twice.
        message_type: &'static str,
    },
}

/// Immutable dispatch table from message type to handler.
///
/// # Type Parameters
///
/// - `R`: The response type every request/response handler converts into
/// - `E`: The error type handlers may fail with
pub struct Model<R, E> {
    handlers: HashMap<TypeId, Registration<R, E>>,
    default_response: Option<R>,
}

impl<R, E> Model<R, E>
where
    R: 'static,
    E: 'static,
{
    /// Start building a new model
    #[must_use]
    pub fn builder() -> ModelBuilder<R, E> {
        ModelBuilder::new()
    }
}

impl<R, E> Model<R, E> {
    /// Whether a handler is registered for message type `M`
    #[must_use]
    pub fn handles<M: Any>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<M>())
    }

    /// Number of registered handlers
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handler is registered at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Names of all message types this model reacts to, sorted
    #[must_use]
    pub fn message_types(&self) -> Vec<&'static str> {
        let mut types: Vec<_> = self
            .handlers
            .values()
            .map(|registration| registration.message_type)
            .collect();
        types.sort_unstable();
        types
    }

    /// The response returned for void handlers and unmatched messages
    #[must_use]
    pub const fn default_response(&self) -> Option<&R> {
        self.default_response.as_ref()
    }
}

impl<R: Clone, E> Model<R, E> {
    /// React to a message by invoking the handler registered for its exact type.
    ///
    /// - Handler found, response produced: `Ok(Some(response))`
    /// - Handler found, nothing produced: the default response, or `Ok(None)`
    /// - No handler registered: the default response, or `Ok(None)`
    ///
    /// # Errors
    ///
    /// Returns whatever error the invoked handler returned, unmodified.
    #[tracing::instrument(skip_all, name = "model_react_to")]
    pub fn react_to_message(&self, message: Message) -> Result<Option<R>, E> {
        // Deref first: `Box<dyn Any>` is itself `Any`.
        let type_id = (*message).type_id();

        let Some(registration) = self.handlers.get(&type_id) else {
            tracing::debug!("No handler registered for message");
            return Ok(self.default_response.clone());
        };

        tracing::debug!(message_type = registration.message_type, "Reacting to message");
        let response = (registration.handler)(message)?;
        Ok(response.or_else(|| self.default_response.clone()))
    }
}

impl<R, E> fmt::Debug for Model<R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("message_types", &self.message_types())
            .field("has_default_response", &self.default_response.is_some())
            .finish()
    }
}

/// Builder for [`Model`]
///
/// # Example
///
/// ```
/// use behavior_core::Model;
///
/// struct Ping;
/// struct Shutdown;
///
/// let model = Model::<&'static str, String>::builder()
///     .on(|_: Ping| Ok::<_, String>("pong"))
///     .on_consume(|_: Shutdown| Ok(()))
///     .build()?;
///
/// assert!(model.handles::<Ping>());
/// assert_eq!(model.len(), 2);
/// # Ok::<(), behavior_core::ModelError>(())
/// ```
pub struct ModelBuilder<R, E> {
    registrations: Vec<(TypeId, Registration<R, E>)>,
    default_response: Option<R>,
}

impl<R, E> ModelBuilder<R, E>
where
    R: 'static,
    E: 'static,
{
    /// Create an empty builder
    #[must_use]
    pub const fn new() -> Self {
        Self {
            registrations: Vec::new(),
            default_response: None,
        }
    }

    /// Register a request/response handler for message type `M`
    #[must_use]
    pub fn on<M, T, F>(self, handler: F) -> Self
    where
        M: Any + Send,
        T: Into<R> + 'static,
        F: Fn(M) -> Result<T, E> + Send + Sync + 'static,
    {
        self.register::<M>(Box::new(move |message: Message| {
            match message.downcast::<M>() {
                Ok(request) => handler(*request).map(|response| Some(response.into())),
                Err(_) => {
                    log_mismatch::<M>();
                    Ok(None)
                }
            }
        }))
    }

    /// Register a consumer (void command handler) for message type `M`
    #[must_use]
    pub fn on_consume<M, F>(self, handler: F) -> Self
    where
        M: Any + Send,
        F: Fn(M) -> Result<(), E> + Send + Sync + 'static,
    {
        self.register::<M>(Box::new(move |message: Message| {
            match message.downcast::<M>() {
                Ok(command) => handler(*command)?,
                Err(_) => log_mismatch::<M>(),
            }
            Ok(None)
        }))
    }

    /// Set the response returned for void handlers and unmatched messages
    #[must_use]
    pub fn default_response(mut self, response: R) -> Self {
        self.default_response = Some(response);
        self
    }

    /// Finish building the model.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateHandler`] if a message type was registered twice.
    pub fn build(self) -> Result<Model<R, E>, ModelError> {
        let mut handlers = HashMap::with_capacity(self.registrations.len());

        for (type_id, registration) in self.registrations {
            match handlers.entry(type_id) {
                Entry::Occupied(_) => {
                    return Err(ModelError::DuplicateHandler {
                        message_type: registration.message_type,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(registration);
                }
            }
        }

        tracing::debug!(handlers = handlers.len(), "Behavior model built");

        Ok(Model {
            handlers,
            default_response: self.default_response,
        })
    }

    fn register<M: Any>(mut self, handler: Handler<R, E>) -> Self {
        self.registrations.push((
            TypeId::of::<M>(),
            Registration {
                message_type: std::any::type_name::<M>(),
                handler,
            },
        ));
        self
    }
}

/// A registered handler was handed a message of another type.
///
/// The table is keyed by `TypeId::of::<M>()`, so this only fires if a handler
/// is invoked outside [`Model::react_to_message`].
fn log_mismatch<M: Any>() {
    tracing::error!(
        message_type = std::any::type_name::<M>(),
        "Handler received a message of another type, ignoring it"
    );
}

impl<R: 'static, E: 'static> Default for ModelBuilder<R, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct Add(i32, i32);

    #[derive(Debug)]
    struct Record(i32);

    #[derive(Debug)]
    struct Unregistered;

    #[derive(Debug, PartialEq, Eq)]
    struct Failure(String);

    fn calculator() -> Model<i32, Failure> {
        Model::builder()
            .on(|request: Add| Ok(request.0 + request.1))
            .on_consume(|_: Record| Ok(()))
            .build()
            .unwrap()
    }

    #[test]
    fn test_routes_by_exact_type() {
        let model = calculator();
        let response = model.react_to_message(Box::new(Add(2, 3))).unwrap();
        assert_eq!(response, Some(5));
    }

    #[test]
    fn test_handler_ignores_message_of_another_type() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let builder = Model::<i32, Failure>::builder()
            .on(|request: Add| Ok(request.0 + request.1))
            .on_consume(move |_: Record| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });

        let add = &builder.registrations[0].1.handler;
        let record = &builder.registrations[1].1.handler;

        assert_eq!(add(Box::new(Record(1))).unwrap(), None);
        assert_eq!(record(Box::new(Add(1, 2))).unwrap(), None);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_consumer_yields_nothing_without_default() {
        let model = calculator();
        let response = model.react_to_message(Box::new(Record(1))).unwrap();
        assert_eq!(response, None);
    }

    #[test]
    fn test_unmatched_message_yields_nothing_without_default() {
        let model = calculator();
        let response = model.react_to_message(Box::new(Unregistered)).unwrap();
        assert_eq!(response, None);
    }

    #[test]
    fn test_default_response_for_consumer_and_unmatched() {
        let model = Model::<i32, Failure>::builder()
            .on_consume(|_: Record| Ok(()))
            .default_response(-1)
            .build()
            .unwrap();

        assert_eq!(model.react_to_message(Box::new(Record(7))).unwrap(), Some(-1));
        assert_eq!(model.react_to_message(Box::new(Unregistered)).unwrap(), Some(-1));
        assert_eq!(model.default_response(), Some(&-1));
    }

    #[test]
    fn test_handler_response_wins_over_default() {
        let model = Model::<i32, Failure>::builder()
            .on(|request: Add| Ok(request.0 * request.1))
            .default_response(0)
            .build()
            .unwrap();

        assert_eq!(model.react_to_message(Box::new(Add(4, 5))).unwrap(), Some(20));
    }

    #[test]
    fn test_handler_error_propagates_unmodified() {
        let model = Model::<i32, Failure>::builder()
            .on(|_: Add| Err::<i32, _>(Failure("boom".to_string())))
            .default_response(0)
            .build()
            .unwrap();

        let error = model.react_to_message(Box::new(Add(1, 1))).unwrap_err();
        assert_eq!(error, Failure("boom".to_string()));
    }

    #[test]
    fn test_consumer_runs_side_effect() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);

        let model = Model::<(), Failure>::builder()
            .on_consume(move |record: Record| {
                counter.fetch_add(usize::try_from(record.0).unwrap_or(0), Ordering::SeqCst);
                Ok(())
            })
            .build()
            .unwrap();

        model.react_to_message(Box::new(Record(3))).unwrap();
        model.react_to_message(Box::new(Record(4))).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let result = Model::<i32, Failure>::builder()
            .on(|request: Add| Ok(request.0))
            .on(|request: Add| Ok(request.1))
            .build();

        assert!(matches!(
            result,
            Err(ModelError::DuplicateHandler { message_type }) if message_type.ends_with("Add")
        ));
    }

    #[test]
    fn test_no_supertype_matching() {
        // A boxed message registered as `Add` must not match `&Add` or `Box<Add>`.
        let model = calculator();
        let nested: Box<Add> = Box::new(Add(1, 2));
        assert_eq!(model.react_to_message(Box::new(nested)).unwrap(), None);
    }

    #[test]
    fn test_introspection() {
        let model = calculator();
        assert!(model.handles::<Add>());
        assert!(model.handles::<Record>());
        assert!(!model.handles::<Unregistered>());
        assert_eq!(model.len(), 2);
        assert!(!model.is_empty());
        assert_eq!(model.message_types().len(), 2);
    }

    #[test]
    fn test_empty_model() {
        let model = Model::<i32, Failure>::builder().build().unwrap();
        assert!(model.is_empty());
        assert_eq!(model.react_to_message(Box::new(Add(1, 1))).unwrap(), None);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_handler_sees_message_unchanged(a in -1000..1000i32, b in -1000..1000i32) {
                let response = calculator().react_to_message(Box::new(Add(a, b))).unwrap();
                prop_assert_eq!(response, Some(a + b));
            }

            #[test]
            fn prop_unmatched_message_gets_default(default in any::<i32>(), value in any::<i32>()) {
                let model = Model::<i32, Failure>::builder()
                    .on(|request: Add| Ok(request.0))
                    .default_response(default)
                    .build()
                    .unwrap();

                prop_assert_eq!(model.react_to_message(Box::new(Record(value))).unwrap(), Some(default));
            }
        }
    }
}
