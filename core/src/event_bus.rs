//! In-process event bus.
//!
//! An [`EventBus`] hands every published event to each subscribed
//! [`EventListener`], one after the other in subscription order. Each listener
//! gets its own copy of the event.
//!
//! A listener that fails does not stop delivery: the failure is logged with
//! `tracing` and recorded in the returned [`Delivery`], and the remaining
//! listeners still receive the event.
//!
//! # Examples
//!
//! ```
//! use behavior_core::event_bus::{BehaviorListener, EventBus};
//! use behavior_core::{Model, StatelessBehavior};
//!
//! #[derive(Clone)]
//! struct OrderPlaced(u32);
//!
//! let audit = Model::<(), String>::builder()
//!     .on_consume(|event: OrderPlaced| {
//!         println!("order {} placed", event.0);
//!         Ok(())
//!     })
//!     .build()?;
//!
//! let bus = EventBus::new().subscribe(BehaviorListener::new("audit", StatelessBehavior::new(audit)));
//!
//! # tokio_test::block_on(async {
//! let delivery = bus.publish(OrderPlaced(7)).await;
//! assert_eq!(delivery.delivered, 1);
//! assert!(delivery.failed.is_empty());
//! # });
//! # Ok::<(), behavior_core::ModelError>(())
//! ```
//!
//! # Dyn Compatibility
//!
//! [`EventListener::on_event`] returns a boxed future instead of being an
//! `async fn` so that listeners of different types can live in one
//! `Vec<Box<dyn EventListener>>`.

use crate::behavior::Behavior;
use crate::model::Message;
use std::any::Any;
use std::fmt::{self, Display};
use std::future::{Future, ready};
use std::pin::Pin;
use thiserror::Error;

/// A listener failed to handle an event
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Listener '{listener}' failed: {reason}")]
pub struct ListenerError {
    /// Name of the failing listener
    pub listener: String,
    /// What went wrong, as reported by the listener
    pub reason: String,
}

impl ListenerError {
    /// Create an error for the named listener
    pub fn new(listener: impl Into<String>, reason: impl Display) -> Self {
        Self {
            listener: listener.into(),
            reason: reason.to_string(),
        }
    }
}

/// Future returned by [`EventListener::on_event`]
pub type ListenerFuture<'a> = Pin<Box<dyn Future<Output = Result<(), ListenerError>> + Send + 'a>>;

/// Something that reacts to published events.
pub trait EventListener: Send + Sync {
    /// Name used in logs and in [`ListenerError`]
    fn name(&self) -> &str;

    /// React to one event.
    ///
    /// Responses are discarded; only success or failure is reported back.
    fn on_event(&self, event: Message) -> ListenerFuture<'_>;
}

/// Listener that dispatches events straight into a synchronous [`Behavior`].
pub struct BehaviorListener<B> {
    name: String,
    behavior: B,
}

impl<B> BehaviorListener<B> {
    /// Wrap a behavior under the given listener name
    pub fn new(name: impl Into<String>, behavior: B) -> Self {
        Self {
            name: name.into(),
            behavior,
        }
    }
}

impl<B> fmt::Debug for BehaviorListener<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorListener")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<B> EventListener for BehaviorListener<B>
where
    B: Behavior + Send + Sync,
    B::Error: Display,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn on_event(&self, event: Message) -> ListenerFuture<'_> {
        let result = self
            .behavior
            .dispatch(event)
            .map(drop)
            .map_err(|error| ListenerError::new(&self.name, error));
        Box::pin(ready(result))
    }
}

/// Outcome of publishing one event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delivery {
    /// Number of listeners that handled the event
    pub delivered: usize,
    /// Failures, in subscription order
    pub failed: Vec<ListenerError>,
}

impl Delivery {
    /// `true` if no listener failed
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Fan-out of events to a fixed set of listeners.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Box<dyn EventListener>>,
}

impl EventBus {
    /// Create a bus without listeners
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener; it receives events after those already subscribed
    #[must_use]
    pub fn subscribe(mut self, listener: impl EventListener + 'static) -> Self {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Number of subscribed listeners
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// `true` if nobody is subscribed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver `event` to every listener.
    ///
    /// Listener failures are logged and collected; they never short-circuit
    /// delivery to the listeners that follow.
    pub async fn publish<M>(&self, event: M) -> Delivery
    where
        M: Any + Send + Clone,
    {
        let event_type = std::any::type_name::<M>();
        tracing::debug!(event_type, listeners = self.listeners.len(), "Publishing event");

        let mut delivery = Delivery::default();
        for listener in &self.listeners {
            match listener.on_event(Box::new(event.clone())).await {
                Ok(()) => delivery.delivered += 1,
                Err(error) => {
                    tracing::error!(
                        event_type,
                        listener = listener.name(),
                        %error,
                        "Listener failed to handle event"
                    );
                    delivery.failed.push(error);
                }
            }
        }
        delivery
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.listeners.iter().map(|l| l.name()).collect();
        f.debug_struct("EventBus").field("listeners", &names).finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;
    use crate::{Model, StatelessBehavior};
    use std::sync::Arc;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct TaskAdded(String);

    #[derive(Debug, Clone)]
    struct Unrelated;

    type Seen = Arc<Mutex<Vec<String>>>;

    fn recorder(name: &str, seen: &Seen) -> BehaviorListener<StatelessBehavior<(), String>> {
        let seen = Arc::clone(seen);
        let tag = name.to_string();
        let model = Model::builder()
            .on_consume(move |event: TaskAdded| {
                seen.lock().unwrap().push(format!("{tag}:{}", event.0));
                Ok(())
            })
            .build()
            .unwrap();
        BehaviorListener::new(name, StatelessBehavior::new(model))
    }

    fn failing(name: &str) -> BehaviorListener<StatelessBehavior<(), String>> {
        let model = Model::builder()
            .on_consume(|_: TaskAdded| Err("disk full".to_string()))
            .build()
            .unwrap();
        BehaviorListener::new(name, StatelessBehavior::new(model))
    }

    #[tokio::test]
    async fn test_publish_reaches_every_listener_in_order() {
        let seen = Seen::default();
        let bus = EventBus::new()
            .subscribe(recorder("first", &seen))
            .subscribe(recorder("second", &seen))
            .subscribe(recorder("third", &seen));

        let delivery = bus.publish(TaskAdded("milk".to_string())).await;

        assert_eq!(delivery.delivered, 3);
        assert!(delivery.is_complete());
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["first:milk", "second:milk", "third:milk"]
        );
    }

    #[tokio::test]
    async fn test_failing_listener_does_not_stop_delivery() {
        let seen = Seen::default();
        let bus = EventBus::new()
            .subscribe(recorder("before", &seen))
            .subscribe(failing("broken"))
            .subscribe(recorder("after", &seen));

        let delivery = bus.publish(TaskAdded("eggs".to_string())).await;

        assert_eq!(delivery.delivered, 2);
        assert_eq!(
            delivery.failed,
            vec![ListenerError::new("broken", "disk full")]
        );
        assert_eq!(*seen.lock().unwrap(), vec!["before:eggs", "after:eggs"]);
    }

    #[tokio::test]
    async fn test_unhandled_event_counts_as_delivered() {
        let seen = Seen::default();
        let bus = EventBus::new().subscribe(recorder("only", &seen));

        let delivery = bus.publish(Unrelated).await;

        assert_eq!(delivery.delivered, 1);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_bus_delivers_nothing() {
        let bus = EventBus::new();
        assert!(bus.is_empty());

        let delivery = bus.publish(Unrelated).await;
        assert_eq!(delivery, Delivery::default());
    }

    #[test]
    fn test_listener_error_display() {
        let error = ListenerError::new("audit", "disk full");
        assert_eq!(error.to_string(), "Listener 'audit' failed: disk full");
    }
}
