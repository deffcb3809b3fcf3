//! Repository trait and related types for storing aggregates.
//!
//! A repository owns the snapshots it stores. Callers only ever receive
//! independent copies, both from `save` and from every read, so mutating a
//! returned instance never changes stored state and vice versa.
//!
//! # Implementations
//!
//! - `InMemoryRepository` (in `behavior-testing` crate): Insertion-ordered,
//!   copy-on-read/write reference implementation
//!
//! Durable backends implement the same trait and report their failures as
//! [`RepositoryError::Storage`].
//!
//! # Concurrency
//!
//! Each operation is atomic on its own, but a find → mutate → save sequence is
//! not. Callers that share a repository between concurrent requests must
//! serialize those sequences themselves.

use std::fmt::Debug;
use std::hash::Hash;
use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A required argument was missing, e.g. an entity without an id was
    /// passed where one is needed to locate the stored entry.
    ///
    /// Raised before any stored state changes.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The backing store failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Identity and copy operations a repository needs for entities of type `T`.
///
/// # Example
///
/// ```ignore
/// struct OrderAccess;
///
/// impl EntityAccess<Order> for OrderAccess {
///     type Id = OrderId;
///
///     fn id_of(&self, order: &Order) -> Option<OrderId> {
///         order.id
///     }
///
///     fn next_id(&self) -> OrderId {
///         OrderId::new()
///     }
///
///     fn copy_with_id(&self, order: &Order, id: OrderId) -> Order {
///         Order { id: Some(id), ..order.clone() }
///     }
/// }
/// ```
pub trait EntityAccess<T>: Send + Sync {
    /// Identifier type of the entity
    type Id: Clone + Eq + Hash + Debug + Send + Sync;

    /// The id of an entity, or `None` if it hasn't been assigned one yet
    fn id_of(&self, entity: &T) -> Option<Self::Id>;

    /// A fresh id for an entity that is saved for the first time
    fn next_id(&self) -> Self::Id;

    /// Copy an entity and assign it the given id.
    ///
    /// The copy must not share mutable state with `entity`.
    fn copy_with_id(&self, entity: &T, id: Self::Id) -> T;
}

/// Storage abstraction for aggregates, keyed by identifier.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a single repository can be shared
/// by all handlers of a behavior.
///
/// # Dyn Compatibility
///
/// The trait is object safe; handlers typically receive a
/// `&dyn Repository<T, Id = ...>`.
pub trait Repository<T>: Send + Sync {
    /// Identifier type of stored entities
    type Id;

    /// Save an entity, assigning a fresh id if it has none.
    ///
    /// Returns an independent copy of what was stored. Use it for further
    /// operations: it carries the assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Storage`] if the backing store fails.
    fn save(&self, entity: &T) -> Result<T, RepositoryError>;

    /// Save all given entities, in order.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Storage`] if the backing store fails.
    fn save_all(&self, entities: &[T]) -> Result<Vec<T>, RepositoryError> {
        entities.iter().map(|entity| self.save(entity)).collect()
    }

    /// Retrieve a copy of the entity with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Storage`] if the backing store fails.
    fn find_by_id(&self, id: &Self::Id) -> Result<Option<T>, RepositoryError>;

    /// Whether an entity with the given id exists.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Storage`] if the backing store fails.
    fn exists_by_id(&self, id: &Self::Id) -> Result<bool, RepositoryError> {
        Ok(self.find_by_id(id)?.is_some())
    }

    /// Copies of all stored entities, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Storage`] if the backing store fails.
    fn find_all(&self) -> Result<Vec<T>, RepositoryError>;

    /// Copies of the entities with the given ids; unknown ids are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Storage`] if the backing store fails.
    fn find_all_by_id(&self, ids: &[Self::Id]) -> Result<Vec<T>, RepositoryError> {
        let mut found = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(entity) = self.find_by_id(id)? {
                found.push(entity);
            }
        }
        Ok(found)
    }

    /// Number of stored entities.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Storage`] if the backing store fails.
    fn count(&self) -> Result<usize, RepositoryError>;

    /// Delete the entity with the given id; unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Storage`] if the backing store fails.
    fn delete_by_id(&self, id: &Self::Id) -> Result<(), RepositoryError>;

    /// Delete the stored entry of the given entity.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::InvalidArgument`] if the entity has no id.
    fn delete(&self, entity: &T) -> Result<(), RepositoryError>;

    /// Delete the entities with the given ids; unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Storage`] if the backing store fails.
    fn delete_all_by_id(&self, ids: &[Self::Id]) -> Result<(), RepositoryError> {
        ids.iter().try_for_each(|id| self.delete_by_id(id))
    }

    /// Delete the stored entries of the given entities.
    ///
    /// Either all entities are deleted or, if one of them has no id, none is.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::InvalidArgument`] if any entity has no id.
    fn delete_all(&self, entities: &[T]) -> Result<(), RepositoryError>;

    /// Delete every stored entity.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Storage`] if the backing store fails.
    fn clear(&self) -> Result<(), RepositoryError>;
}
