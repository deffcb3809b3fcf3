//! In-memory repository implementation for testing and local runs.
//!
//! Provides a fast, deterministic repository backed by an insertion-ordered
//! map. Entities are copied on every write and every read through
//! [`EntityAccess::copy_with_id`], so no caller can alias stored state.

use behavior_core::{EntityAccess, Repository, RepositoryError};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

const ENTITY_MUST_HAVE_ID: &str = "Entity must have an id to be deleted";

/// Stored entries, in insertion order.
///
/// Re-saving an existing id keeps its original position.
struct Entries<I, T> {
    order: Vec<I>,
    by_id: HashMap<I, T>,
}

impl<I: Clone + Eq + Hash, T> Entries<I, T> {
    fn new() -> Self {
        Self {
            order: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    fn insert(&mut self, id: I, entity: T) {
        if self.by_id.insert(id.clone(), entity).is_none() {
            self.order.push(id);
        }
    }

    fn remove(&mut self, id: &I) {
        if self.by_id.remove(id).is_some() {
            self.order.retain(|existing| existing != id);
        }
    }

    fn clear(&mut self) {
        self.order.clear();
        self.by_id.clear();
    }

    fn iter(&self) -> impl Iterator<Item = (&I, &T)> {
        self.order
            .iter()
            .filter_map(|id| self.by_id.get(id).map(|entity| (id, entity)))
    }
}

/// In-memory repository implementation for testing.
///
/// Each operation takes the internal lock for its own duration only; a
/// find → mutate → save sequence from a caller is not atomic.
///
/// # Example
///
/// ```ignore
/// use behavior_testing::InMemoryRepository;
///
/// let repository = InMemoryRepository::new(TodoListAccess);
/// let saved = repository.save(&TodoList::new())?;
/// let reloaded = repository.find_by_id(&saved.id())?;
/// assert_eq!(reloaded, Some(saved));
/// ```
pub struct InMemoryRepository<T, A: EntityAccess<T>> {
    access: A,
    entries: RwLock<Entries<A::Id, T>>,
}

impl<T, A: EntityAccess<T>> InMemoryRepository<T, A> {
    /// Create an empty repository using `access` for ids and copies
    #[must_use]
    pub fn new(access: A) -> Self {
        Self {
            access,
            entries: RwLock::new(Entries::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Entries<A::Id, T>>, RepositoryError> {
        self.entries
            .read()
            .map_err(|_| RepositoryError::Storage("repository lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Entries<A::Id, T>>, RepositoryError> {
        self.entries
            .write()
            .map_err(|_| RepositoryError::Storage("repository lock poisoned".to_string()))
    }

    fn copy_of(&self, id: &A::Id, entity: &T) -> T {
        self.access.copy_with_id(entity, id.clone())
    }

    fn required_id_of(&self, entity: &T) -> Result<A::Id, RepositoryError> {
        self.access
            .id_of(entity)
            .ok_or_else(|| RepositoryError::InvalidArgument(ENTITY_MUST_HAVE_ID.to_string()))
    }
}

impl<T, A> Default for InMemoryRepository<T, A>
where
    A: EntityAccess<T> + Default,
{
    fn default() -> Self {
        Self::new(A::default())
    }
}

impl<T, A> std::fmt::Debug for InMemoryRepository<T, A>
where
    A: EntityAccess<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.read().map(|entries| entries.order.len()).ok();
        f.debug_struct("InMemoryRepository")
            .field("count", &count)
            .finish_non_exhaustive()
    }
}

impl<T, A> Repository<T> for InMemoryRepository<T, A>
where
    T: Send + Sync,
    A: EntityAccess<T>,
{
    type Id = A::Id;

    fn save(&self, entity: &T) -> Result<T, RepositoryError> {
        let id = self
            .access
            .id_of(entity)
            .unwrap_or_else(|| self.access.next_id());
        let stored = self.copy_of(&id, entity);
        let returned = self.copy_of(&id, &stored);

        self.write()?.insert(id.clone(), stored);
        tracing::trace!(id = ?id, "Entity saved");

        Ok(returned)
    }

    fn find_by_id(&self, id: &Self::Id) -> Result<Option<T>, RepositoryError> {
        let entries = self.read()?;
        Ok(entries.by_id.get(id).map(|entity| self.copy_of(id, entity)))
    }

    fn exists_by_id(&self, id: &Self::Id) -> Result<bool, RepositoryError> {
        Ok(self.read()?.by_id.contains_key(id))
    }

    fn find_all(&self) -> Result<Vec<T>, RepositoryError> {
        let entries = self.read()?;
        Ok(entries
            .iter()
            .map(|(id, entity)| self.copy_of(id, entity))
            .collect())
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.read()?.by_id.len())
    }

    fn delete_by_id(&self, id: &Self::Id) -> Result<(), RepositoryError> {
        self.write()?.remove(id);
        tracing::trace!(id = ?id, "Entity deleted");
        Ok(())
    }

    fn delete(&self, entity: &T) -> Result<(), RepositoryError> {
        let id = self.required_id_of(entity)?;
        self.delete_by_id(&id)
    }

    fn delete_all_by_id(&self, ids: &[Self::Id]) -> Result<(), RepositoryError> {
        let mut entries = self.write()?;
        for id in ids {
            entries.remove(id);
        }
        Ok(())
    }

    fn delete_all(&self, entities: &[T]) -> Result<(), RepositoryError> {
        // Resolve every id before touching the store.
        let ids = entities
            .iter()
            .map(|entity| self.required_id_of(entity))
            .collect::<Result<Vec<_>, _>>()?;
        self.delete_all_by_id(&ids)
    }

    fn clear(&self) -> Result<(), RepositoryError> {
        self.write()?.clear();
        tracing::trace!("Repository cleared");
        Ok(())
    }
}
